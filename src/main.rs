/*
 * Snowfall
 *
 * Four clouds of sprites drift down through a fixed perspective view,
 * bounce between invisible side walls and reappear part-way up when they
 * hit the floor. A panel edits the shared material (size, transparency,
 * opacity, color, size attenuation) and every edit rebuilds the clouds.
 */

use snowfall::app;
use snowfall::{AppConfig, SnowfallError};

fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            app::init_logging("snowfall=info");
            let err = SnowfallError::from(err);
            tracing::error!(target: "snowfall", "{err}");
            eprintln!("snowfall failed to start: {err}");
            std::process::exit(1);
        }
    };

    app::init_logging(&config.log_filter);
    app::run(config);
}
