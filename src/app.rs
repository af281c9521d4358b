/*
 * Application Module
 *
 * This module defines the main application model: window setup, the
 * per-frame update and the rebuild triggered by panel edits.
 *
 * Each update:
 * - records frame stats for the overlay
 * - runs the panel and rebuilds every point cloud if a field changed
 * - advances all particles by one tick
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use std::sync::OnceLock;

use crate::camera::Camera;
use crate::config::AppConfig;
use crate::debug::DebugInfo;
use crate::error::{SnowfallError, SnowfallResult};
use crate::params::RenderParams;
use crate::renderer::view;
use crate::scene::Scene;
use crate::sprite::{self, SpriteSheet, SPRITES};
use crate::ui;

// Fallback when the monitor size is unavailable
const DEFAULT_WINDOW_SIZE: (u32, u32) = (1280, 720);

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

// Main model for the application
pub struct Model {
    pub scene: Scene,
    pub params: RenderParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub sprites: SpriteSheet,
    // One tinted texture per batch, None for sprites that failed to load
    pub textures: Vec<Option<wgpu::Texture>>,
}

// Install the tracing subscriber. RUST_LOG wins over the configured filter.
pub fn init_logging(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

// Start the sketch with the given configuration
pub fn run(config: AppConfig) {
    tracing::info!(target: "snowfall", assets = %config.assets_dir.display(), "starting");
    let _ = CONFIG.set(config);
    nannou::app(model).update(update).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = CONFIG.get_or_init(AppConfig::default);
    match build_model(app, config) {
        Ok(model) => model,
        Err(err) => {
            tracing::error!(target: "snowfall", "{err}");
            std::process::exit(1);
        }
    }
}

fn build_model(app: &App, config: &AppConfig) -> SnowfallResult<Model> {
    // Size the window relative to the primary monitor
    let monitor_size = app.primary_monitor().map(|monitor| {
        let size = monitor.size();
        (size.width, size.height)
    });
    let (window_width, window_height) = window_size(monitor_size, config.window.size_fraction);

    let window_id = app
        .new_window()
        .title(&config.window.title)
        .size(window_width, window_height)
        .view(view)
        .raw_event(raw_window_event)
        .build()
        .map_err(|err| SnowfallError::Window(format!("{err:?}")))?;

    let window = app.window(window_id).ok_or(SnowfallError::WindowLost)?;
    let egui = Egui::from_window(&window);
    drop(window);

    let sprites = SpriteSheet::load(&config.assets_dir, &SPRITES);
    tracing::info!(
        target: "snowfall",
        loaded = sprites.loaded_count(),
        total = SPRITES.len(),
        "sprites ready"
    );

    let mut model = Model {
        scene: Scene::new(),
        params: config.render.clone(),
        egui,
        debug_info: DebugInfo::default(),
        camera: Camera::new(),
        sprites,
        textures: Vec::new(),
    };
    model.redraw(app);
    Ok(model)
}

impl Model {
    // Replace every point cloud and its textures with ones built from the
    // current parameters
    pub fn redraw(&mut self, app: &App) {
        self.scene
            .rebuild(&self.params, &SPRITES, &mut rand::thread_rng());

        let sprites = &self.sprites;
        self.textures = self
            .scene
            .batches()
            .iter()
            .map(|batch| {
                sprites.image(batch.material.sprite).map(|image| {
                    let tinted = sprite::tint(image, &batch.material);
                    wgpu::Texture::from_image(app, &nannou::image::DynamicImage::ImageRgba8(tinted))
                })
            })
            .collect();

        self.debug_info.particles = self.scene.particle_count();
    }
}

// Scale the monitor size by `fraction`, never below one pixel
pub fn window_size(monitor_size: Option<(u32, u32)>, fraction: f32) -> (u32, u32) {
    match monitor_size {
        Some((width, height)) => (
            ((width as f32 * fraction) as u32).max(1),
            ((height as f32 * fraction) as u32).max(1),
        ),
        None => DEFAULT_WINDOW_SIZE,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.record_frame(app.fps(), update.since_last);

    if ui::update_ui(&mut model.egui, &mut model.params) {
        tracing::debug!(target: "snowfall", params = ?model.params, "parameters changed");
        model.redraw(app);
    }

    model.scene.tick();
}

// Handle raw window events for egui
fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_scales_both_dimensions() {
        assert_eq!(window_size(Some((1920, 1080)), 0.8), (1536, 864));
        assert_eq!(window_size(Some((1920, 1080)), 1.0), (1920, 1080));
    }

    #[test]
    fn tiny_fraction_keeps_one_pixel() {
        assert_eq!(window_size(Some((1920, 1080)), 0.0001), (1, 1));
    }

    #[test]
    fn unknown_monitor_uses_default_size() {
        assert_eq!(window_size(None, 0.5), DEFAULT_WINDOW_SIZE);
    }
}
