use thiserror::Error;

use crate::config::ConfigError;

// Errors that stop the sketch from starting
#[derive(Error, Debug)]
pub enum SnowfallError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to build window: {0}")]
    Window(String),
    #[error("window closed before the sketch finished starting")]
    WindowLost,
}

pub type SnowfallResult<T> = Result<T, SnowfallError>;
