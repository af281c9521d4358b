/*
 * Snowfall - Module Definitions
 *
 * This file defines the module structure for the falling sprite sketch.
 * Only app, renderer and the panel half of ui need a live window; the
 * rest is plain data and math so it can be driven from tests.
 */

// Re-export key components for easier access
pub use app::Model;
pub use camera::Camera;
pub use config::{AppConfig, ConfigError};
pub use debug::DebugInfo;
pub use error::SnowfallError;
pub use params::RenderParams;
pub use particle::{Material, ParticleBatch};
pub use scene::Scene;
pub use sprite::{SpriteError, SpriteId, SpriteSheet, SPRITES};

// Define modules
pub mod app;
pub mod camera;
pub mod config;
pub mod debug;
pub mod error;
pub mod params;
pub mod particle;
pub mod renderer;
pub mod scene;
pub mod sprite;
pub mod ui;

// Constants
pub const PARTICLES_PER_BATCH: usize = 100;

// Spawn volume: x and z in [-SPAWN_RANGE/2, SPAWN_RANGE/2], y in [0, SPAWN_RANGE * 1.5]
pub const SPAWN_RANGE: f32 = 150.0;

// Particles falling below the floor reappear at this height
pub const RECYCLE_HEIGHT: f32 = 60.0;

// Horizontal extent past which x and z velocities reflect
pub const REFLECT_BOUND: f32 = 20.0;
