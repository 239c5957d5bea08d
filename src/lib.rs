//! Asteroid Shooter - a small 2D asteroid-shooting arcade game.
//!
//! Core modules:
//! - `entities`: plain game data (ship, asteroids, projectiles)
//! - `mask`: per-pixel collision masks
//! - `compute`: kinematics, firing, fragmentation and collision tests
//! - `spawner`: timed asteroid spawning
//! - `session`: one play-through and its per-frame update
//! - `app`: screens and the window/session control surface
//! - `render` / `input`: the frontend-facing drawing and input types
//! - `config`: TOML-loaded tuning

pub mod app;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod mask;
pub mod render;
pub mod session;
pub mod spawner;

pub use app::{App, Screen};
pub use config::GameConfig;
pub use error::ConfigError;
pub use session::GameSession;
