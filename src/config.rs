//! Game tuning, loaded from TOML.
//!
//! Every section is `#[serde(default)]`, so a config file only needs the keys
//! it wants to change:
//!
//! ```toml
//! seed = 7
//!
//! [spawner]
//! interval = 3.0
//!
//! [asteroids]
//! fragment_count = 4
//! ```

use std::fs;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::AsteroidSize;
use crate::error::ConfigError;

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "asteroid_shooter.toml";

/// Largest sprite edge, in px, a config may ask for.
pub const MAX_SPRITE_SIZE: u32 = 1024;

// ── Ranges ────────────────────────────────────────────────────────────────────

/// Inclusive `[min, max]` range that random values are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample; a collapsed range yields `min`.
    pub fn sample(&self, rng: &mut impl Rng) -> f32 {
        if self.max > self.min {
            rng.gen_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(ConfigError::InvalidRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

// ── Sections ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Thrust in px/s².
    pub acceleration: f32,
    pub friction: f32,
    /// Degrees per second.
    pub rotation_speed: f32,
    /// Brake decays velocity by `friction / brake_base^dt`.
    pub brake_base: f32,
    /// Ambient drag decays velocity by `friction / drag_base^dt`.
    pub drag_base: f32,
    /// Seconds between shots.
    pub fire_cooldown: f32,
    /// Ship sprite edge length in px.
    pub size: u32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            acceleration: 600.0,
            friction: 0.999,
            rotation_speed: 120.0,
            brake_base: 16.0,
            drag_base: 1.5,
            fire_cooldown: 0.5,
            size: 48,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Seconds before a projectile expires.
    pub time_to_live: f32,
    /// Muzzle speed as a fraction of the ship's acceleration.
    pub speed_factor: f32,
    pub length: u32,
    pub thickness: u32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            time_to_live: 3.0,
            speed_factor: 0.5,
            length: 24,
            thickness: 6,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerConfig {
    /// Seconds between Big asteroid spawns.
    pub interval: f32,
    /// Spawn height, above the top edge.
    pub spawn_y: f32,
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            interval: 5.0,
            spawn_y: -100.0,
        }
    }
}

/// One row of the asteroid tier table. A tier overridden in a config file
/// must be given in full.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Per-axis velocity range in px/s.
    pub velocity: Span,
    /// Spin range in degrees per second.
    pub rotation: Span,
    /// Points awarded when destroyed.
    pub score: u32,
    /// Sprite diameter in px.
    pub size: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    /// Children spawned when a Big or Medium asteroid breaks.
    pub fragment_count: usize,
    pub small: TierConfig,
    pub medium: TierConfig,
    pub big: TierConfig,
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            fragment_count: 3,
            small: TierConfig {
                velocity: Span::new(-120.0, 120.0),
                rotation: Span::new(-120.0, 120.0),
                score: 50,
                size: 32,
            },
            medium: TierConfig {
                velocity: Span::new(-80.0, 80.0),
                rotation: Span::new(-60.0, 60.0),
                score: 50,
                size: 64,
            },
            big: TierConfig {
                velocity: Span::new(-40.0, 40.0),
                rotation: Span::new(-30.0, 30.0),
                score: 100,
                size: 120,
            },
        }
    }
}

impl AsteroidConfig {
    pub fn tier(&self, size: AsteroidSize) -> &TierConfig {
        match size {
            AsteroidSize::Small => &self.small,
            AsteroidSize::Medium => &self.medium,
            AsteroidSize::Big => &self.big,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Logical resolution in px.
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    /// Target frame rate.
    pub fps: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fullscreen: false,
            fps: 60,
        }
    }
}

// ── Top level ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed RNG seed; random per run when absent.
    pub seed: Option<u64>,
    pub player: PlayerConfig,
    pub projectile: ProjectileConfig,
    pub spawner: SpawnerConfig,
    pub asteroids: AsteroidConfig,
    pub display: DisplayConfig,
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, else [`DEFAULT_CONFIG_FILE`] if it exists, else
    /// fall back to the built-in defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            return Self::load(default_path);
        }
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("player.acceleration", self.player.acceleration)?;
        positive("player.brake_base", self.player.brake_base)?;
        positive("player.drag_base", self.player.drag_base)?;
        non_negative("player.friction", self.player.friction)?;
        non_negative("player.rotation_speed", self.player.rotation_speed)?;
        non_negative("player.fire_cooldown", self.player.fire_cooldown)?;
        sprite_size("player.size", self.player.size)?;

        positive("projectile.time_to_live", self.projectile.time_to_live)?;
        non_negative("projectile.speed_factor", self.projectile.speed_factor)?;
        sprite_size("projectile.length", self.projectile.length)?;
        sprite_size("projectile.thickness", self.projectile.thickness)?;

        positive("spawner.interval", self.spawner.interval)?;
        if !self.spawner.spawn_y.is_finite() {
            return Err(ConfigError::InvalidValue {
                name: "spawner.spawn_y",
                value: self.spawner.spawn_y as f64,
            });
        }

        let tiers = [
            ("asteroids.small", &self.asteroids.small),
            ("asteroids.medium", &self.asteroids.medium),
            ("asteroids.big", &self.asteroids.big),
        ];
        for (name, tier) in tiers {
            tier.velocity.validate(name)?;
            tier.rotation.validate(name)?;
            sprite_size(name, tier.size)?;
        }

        positive("display.width", self.display.width as f32)?;
        positive("display.height", self.display.height as f32)?;
        positive("display.fps", self.display.fps as f32)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value: value as f64,
        })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value: value as f64,
        })
    }
}

fn sprite_size(name: &'static str, value: u32) -> Result<(), ConfigError> {
    if (1..=MAX_SPRITE_SIZE).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value: value as f64,
        })
    }
}
