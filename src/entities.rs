//! All game entity types.
//!
//! Entities are plain data plus the small amount of bookkeeping needed to
//! keep a body's rotated collision mask in sync with its angle. Everything
//! that moves them lives in `compute`.

use std::rc::Rc;

use glam::{IVec2, Vec2};

use crate::mask::Mask;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Asteroid size tiers, largest last.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AsteroidSize {
    Small,
    Medium,
    Big,
}

impl AsteroidSize {
    /// The tier a destroyed asteroid of this size breaks into.
    pub fn next_smaller(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Big => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

/// What a body looks like. Renderers pick their artwork from this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sprite {
    Ship,
    Laser,
    Asteroid(AsteroidSize),
}

/// Logical play-field size in pixels, read from the window every frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Unit vector the ship faces at `angle` degrees. Angle 0 points up the
/// screen (negative y) and angles grow clockwise.
pub fn heading(angle: f32) -> Vec2 {
    let r = (angle - 90.0).to_radians();
    Vec2::new(r.cos(), r.sin())
}

// ── Bodies ────────────────────────────────────────────────────────────────────

/// A moving sprite: position is the centre of its (rotated) bounding box.
#[derive(Clone, Debug)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub sprite: Sprite,
    /// Degrees, always in `[0, 360)`.
    angle: f32,
    base: Rc<Mask>,
    /// `base` rotated by `angle`.
    mask: Mask,
}

impl Body {
    pub fn new(sprite: Sprite, base: Rc<Mask>, pos: Vec2, vel: Vec2, angle: f32) -> Self {
        let angle = wrap_degrees(angle);
        let mask = base.rotated(angle);
        Self {
            pos,
            vel,
            sprite,
            angle,
            base,
            mask,
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f32) {
        let angle = wrap_degrees(angle);
        if angle != self.angle {
            self.angle = angle;
            self.mask = self.base.rotated(angle);
        }
    }

    /// Turn by `rate` degrees per second over `dt` seconds.
    pub fn rotate(&mut self, rate: f32, dt: f32) {
        let delta = rate * dt;
        if delta != 0.0 {
            self.set_angle(self.angle + delta);
        }
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Size of the rotated sprite, which is what wrap-around measures against.
    pub fn extent(&self) -> Vec2 {
        self.mask.size()
    }

    /// Integer top-left corner of the rotated sprite.
    pub fn top_left(&self) -> IVec2 {
        let half = self.extent() / 2.0;
        IVec2::new(
            (self.pos.x - half.x).round() as i32,
            (self.pos.y - half.y).round() as i32,
        )
    }

    /// Per-pixel overlap test against another body.
    pub fn overlaps(&self, other: &Body) -> bool {
        let offset = other.top_left() - self.top_left();
        self.mask.overlaps(&other.mask, offset)
    }
}

fn wrap_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}

// ── Player, asteroids & projectiles ───────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub body: Body,
    /// Thrust in px/s².
    pub acceleration: f32,
    pub friction: f32,
    /// Degrees per second.
    pub rotation_speed: f32,
    /// Base of the brake decay `friction / brake_base^dt`.
    pub brake_base: f32,
    /// Base of the ambient drag `friction / drag_base^dt`.
    pub drag_base: f32,
    /// Minimum seconds between shots.
    pub fire_cooldown: f32,
    /// Seconds since the last shot was fired.
    pub since_last_shot: f32,
}

#[derive(Clone, Debug)]
pub struct Asteroid {
    pub body: Body,
    pub size: AsteroidSize,
    /// Spin in degrees per second.
    pub rotation_rate: f32,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub body: Body,
    /// Lifetime in seconds.
    pub time_to_live: f32,
    /// Seconds since the projectile was fired.
    pub age: f32,
}

/// Slack on the expiry test. `age` is a running f32 sum of frame times,
/// which lands a hair short of the true elapsed time.
const EXPIRY_SLACK: f32 = 1e-4;

impl Projectile {
    pub fn is_expired(&self) -> bool {
        self.age >= self.time_to_live - EXPIRY_SLACK
    }

    pub fn remaining_life(&self) -> f32 {
        (self.time_to_live - self.age).max(0.0)
    }
}
