//! Timed Big-asteroid spawning.

use glam::Vec2;
use rand::Rng;

use crate::config::SpawnerConfig;
use crate::entities::{Asteroid, Viewport};

#[derive(Clone, Debug)]
pub struct AsteroidSpawner {
    interval: f32,
    spawn_y: f32,
    elapsed: f32,
    halted: bool,
}

impl AsteroidSpawner {
    pub fn new(config: &SpawnerConfig) -> Self {
        Self {
            interval: config.interval,
            spawn_y: config.spawn_y,
            elapsed: 0.0,
            halted: false,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Advance the timer. Returns where to put a new Big asteroid when one is
    /// due; the timer restarts from zero at that point.
    pub fn update(&mut self, dt: f32, view: Viewport, rng: &mut impl Rng) -> Option<Vec2> {
        if self.halted {
            return None;
        }
        self.elapsed += dt;
        if self.elapsed < self.interval {
            return None;
        }
        self.elapsed = 0.0;
        Some(self.spawn_point(view, rng))
    }

    /// Random x across the view, just above the top edge. A view with no
    /// width collapses to x = 0.
    pub fn spawn_point(&self, view: Viewport, rng: &mut impl Rng) -> Vec2 {
        let x = if view.width > 0.0 {
            rng.gen_range(0.0..view.width)
        } else {
            0.0
        };
        Vec2::new(x, self.spawn_y)
    }

    /// Stop spawning for good and freeze the live field in place.
    pub fn halt(&mut self, asteroids: &mut [Asteroid]) {
        self.halted = true;
        for a in asteroids.iter_mut() {
            a.body.vel = Vec2::ZERO;
            a.rotation_rate = 0.0;
        }
        log::debug!("Spawner halted, froze {} asteroids", asteroids.len());
    }
}
