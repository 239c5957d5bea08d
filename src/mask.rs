//! Per-pixel collision masks.
//!
//! Sprites are procedural, so their masks are too: the ship is a triangle,
//! lasers are thin bars and asteroids are discs. A body keeps its base mask
//! and re-rasterises a rotated copy whenever its angle changes.

use std::rc::Rc;

use glam::{IVec2, Vec2};

use crate::config::GameConfig;
use crate::entities::{AsteroidSize, Sprite};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Build a mask by testing every pixel.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> bool) -> Self {
        let mut bits = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                bits.push(f(x, y));
            }
        }
        Self { width, height, bits }
    }

    /// Fully set rectangle.
    pub fn rect(width: u32, height: u32) -> Self {
        Self::from_fn(width, height, |_, _| true)
    }

    /// Filled disc inscribed in a `diameter` square.
    pub fn disc(diameter: u32) -> Self {
        let r = diameter as f32 / 2.0;
        Self::from_fn(diameter, diameter, |x, y| {
            let dx = x as f32 + 0.5 - r;
            let dy = y as f32 + 0.5 - r;
            dx * dx + dy * dy <= r * r
        })
    }

    /// Isosceles triangle with its apex at the top centre.
    pub fn triangle(width: u32, height: u32) -> Self {
        let half = width as f32 / 2.0;
        Self::from_fn(width, height, |x, y| {
            let t = (y as f32 + 0.5) / height as f32;
            (x as f32 + 0.5 - half).abs() <= half * t
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn get(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return false;
        }
        self.bits[y as usize * self.width as usize + x as usize]
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }

    /// Rotate clockwise (on screen, y down) by `degrees`. The result grows to
    /// the rotated bounding box, keeping the shape centred.
    pub fn rotated(&self, degrees: f32) -> Mask {
        let degrees = degrees.rem_euclid(360.0);
        if degrees == 0.0 || self.width == 0 || self.height == 0 {
            return self.clone();
        }

        let (sin, cos) = degrees.to_radians().sin_cos();
        let (w, h) = (self.width as f32, self.height as f32);
        // Trim float noise so 90° turns don't gain a pixel.
        let new_w = (w * cos.abs() + h * sin.abs() - 1e-3).ceil().max(1.0);
        let new_h = (w * sin.abs() + h * cos.abs() - 1e-3).ceil().max(1.0);

        let src_c = Vec2::new(w / 2.0, h / 2.0);
        let dst_c = Vec2::new(new_w / 2.0, new_h / 2.0);

        Mask::from_fn(new_w as u32, new_h as u32, |x, y| {
            let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - dst_c;
            // inverse rotation back into source space
            let sx = d.x * cos + d.y * sin + src_c.x;
            let sy = -d.x * sin + d.y * cos + src_c.y;
            self.get(sx.floor() as i32, sy.floor() as i32)
        })
    }

    /// Whether any set pixel of `other`, placed with its top-left corner at
    /// `offset` relative to ours, lands on a set pixel of this mask.
    pub fn overlaps(&self, other: &Mask, offset: IVec2) -> bool {
        let x0 = offset.x.max(0);
        let y0 = offset.y.max(0);
        let x1 = (offset.x + other.width as i32).min(self.width as i32);
        let y1 = (offset.y + other.height as i32).min(self.height as i32);

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - offset.x, y - offset.y) {
                    return true;
                }
            }
        }
        false
    }
}

// ── Sprite bank ───────────────────────────────────────────────────────────────

/// Unrotated masks for every sprite, sized from the configuration.
#[derive(Clone, Debug)]
pub struct SpriteBank {
    ship: Rc<Mask>,
    laser: Rc<Mask>,
    small: Rc<Mask>,
    medium: Rc<Mask>,
    big: Rc<Mask>,
}

impl SpriteBank {
    pub fn new(config: &GameConfig) -> Self {
        let tiers = &config.asteroids;
        Self {
            ship: Rc::new(Mask::triangle(config.player.size, config.player.size)),
            // Lasers are drawn lying along x; the firing angle stands them up.
            laser: Rc::new(Mask::rect(
                config.projectile.length,
                config.projectile.thickness,
            )),
            small: Rc::new(Mask::disc(tiers.small.size)),
            medium: Rc::new(Mask::disc(tiers.medium.size)),
            big: Rc::new(Mask::disc(tiers.big.size)),
        }
    }

    pub fn get(&self, sprite: Sprite) -> Rc<Mask> {
        match sprite {
            Sprite::Ship => Rc::clone(&self.ship),
            Sprite::Laser => Rc::clone(&self.laser),
            Sprite::Asteroid(AsteroidSize::Small) => Rc::clone(&self.small),
            Sprite::Asteroid(AsteroidSize::Medium) => Rc::clone(&self.medium),
            Sprite::Asteroid(AsteroidSize::Big) => Rc::clone(&self.big),
        }
    }
}
