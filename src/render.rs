//! Drawing interface between the core and a frontend.
//!
//! The core describes a frame as a series of calls on a [`Canvas`]; it never
//! touches a terminal or window directly.

use glam::Vec2;

use crate::entities::{Body, Sprite, Viewport};
use crate::mask::Mask;
use crate::session::GameSession;

/// Axis-aligned rectangle in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.min + self.size;
        point.x >= self.min.x && point.x < max.x && point.y >= self.min.y && point.y < max.y
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// `pos` is the top-left corner of the text.
    Left,
    /// `pos` is the centre of the text.
    Center,
}

pub trait Canvas {
    /// Start a new frame covering `view`.
    fn clear(&mut self, view: Viewport);

    /// Draw a sprite centred on `center`, turned by `angle` degrees. `mask`
    /// is the rotated silhouette, for frontends without artwork.
    fn draw_sprite(&mut self, sprite: Sprite, mask: &Mask, center: Vec2, angle: f32);

    fn draw_text(&mut self, text: &str, pos: Vec2, align: Align);

    fn draw_button(&mut self, label: &str, rect: Rect, hovered: bool);

    /// Show the finished frame.
    fn present(&mut self) -> std::io::Result<()>;
}

fn draw_body<C: Canvas + ?Sized>(canvas: &mut C, body: &Body) {
    canvas.draw_sprite(body.sprite, body.mask(), body.pos, body.angle());
}

/// Draw every entity of a session plus the score line. Does not clear or
/// present.
pub fn draw_session<C: Canvas + ?Sized>(canvas: &mut C, session: &GameSession, view: Viewport) {
    draw_body(canvas, &session.player.body);
    for projectile in &session.projectiles {
        draw_body(canvas, &projectile.body);
    }
    for asteroid in &session.asteroids {
        draw_body(canvas, &asteroid.body);
    }

    canvas.draw_text(&session.score.to_string(), Vec2::ZERO, Align::Left);

    if session.is_over() {
        canvas.draw_text("GAME OVER - R to restart", view.center(), Align::Center);
    }
}
