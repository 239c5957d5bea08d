//! Terminal rendering layer. All terminal output lives here.
//!
//! The logical play field (in pixels) is scaled onto the terminal's cell
//! grid. In windowed mode the field sits inside a border; fullscreen uses
//! every cell.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;

use asteroid_shooter::app::WindowState;
use asteroid_shooter::entities::{AsteroidSize, Sprite, Viewport};
use asteroid_shooter::mask::Mask;
use asteroid_shooter::render::{Align, Canvas, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_TEXT: Color = Color::Yellow;
const C_PLAYER: Color = Color::White;
const C_LASER: Color = Color::Cyan;
const C_ASTEROID_BIG: Color = Color::Grey;
const C_ASTEROID_MEDIUM: Color = Color::DarkYellow;
const C_ASTEROID_SMALL: Color = Color::Yellow;
const C_BUTTON: Color = Color::White;
const C_BUTTON_HOVER: Color = Color::DarkGrey;

/// Ship glyphs for each 45° heading sector, starting straight up.
const SHIP_GLYPHS: [&str; 8] = ["↑", "↗", "→", "↘", "↓", "↙", "←", "↖"];

// ── Layout ────────────────────────────────────────────────────────────────────

/// Mapping between logical pixels and terminal cells.
#[derive(Clone, Copy, Debug)]
pub struct Layout {
    origin: (u16, u16),
    cols: u16,
    rows: u16,
    /// Cells per logical pixel.
    scale: Vec2,
    term: (u16, u16),
    bordered: bool,
}

impl Layout {
    pub fn new(term_cols: u16, term_rows: u16, window: WindowState) -> Self {
        let bordered = !window.fullscreen && term_cols > 2 && term_rows > 2;
        let (origin, cols, rows) = if bordered {
            ((1, 1), term_cols - 2, term_rows - 2)
        } else {
            ((0, 0), term_cols, term_rows)
        };
        let view = window.viewport();
        let scale = Vec2::new(
            cols as f32 / view.width.max(1.0),
            rows as f32 / view.height.max(1.0),
        );
        Self {
            origin,
            cols,
            rows,
            scale,
            term: (term_cols, term_rows),
            bordered,
        }
    }

    /// Cell holding a logical point, if it is on screen.
    pub fn to_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        let c = (p * self.scale).floor();
        if c.x < 0.0 || c.y < 0.0 || c.x >= self.cols as f32 || c.y >= self.rows as f32 {
            return None;
        }
        Some((self.origin.0 + c.x as u16, self.origin.1 + c.y as u16))
    }

    /// Logical point at the centre of a terminal cell.
    pub fn to_logical(&self, col: u16, row: u16) -> Vec2 {
        let c = Vec2::new(
            col.saturating_sub(self.origin.0) as f32 + 0.5,
            row.saturating_sub(self.origin.1) as f32 + 0.5,
        );
        c / self.scale.max(Vec2::splat(f32::EPSILON))
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

pub struct TerminalCanvas<'a, W: Write> {
    out: &'a mut W,
    layout: Layout,
    /// First I/O error hit while queueing; reported by `present`.
    error: Option<std::io::Error>,
}

impl<'a, W: Write> TerminalCanvas<'a, W> {
    pub fn new(out: &'a mut W, layout: Layout) -> Self {
        Self {
            out,
            layout,
            error: None,
        }
    }

    fn put(&mut self, col: u16, row: u16, color: Color, text: &str) {
        if self.error.is_some() {
            return;
        }
        // Clip to the terminal's right edge instead of wrapping.
        let room = self.layout.term.0.saturating_sub(col) as usize;
        let clipped: String = text.chars().take(room).collect();
        let result = self
            .out
            .queue(cursor::MoveTo(col, row))
            .and_then(|o| o.queue(style::SetForegroundColor(color)))
            .and_then(|o| o.queue(Print(clipped)))
            .map(|_| ());
        if let Err(e) = result {
            self.error = Some(e);
        }
    }

    fn draw_border(&mut self) {
        let (w, h) = self.layout.term;
        let inner = "─".repeat(w.saturating_sub(2) as usize);
        self.put(0, 0, C_BORDER, &format!("┌{inner}┐"));
        self.put(0, h.saturating_sub(1), C_BORDER, &format!("└{inner}┘"));
        for row in 1..h.saturating_sub(1) {
            self.put(0, row, C_BORDER, "│");
            self.put(w.saturating_sub(1), row, C_BORDER, "│");
        }
    }

    /// Fill every cell whose centre lands on a set mask pixel.
    fn draw_mask(&mut self, mask: &Mask, center: Vec2, color: Color, glyph: &str) {
        let top_left = center - mask.size() / 2.0;
        let scale = self.layout.scale;
        let c0 = (top_left * scale).floor();
        let c1 = ((top_left + mask.size()) * scale).ceil();

        let mut drawn = false;
        let mut cy = c0.y;
        while cy < c1.y {
            let mut cx = c0.x;
            while cx < c1.x {
                let logical = (Vec2::new(cx, cy) + 0.5) / scale;
                let local = (logical - top_left).floor();
                if mask.get(local.x as i32, local.y as i32) {
                    if let Some((col, row)) = self.layout.to_cell(logical) {
                        self.put(col, row, color, glyph);
                        drawn = true;
                    }
                }
                cx += 1.0;
            }
            cy += 1.0;
        }

        // Sprites smaller than a cell still show up.
        if !drawn {
            if let Some((col, row)) = self.layout.to_cell(center) {
                self.put(col, row, color, glyph);
            }
        }
    }
}

impl<W: Write> Canvas for TerminalCanvas<'_, W> {
    fn clear(&mut self, _view: Viewport) {
        if let Err(e) = self.out.queue(terminal::Clear(terminal::ClearType::All)) {
            self.error = Some(e);
        }
        if self.layout.bordered {
            self.draw_border();
        }
    }

    fn draw_sprite(&mut self, sprite: Sprite, mask: &Mask, center: Vec2, angle: f32) {
        match sprite {
            Sprite::Ship => {
                let sector = ((angle + 22.5) / 45.0).floor() as usize % SHIP_GLYPHS.len();
                if let Some((col, row)) = self.layout.to_cell(center) {
                    self.put(col, row, C_PLAYER, SHIP_GLYPHS[sector]);
                }
            }
            Sprite::Laser => {
                if let Some((col, row)) = self.layout.to_cell(center) {
                    self.put(col, row, C_LASER, "•");
                }
            }
            Sprite::Asteroid(size) => {
                let (color, glyph) = match size {
                    AsteroidSize::Big => (C_ASTEROID_BIG, "@"),
                    AsteroidSize::Medium => (C_ASTEROID_MEDIUM, "O"),
                    AsteroidSize::Small => (C_ASTEROID_SMALL, "o"),
                };
                self.draw_mask(mask, center, color, glyph);
            }
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, align: Align) {
        let Some((col, row)) = self.layout.to_cell(pos).or_else(|| {
            // Text anchored on the field's edge still belongs on screen.
            self.layout.to_cell(pos.max(Vec2::ZERO))
        }) else {
            return;
        };
        let col = match align {
            Align::Left => col,
            Align::Center => col.saturating_sub(text.chars().count() as u16 / 2),
        };
        self.put(col, row, C_TEXT, text);
    }

    fn draw_button(&mut self, label: &str, rect: Rect, hovered: bool) {
        let Some((col, row)) = self.layout.to_cell(rect.center()) else {
            return;
        };
        let text = format!("[ {label} ]");
        let col = col.saturating_sub(text.chars().count() as u16 / 2);
        let color = if hovered { C_BUTTON_HOVER } else { C_BUTTON };
        self.put(col, row, color, &text);
    }

    fn present(&mut self) -> std::io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out
            .queue(cursor::MoveTo(0, self.layout.term.1.saturating_sub(1)))?;
        self.out.flush()
    }
}
