//! Per-frame input snapshot.
//!
//! Frontends translate whatever their windowing layer reports into an
//! [`InputSnapshot`] once per frame; the core never sees raw events.

use bitflags::bitflags;
use glam::Vec2;

bitflags! {
    /// Logical keys held down this frame.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Keys: u32 {
        const THRUST     = 1 << 0;
        const BRAKE      = 1 << 1;
        const LEFT       = 1 << 2;
        const RIGHT      = 1 << 3;
        const FIRE       = 1 << 4;
        const RESTART    = 1 << 5;
        const MENU       = 1 << 6;
        const CONFIRM    = 1 << 7;
        const SETTINGS   = 1 << 8;
        const FULLSCREEN = 1 << 9;
        const BACK       = 1 << 10;
        const QUIT       = 1 << 11;
        const PRESET_1   = 1 << 12;
        const PRESET_2   = 1 << 13;
        const PRESET_3   = 1 << 14;
        const PRESET_4   = 1 << 15;
        const PRESET_5   = 1 << 16;
    }
}

impl Keys {
    const PRESETS: [Keys; 5] = [
        Keys::PRESET_1,
        Keys::PRESET_2,
        Keys::PRESET_3,
        Keys::PRESET_4,
        Keys::PRESET_5,
    ];

    /// Index of the first resolution preset key held, if any.
    pub fn preset(self) -> Option<usize> {
        Self::PRESETS.iter().position(|k| self.contains(*k))
    }
}

/// Everything the game reads from the outside world in one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub keys: Keys,
    /// Mouse position in logical pixels.
    pub mouse: Vec2,
    /// Left mouse button held.
    pub mouse_down: bool,
}

impl InputSnapshot {
    /// Keys held now that were not held in `previous`.
    pub fn pressed_since(&self, previous: &InputSnapshot) -> Keys {
        self.keys - previous.keys
    }

    /// Left button went down this frame.
    pub fn clicked_since(&self, previous: &InputSnapshot) -> bool {
        self.mouse_down && !previous.mouse_down
    }
}
