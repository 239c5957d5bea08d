//! Screens and the window/session control surface.
//!
//! [`App`] owns the current screen, the window settings and, while a game is
//! on, the [`GameSession`]. Menus are deliberately thin: a handful of buttons
//! (and keyboard shortcuts) that call the control methods.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::entities::Viewport;
use crate::input::{InputSnapshot, Keys};
use crate::render::{draw_session, Align, Canvas, Rect};
use crate::session::GameSession;

/// Resolutions offered on the settings screen, in button order.
pub const RESOLUTIONS: [(u32, u32); 5] = [
    (800, 600),
    (1024, 768),
    (1280, 720),
    (1920, 1080),
    (1536, 866),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    Settings,
    Game,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    StartGame,
    OpenSettings,
    ReturnToMenu,
    ToggleFullscreen,
    SetResolution(u32, u32),
    Quit,
}

// ── Buttons ───────────────────────────────────────────────────────────────────

/// A clickable button placed relative to the window size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Button {
    pub label: &'static str,
    /// Centre as a fraction of the window size.
    pub anchor: Vec2,
    /// Size in logical pixels.
    pub size: Vec2,
    pub action: Action,
}

impl Button {
    const fn new(label: &'static str, anchor: (f32, f32), size: (f32, f32), action: Action) -> Self {
        Self {
            label,
            anchor: Vec2::new(anchor.0, anchor.1),
            size: Vec2::new(size.0, size.1),
            action,
        }
    }

    /// Where the button sits in the current window.
    pub fn rect(&self, view: Viewport) -> Rect {
        let center = Vec2::new(self.anchor.x * view.width, self.anchor.y * view.height);
        Rect::from_center(center, self.size)
    }
}

const MENU_BUTTON: (f32, f32) = (200.0, 50.0);

const MAIN_MENU_BUTTONS: [Button; 3] = [
    Button::new("Start Game", (0.5, 0.4), MENU_BUTTON, Action::StartGame),
    Button::new("Settings", (0.5, 0.5), MENU_BUTTON, Action::OpenSettings),
    Button::new("Quit Game", (0.5, 0.6), MENU_BUTTON, Action::Quit),
];

const SETTINGS_BUTTONS: [Button; 7] = [
    Button::new("FS", (0.5, 0.2), (50.0, 50.0), Action::ToggleFullscreen),
    Button::new("800x600", (0.5, 0.3), MENU_BUTTON, Action::SetResolution(800, 600)),
    Button::new("1024x768", (0.5, 0.4), MENU_BUTTON, Action::SetResolution(1024, 768)),
    Button::new("1280x720", (0.5, 0.5), MENU_BUTTON, Action::SetResolution(1280, 720)),
    Button::new("1920x1080", (0.5, 0.6), MENU_BUTTON, Action::SetResolution(1920, 1080)),
    Button::new("1536x866", (0.5, 0.7), MENU_BUTTON, Action::SetResolution(1536, 866)),
    Button::new("Back", (0.5, 0.8), MENU_BUTTON, Action::ReturnToMenu),
];

const GAME_BUTTONS: [Button; 1] = [Button::new(
    "M",
    (0.02, 0.1),
    (32.0, 32.0),
    Action::ReturnToMenu,
)];

// ── Window ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowState {
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
}

impl WindowState {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    config: GameConfig,
    window: WindowState,
    screen: Screen,
    session: Option<GameSession>,
    running: bool,
    /// Seeds for successive sessions.
    seeds: Pcg32,
    previous: InputSnapshot,
}

impl App {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let window = WindowState {
            width: config.display.width,
            height: config.display.height,
            fullscreen: config.display.fullscreen,
        };
        Self {
            config,
            window,
            screen: Screen::MainMenu,
            session: None,
            running: true,
            seeds: Pcg32::seed_from_u64(seed),
            previous: InputSnapshot::default(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn window(&self) -> WindowState {
        self.window
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut GameSession> {
        self.session.as_mut()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Buttons on the current screen.
    pub fn buttons(&self) -> &'static [Button] {
        match self.screen {
            Screen::MainMenu => &MAIN_MENU_BUTTONS,
            Screen::Settings => &SETTINGS_BUTTONS,
            Screen::Game => &GAME_BUTTONS,
        }
    }

    // ── Control surface ───────────────────────────────────────────────────────

    /// Begin a fresh session and switch to the game screen.
    pub fn start_game(&mut self) {
        let seed = self.seeds.gen::<u64>();
        self.session = Some(GameSession::new(&self.config, self.window.viewport(), seed));
        self.screen = Screen::Game;
    }

    /// Throw the current session away and start over from scratch.
    pub fn restart(&mut self) {
        log::info!("Restarting");
        self.start_game();
    }

    pub fn open_settings(&mut self) {
        log::info!("Opening settings");
        self.screen = Screen::Settings;
    }

    /// Leave the game (dropping its session) or settings for the main menu.
    pub fn return_to_menu(&mut self) {
        self.session = None;
        self.screen = Screen::MainMenu;
    }

    /// Change the logical resolution. The game reads it every frame, so a
    /// running session picks it up on its next tick.
    pub fn set_resolution(&mut self, width: u32, height: u32) {
        self.window.width = width.max(1);
        self.window.height = height.max(1);
        log::info!("Resolution set to {}x{}", self.window.width, self.window.height);
    }

    pub fn toggle_fullscreen(&mut self) {
        self.window.fullscreen = !self.window.fullscreen;
        log::info!("Fullscreen {}", if self.window.fullscreen { "on" } else { "off" });
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn perform(&mut self, action: Action) {
        match action {
            Action::StartGame => self.start_game(),
            Action::OpenSettings => self.open_settings(),
            Action::ReturnToMenu => self.return_to_menu(),
            Action::ToggleFullscreen => self.toggle_fullscreen(),
            Action::SetResolution(w, h) => self.set_resolution(w, h),
            Action::Quit => self.quit(),
        }
    }

    // ── Frame ─────────────────────────────────────────────────────────────────

    /// Handle one frame of input and, on the game screen, advance the
    /// session by `dt` seconds.
    pub fn frame(&mut self, input: &InputSnapshot, dt: f32) {
        let pressed = input.pressed_since(&self.previous);
        let clicked = input.clicked_since(&self.previous);
        self.previous = *input;
        let view = self.window.viewport();

        if clicked {
            let hit = self
                .buttons()
                .iter()
                .find(|b| b.rect(view).contains(input.mouse));
            if let Some(button) = hit {
                self.perform(button.action);
                return;
            }
        }

        match self.screen {
            Screen::MainMenu => {
                if pressed.contains(Keys::CONFIRM) {
                    self.start_game();
                } else if pressed.contains(Keys::SETTINGS) {
                    self.open_settings();
                } else if pressed.intersects(Keys::QUIT | Keys::BACK) {
                    self.quit();
                }
            }
            Screen::Settings => {
                if let Some((w, h)) = pressed.preset().map(|i| RESOLUTIONS[i]) {
                    self.set_resolution(w, h);
                } else if pressed.contains(Keys::FULLSCREEN) {
                    self.toggle_fullscreen();
                } else if pressed.intersects(Keys::BACK | Keys::QUIT) {
                    self.return_to_menu();
                }
            }
            Screen::Game => {
                if pressed.contains(Keys::QUIT) {
                    self.quit();
                } else if pressed.intersects(Keys::MENU | Keys::BACK) {
                    self.return_to_menu();
                } else if pressed.contains(Keys::RESTART) {
                    self.restart();
                } else if let Some(session) = self.session.as_mut() {
                    session.tick(input.keys, dt, view);
                }
            }
        }
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) -> std::io::Result<()> {
        let view = self.window.viewport();
        canvas.clear(view);

        match self.screen {
            Screen::MainMenu => {
                canvas.draw_text(
                    "ASTEROIDS",
                    Vec2::new(view.width / 2.0, view.height * 0.2),
                    Align::Center,
                );
            }
            Screen::Settings => {
                let label = format!("{}x{}", self.window.width, self.window.height);
                canvas.draw_text(
                    &label,
                    Vec2::new(view.width / 2.0, view.height * 0.1),
                    Align::Center,
                );
            }
            Screen::Game => {
                if let Some(session) = &self.session {
                    draw_session(canvas, session, view);
                }
            }
        }

        for button in self.buttons() {
            let rect = button.rect(view);
            canvas.draw_button(button.label, rect, rect.contains(self.previous.mouse));
        }

        canvas.present()
    }
}
