use asteroid_shooter::app::WindowState;
use asteroid_shooter::entities::{Sprite, Viewport};
use asteroid_shooter::input::{InputSnapshot, Keys};
use asteroid_shooter::mask::Mask;
use asteroid_shooter::render::{Align, Canvas, Rect};
use asteroid_shooter::{App, GameConfig, Screen};

use glam::Vec2;

fn app() -> App {
    App::new(GameConfig::default(), 42)
}

/// Release, then press, so the frame sees a fresh edge.
fn press(app: &mut App, keys: Keys) {
    app.frame(&InputSnapshot::default(), 0.0);
    app.frame(
        &InputSnapshot {
            keys,
            ..InputSnapshot::default()
        },
        0.0,
    );
}

fn click(app: &mut App, at: Vec2) {
    app.frame(
        &InputSnapshot {
            mouse: at,
            ..InputSnapshot::default()
        },
        0.0,
    );
    app.frame(
        &InputSnapshot {
            mouse: at,
            mouse_down: true,
            ..InputSnapshot::default()
        },
        0.0,
    );
}

// ── Recording canvas ──────────────────────────────────────────────────────────

#[derive(Default)]
struct Recorder {
    sprites: Vec<Sprite>,
    texts: Vec<String>,
    buttons: Vec<(String, bool)>,
    presented: usize,
}

impl Canvas for Recorder {
    fn clear(&mut self, _view: Viewport) {
        self.sprites.clear();
        self.texts.clear();
        self.buttons.clear();
    }

    fn draw_sprite(&mut self, sprite: Sprite, _mask: &Mask, _center: Vec2, _angle: f32) {
        self.sprites.push(sprite);
    }

    fn draw_text(&mut self, text: &str, _pos: Vec2, _align: Align) {
        self.texts.push(text.to_string());
    }

    fn draw_button(&mut self, label: &str, _rect: Rect, hovered: bool) {
        self.buttons.push((label.to_string(), hovered));
    }

    fn present(&mut self) -> std::io::Result<()> {
        self.presented += 1;
        Ok(())
    }
}

// ── Navigation ────────────────────────────────────────────────────────────────

#[test]
fn starts_on_main_menu() {
    let a = app();
    assert_eq!(a.screen(), Screen::MainMenu);
    assert!(a.is_running());
    assert!(a.session().is_none());
    assert_eq!(
        a.window(),
        WindowState {
            width: 800,
            height: 600,
            fullscreen: false
        }
    );
}

#[test]
fn clicking_start_game_begins_a_session() {
    let mut a = app();
    click(&mut a, Vec2::new(400.0, 240.0));
    assert_eq!(a.screen(), Screen::Game);
    assert_eq!(a.session().map(|s| s.score), Some(0));
}

#[test]
fn clicking_empty_space_does_nothing() {
    let mut a = app();
    click(&mut a, Vec2::new(10.0, 590.0));
    assert_eq!(a.screen(), Screen::MainMenu);
}

#[test]
fn menu_button_in_game_returns_to_menu() {
    let mut a = app();
    a.start_game();
    click(&mut a, Vec2::new(16.0, 60.0));
    assert_eq!(a.screen(), Screen::MainMenu);
    assert!(a.session().is_none());
}

#[test]
fn keyboard_navigation() {
    let mut a = app();
    press(&mut a, Keys::CONFIRM);
    assert_eq!(a.screen(), Screen::Game);

    press(&mut a, Keys::MENU);
    assert_eq!(a.screen(), Screen::MainMenu);

    press(&mut a, Keys::SETTINGS | Keys::BRAKE);
    assert_eq!(a.screen(), Screen::Settings);

    press(&mut a, Keys::BACK);
    assert_eq!(a.screen(), Screen::MainMenu);

    press(&mut a, Keys::QUIT);
    assert!(!a.is_running());
}

#[test]
fn quit_from_game() {
    let mut a = app();
    a.start_game();
    press(&mut a, Keys::QUIT);
    assert!(!a.is_running());
}

// ── Settings ──────────────────────────────────────────────────────────────────

#[test]
fn settings_change_resolution_and_fullscreen() {
    let mut a = app();
    a.open_settings();

    press(&mut a, Keys::PRESET_2);
    assert_eq!((a.window().width, a.window().height), (1024, 768));

    press(&mut a, Keys::FULLSCREEN);
    assert!(a.window().fullscreen);

    // 1920x1080 button at (0.5, 0.6) of the new 1024x768 window
    click(&mut a, Vec2::new(512.0, 0.6 * 768.0));
    assert_eq!((a.window().width, a.window().height), (1920, 1080));
}

#[test]
fn resolution_is_never_zero() {
    let mut a = app();
    a.set_resolution(0, 0);
    assert_eq!((a.window().width, a.window().height), (1, 1));
}

#[test]
fn toggle_fullscreen_flips() {
    let mut a = app();
    a.toggle_fullscreen();
    assert!(a.window().fullscreen);
    a.toggle_fullscreen();
    assert!(!a.window().fullscreen);
}

// ── Game screen ───────────────────────────────────────────────────────────────

#[test]
fn restart_resets_the_session() {
    let mut a = app();
    a.start_game();
    if let Some(s) = a.session_mut() {
        s.score = 500;
        s.enter_game_over();
    }
    press(&mut a, Keys::RESTART);
    assert_eq!(a.screen(), Screen::Game);
    let s = a.session().expect("session after restart");
    assert_eq!(s.score, 0);
    assert!(!s.is_over());
}

#[test]
fn game_frames_drive_the_ship() {
    let mut a = app();
    a.start_game();
    a.frame(
        &InputSnapshot {
            keys: Keys::THRUST,
            ..InputSnapshot::default()
        },
        0.1,
    );
    let s = a.session().expect("playing");
    assert!(s.player.body.vel.y < 0.0);
}

// ── Drawing ───────────────────────────────────────────────────────────────────

#[test]
fn main_menu_draws_title_and_buttons() {
    let a = app();
    let mut canvas = Recorder::default();
    a.draw(&mut canvas).unwrap();
    assert_eq!(canvas.presented, 1);
    assert!(canvas.texts.iter().any(|t| t == "ASTEROIDS"));
    let labels: Vec<&str> = canvas.buttons.iter().map(|(l, _)| l.as_str()).collect();
    assert_eq!(labels, ["Start Game", "Settings", "Quit Game"]);
}

#[test]
fn hovered_button_is_highlighted() {
    let mut a = app();
    a.frame(
        &InputSnapshot {
            mouse: Vec2::new(400.0, 300.0),
            ..InputSnapshot::default()
        },
        0.0,
    );
    let mut canvas = Recorder::default();
    a.draw(&mut canvas).unwrap();
    assert_eq!(canvas.buttons[1], ("Settings".to_string(), true));
    assert!(!canvas.buttons[0].1);
}

#[test]
fn game_screen_draws_ship_score_and_game_over() {
    let mut a = app();
    a.start_game();
    let mut canvas = Recorder::default();
    a.draw(&mut canvas).unwrap();
    assert!(canvas.sprites.contains(&Sprite::Ship));
    assert!(canvas.texts.iter().any(|t| t == "0"));
    assert!(!canvas.texts.iter().any(|t| t.starts_with("GAME OVER")));

    if let Some(s) = a.session_mut() {
        s.enter_game_over();
    }
    a.draw(&mut canvas).unwrap();
    assert!(canvas.texts.iter().any(|t| t.starts_with("GAME OVER")));
    assert_eq!(canvas.buttons, vec![("M".to_string(), false)]);
}
