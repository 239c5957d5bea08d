mod display;

use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseButton, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::Rng;

use asteroid_shooter::input::{InputSnapshot, Keys};
use asteroid_shooter::{App, GameConfig};

use display::{Layout, TerminalCanvas};

/// Longest step the simulation takes in one frame; a stall (window drag,
/// debugger) shouldn't teleport everything.
const MAX_FRAME_DT: f32 = 0.25;

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this window. Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so the window is refreshed before expiry.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

fn bindings(code: KeyCode) -> Keys {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Keys::THRUST,
        KeyCode::Down => Keys::BRAKE,
        KeyCode::Char('s') | KeyCode::Char('S') => Keys::BRAKE | Keys::SETTINGS,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Keys::LEFT,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Keys::RIGHT,
        KeyCode::Char(' ') => Keys::FIRE,
        KeyCode::Char('r') | KeyCode::Char('R') => Keys::RESTART,
        KeyCode::Char('m') | KeyCode::Char('M') => Keys::MENU,
        KeyCode::Enter => Keys::CONFIRM,
        KeyCode::Char('f') | KeyCode::Char('F') => Keys::FULLSCREEN,
        KeyCode::Esc => Keys::BACK,
        KeyCode::Char('q') | KeyCode::Char('Q') => Keys::QUIT,
        KeyCode::Char('1') => Keys::PRESET_1,
        KeyCode::Char('2') => Keys::PRESET_2,
        KeyCode::Char('3') => Keys::PRESET_3,
        KeyCode::Char('4') => Keys::PRESET_4,
        KeyCode::Char('5') => Keys::PRESET_5,
        _ => Keys::empty(),
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Folds terminal events into one [`InputSnapshot`] per frame.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events, so keys drop on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`). Keys expire after `HOLD_WINDOW` of silence.
#[derive(Default)]
struct TerminalInput {
    /// Each held key and when it was last seen (press or repeat).
    last_seen: HashMap<KeyCode, Instant>,
    mouse_cell: (u16, u16),
    mouse_held: bool,
    /// A press seen this frame, reported even if the release came with it.
    click_pending: bool,
    interrupted: bool,
}

impl TerminalInput {
    /// Drain every pending event without blocking.
    fn poll(&mut self) -> std::io::Result<()> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.on_key(key),
                Event::Mouse(mouse) => self.on_mouse(mouse),
                _ => {}
            }
        }
        Ok(())
    }

    fn on_key(&mut self, KeyEvent { code, kind, modifiers, .. }: KeyEvent) {
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                    self.interrupted = true;
                    return;
                }
                self.last_seen.insert(code, Instant::now());
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&code);
            }
        }
    }

    fn on_mouse(&mut self, MouseEvent { kind, column, row, .. }: MouseEvent) {
        self.mouse_cell = (column, row);
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.mouse_held = true;
                self.click_pending = true;
            }
            MouseEventKind::Up(MouseButton::Left) => self.mouse_held = false,
            _ => {}
        }
    }

    fn snapshot(&mut self, layout: &Layout) -> InputSnapshot {
        let now = Instant::now();
        self.last_seen
            .retain(|_, seen| now.duration_since(*seen) <= HOLD_WINDOW);
        let keys = self
            .last_seen
            .keys()
            .fold(Keys::empty(), |acc, code| acc | bindings(*code));

        let mouse_down = self.mouse_held || self.click_pending;
        self.click_pending = false;

        InputSnapshot {
            keys,
            mouse: layout.to_logical(self.mouse_cell.0, self.mouse_cell.1),
            mouse_down,
        }
    }
}

// ── Logging / config ──────────────────────────────────────────────────────────

/// Raw mode owns stdout and stderr, so the log goes to a file.
fn init_logging(path: &Path) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

/// First command-line argument, if any. Without one, the config layer looks
/// for its default file itself.
fn config_path(mut args: impl Iterator<Item = OsString>) -> Option<PathBuf> {
    args.nth(1).map(PathBuf::from)
}

// ── Frame loop ────────────────────────────────────────────────────────────────

fn run<W: Write>(out: &mut W, app: &mut App) -> std::io::Result<()> {
    let frame_budget = Duration::from_secs_f32(1.0 / app.config().display.fps.max(1) as f32);
    let mut input = TerminalInput::default();
    let mut last = Instant::now();

    while app.is_running() {
        let frame_start = Instant::now();
        let dt = frame_start.duration_since(last).as_secs_f32().min(MAX_FRAME_DT);
        last = frame_start;

        let (cols, rows) = terminal::size()?;
        let layout = Layout::new(cols, rows, app.window());

        input.poll()?;
        if input.interrupted {
            app.quit();
            break;
        }
        let snapshot = input.snapshot(&layout);
        app.frame(&snapshot, dt);

        // Settings may have changed the window this frame
        let layout = Layout::new(cols, rows, app.window());
        let mut canvas = TerminalCanvas::new(out, layout);
        app.draw(&mut canvas)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            std::thread::sleep(frame_budget - elapsed);
        }
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn Error>> {
    let log_path = std::env::temp_dir().join("asteroid_shooter.log");
    if let Err(e) = init_logging(&log_path) {
        eprintln!("logging disabled ({}): {e}", log_path.display());
    }

    let config = GameConfig::load_or_default(config_path(std::env::args_os()).as_deref())?;
    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    log::info!("Starting with seed {seed}");
    let mut app = App::new(config, seed);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = run(&mut out, &mut app);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Some(session) = app.session() {
        log::info!("Exiting with score {}", session.score);
    }
    result?;
    Ok(())
}
