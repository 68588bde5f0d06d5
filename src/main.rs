use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};

use invaders::display::TerminalView;
use invaders::input::{InputState, KEY_FIRE, KEY_LEFT, KEY_RIGHT};
use invaders::timer::{Clock, MonotonicClock};
use invaders::{GameConfig, Result, Session};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

/// Without key-release reporting, a key counts as held while its last
/// press/repeat arrived within this window.  OS key-repeat runs at ≥ 15 Hz,
/// so an actively repeating key never expires.
const HOLD_WINDOW: Duration = Duration::from_millis(135);

#[derive(Parser, Debug)]
#[command(name = "invaders", version, about = "Fixed-formation arcade shooter for the terminal")]
struct Cli {
    /// JSON file overriding the default game constants
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write log records to this file; logging is disabled without it
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Key tracking ──────────────────────────────────────────────────────────────

fn key_name(code: KeyCode) -> Option<&'static str> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(KEY_LEFT),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(KEY_RIGHT),
        KeyCode::Char(' ') => Some(KEY_FIRE),
        _ => None,
    }
}

/// Turns raw terminal key events into key-down / key-up on `InputState`.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys go up on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys are released after `HOLD_WINDOW` of silence.
#[derive(Default)]
struct HeldKeys {
    last_seen: HashMap<&'static str, Instant>,
    releases_reported: bool,
}

impl HeldKeys {
    fn observe(&mut self, code: KeyCode, kind: KeyEventKind, at: Instant, input: &mut InputState) {
        let Some(name) = key_name(code) else {
            return;
        };
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(name, at);
                input.key_down(name);
            }
            KeyEventKind::Release => {
                self.releases_reported = true;
                self.last_seen.remove(name);
                input.key_up(name);
            }
        }
    }

    fn expire(&mut self, now: Instant, input: &mut InputState) {
        if self.releases_reported {
            return;
        }
        self.last_seen.retain(|name, last| {
            let live = now.duration_since(*last) <= HOLD_WINDOW;
            if !live {
                input.key_up(name);
            }
            live
        });
    }

    fn clear(&mut self, input: &mut InputState) {
        self.last_seen.clear();
        input.clear();
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

fn game_loop<W: Write>(
    view: &mut TerminalView<W>,
    session: &mut Session,
    clock: &MonotonicClock,
    rx: &mpsc::Receiver<Event>,
) -> Result<()> {
    let mut input = InputState::new();
    let mut keys = HeldKeys::default();
    // Mirrors the session: once a frame reports the game is over, stop
    // stepping and keep presenting the overlay until restart or quit.
    let mut frames_running = true;

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => {
                    if kind == KeyEventKind::Press {
                        match code {
                            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                                return Ok(());
                            }
                            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                                return Ok(());
                            }
                            KeyCode::Char('r') | KeyCode::Char('R') if !session.is_running() => {
                                session.reset(clock.now(), view);
                                keys.clear(&mut input);
                                frames_running = true;
                                continue;
                            }
                            _ => {}
                        }
                    }
                    keys.observe(code, kind, frame_start, &mut input);
                }
                Event::Resize(cols, rows) => view.resize(cols, rows),
                _ => {}
            }
        }
        keys.expire(frame_start, &mut input);

        session.pump(clock, view);
        if frames_running {
            frames_running = session.frame(&input, view);
        }
        view.present()?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Logging goes to `--log-file` or nowhere.  Stderr shares the alternate
/// screen, so without a file no logger is installed and `RUST_LOG` is ignored.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, config, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("Exiting after error: {err}");
    }
    result
}

fn run<W: Write>(out: &mut W, config: GameConfig, rx: &mpsc::Receiver<Event>) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut view = TerminalView::new(out, config.canvas.width, config.canvas.height, cols, rows);
    let clock = MonotonicClock::new();
    let mut session = Session::new(config, clock.now());
    game_loop(&mut view, &mut session, &clock, rx)
}
