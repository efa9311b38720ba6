mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    terminal,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use balloon_archer::compute::{apply_action, init_state, tick};
use balloon_archer::config::GameConfig;
use balloon_archer::entities::{Action, GameState};
use balloon_archer::input::event_action;
use balloon_archer::render::compose_frame;

// ── Logging ───────────────────────────────────────────────────────────────────

/// Send tracing output to the configured file.  Stdout belongs to the game
/// screen, so with no file configured nothing is installed.
fn init_logging(config: &GameConfig) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("Invalid log level {:?}", config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Terminal guard ────────────────────────────────────────────────────────────

/// Leaves the alternate screen and raw mode when dropped, including on an
/// early `?` return during startup.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = display::restore(&mut stdout());
        let _ = terminal::disable_raw_mode();
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Fixed-rate scheduler: wait for input until the next tick deadline, apply
/// whatever arrived, tick when the deadline passes, and repaint.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
    tick_rate: Duration,
) -> std::io::Result<()> {
    let mut next_tick = Instant::now() + tick_rate;

    display::clear(out)?;
    display::paint(out, &compose_frame(state))?;

    loop {
        let timeout = next_tick.saturating_duration_since(Instant::now());
        match rx.recv_timeout(timeout) {
            Ok(event) => {
                match event_action(&event) {
                    Some(Action::Quit) => {
                        info!(reason = "key", "shutdown_requested");
                        return Ok(());
                    }
                    Some(action) => *state = apply_action(state, action),
                    None => {}
                }
                if let Event::Resize(..) = event {
                    display::clear(out)?;
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                warn!("input reader stopped");
                return Ok(());
            }
        }

        let now = Instant::now();
        if now >= next_tick {
            *state = tick(state, rng);
            next_tick += tick_rate;
            if now >= next_tick {
                // Fell a whole period behind; resync instead of bursting.
                warn!(frame = state.frame, "tick overrun");
                next_tick = now + tick_rate;
            }
        }

        display::paint(out, &compose_frame(state))?;
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = GameConfig::load().context("Failed to load configuration")?;
    init_logging(&config)?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode().context("Failed to enable raw mode")?;
    // From here on the terminal is restored on every exit path.
    let _guard = TerminalGuard;
    display::enter(&mut out).context("Failed to enter alternate screen")?;

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

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut state = init_state(config.spawn_chance);
    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    info!(seed = ?config.seed, tick_rate_ms = config.tick_rate_ms, "game started");

    let result = game_loop(&mut out, &mut state, &mut rng, &rx, tick_rate);

    drop(_guard);

    info!(score = state.score, frames = state.frame, "game ended");
    result.context("Game loop failed")?;

    println!("Final score: {}", state.score);
    Ok(())
}
