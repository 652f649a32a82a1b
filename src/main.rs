//! Terminal memory game runner (default binary).
//!
//! Frame loop: poll crossterm input for up to `TICK_MS`, apply actions to the
//! controller, then advance it by the wall-clock time the frame actually took.
//! Logs go to a file because the terminal is in raw mode.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use memory_match::core::{GameConfig, GameController, GameSnapshot, SessionStore};
use memory_match::input::{should_quit, InputHandler};
use memory_match::store::StoreConfig;
use memory_match::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use memory_match::types::{GameAction, TileId, TICK_MS};

/// Process-level settings read from the environment.
#[derive(Debug, Clone)]
struct LaunchConfig {
    log_path: PathBuf,
    seed: Option<u64>,
    store: StoreConfig,
}

impl LaunchConfig {
    fn from_env() -> Self {
        use std::env;

        let log_path = env::var("MEMORY_MATCH_LOG_PATH").ok();
        let seed = env::var("MEMORY_MATCH_SEED").ok();
        let launch = Self::from_vars(log_path.as_deref(), seed.as_deref(), StoreConfig::from_env());
        if let (Some(raw), None) = (&seed, launch.seed) {
            eprintln!("ignoring MEMORY_MATCH_SEED={raw:?}: not an unsigned integer");
        }
        launch
    }

    fn from_vars(log_path: Option<&str>, seed: Option<&str>, store: StoreConfig) -> Self {
        let log_path = log_path
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("memory-match.log"));
        let seed = seed.and_then(|raw| raw.trim().parse::<u64>().ok());
        Self {
            log_path,
            seed,
            store,
        }
    }
}

/// Turns wall-clock frames into whole-millisecond ticks.
///
/// Only whole milliseconds are consumed; the remainder stays on the clock for
/// the next frame, so slow or uneven frames never lose session time.
#[derive(Debug, Clone, Copy)]
struct FrameClock {
    last: Instant,
    step: Duration,
}

impl FrameClock {
    fn new(now: Instant, step: Duration) -> Self {
        Self { last: now, step }
    }

    /// How long input may be polled before the next tick is due
    fn until_due(&self, now: Instant) -> Duration {
        self.step.saturating_sub(now.saturating_duration_since(self.last))
    }

    /// Elapsed milliseconds since the last tick, if a tick is due.
    fn take_due(&mut self, now: Instant) -> Option<u32> {
        let elapsed = now.saturating_duration_since(self.last);
        if elapsed < self.step {
            return None;
        }
        let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
        self.last += Duration::from_millis(u64::from(ms));
        Some(ms)
    }
}

/// Whether a key action should reach the controller for this frame's snapshot.
fn accepts(snapshot: &GameSnapshot, action: GameAction) -> bool {
    match action {
        GameAction::SelectTile(_) => snapshot.playable(),
        GameAction::NewGame => true,
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn main() -> Result<()> {
    let launch = LaunchConfig::from_env();
    init_logging(&launch.log_path)?;

    let store = launch.store.open();
    let config = GameConfig::default();
    let controller = match launch.seed {
        Some(seed) => GameController::with_seed(config, store, seed)?,
        None => GameController::from_entropy(config, store)?,
    };
    info!(seed = ?launch.seed, store = %launch.store.path.display(), "starting memory match");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, controller);

    // Always try to restore terminal state.
    if let Err(err) = term.exit() {
        warn!(error = %err, "failed to restore terminal");
    }
    result
}

fn run(
    term: &mut TerminalRenderer,
    mut game: GameController<Box<dyn SessionStore + Send>>,
) -> Result<()> {
    let view = GameView::default();
    let mut input = InputHandler::new(game.state().board().len());
    let mut snapshot = game.snapshot();
    let mut layout: Vec<TileId> = Vec::with_capacity(snapshot.tiles.len());
    let mut fb = FrameBuffer::new(0, 0);

    let mut frames = FrameClock::new(Instant::now(), Duration::from_millis(TICK_MS as u64));

    loop {
        game.snapshot_into(&mut snapshot);
        layout.clear();
        layout.extend(snapshot.tiles.iter().map(|t| t.id));

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snapshot, Some(input.cursor().index()), Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        if event::poll(frames.until_due(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    match input.handle_key(key, &layout) {
                        Some(action) if accepts(&snapshot, action) => {
                            game.apply_action(action);
                        }
                        Some(action) => debug!(action = action.as_str(), "input ignored"),
                        None => {}
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        if let Some(elapsed_ms) = frames.take_due(Instant::now()) {
            game.tick(elapsed_ms);
        }
    }
}
