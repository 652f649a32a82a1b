//! Game controller - the effect layer around [`GameState`]
//!
//! The controller owns the random source, the persistence collaborator and the
//! resolution countdown used by fixed-timestep hosts. Everything that decides
//! game outcomes stays in [`GameState`]; this layer only schedules and
//! persists.
//!
//! Two ways to drive it:
//!
//! - **Fixed timestep**: call [`GameController::tick`] every frame. It advances
//!   the clock and resolves the pending pair once it has been face-up for
//!   [`RESOLVE_DELAY_MS`].
//! - **Host-scheduled**: keep the [`ResolveTicket`] from
//!   [`GameController::select_tile`], arm your own timer, then call
//!   [`GameController::resolve`]. Feed the clock with
//!   [`GameController::advance_clock`].

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, instrument, warn};

use crate::board::Board;
use crate::deck::{shuffled_deck, GameConfig};
use crate::error::ConfigurationError;
use crate::game_state::{GameState, ResolveTicket, Selection, TurnOutcome};
use crate::resolver::TurnPhase;
use crate::snapshot::GameSnapshot;
use crate::store::{SessionStats, SessionStore};
use crate::types::{GameAction, TileId, RESOLVE_DELAY_MS};

pub struct GameController<S> {
    config: GameConfig,
    store: S,
    rng: StdRng,
    state: GameState,
    /// How long the pending pair has been face-up (fixed-timestep driving only).
    resolve_timer_ms: Option<u32>,
}

impl<S: SessionStore> GameController<S> {
    /// Load persisted stats and start the first session.
    pub fn new(config: GameConfig, store: S, mut rng: StdRng) -> Result<Self, ConfigurationError> {
        let board = shuffled_deck(&config, &mut rng)?;
        let stats = load_stats(&store);
        info!(
            pairs = config.pair_count,
            best_score = stats.best_score,
            total_moves = stats.total_move_count,
            "session store loaded"
        );

        Ok(Self {
            config,
            store,
            rng,
            state: GameState::new(board, stats, 1),
            resolve_timer_ms: None,
        })
    }

    /// Deterministic layouts for a given seed
    pub fn with_seed(config: GameConfig, store: S, seed: u64) -> Result<Self, ConfigurationError> {
        Self::new(config, store, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(config: GameConfig, store: S) -> Result<Self, ConfigurationError> {
        Self::new(config, store, StdRng::from_entropy())
    }

    /// Start a fresh session with a new configuration.
    ///
    /// Score, moves, pending picks and the clock go back to zero. Best score
    /// and total moves are reloaded from the store but never drop below what
    /// this process has already seen.
    #[instrument(level = "debug", skip(self, config), fields(pairs = config.pair_count))]
    pub fn new_game(&mut self, config: GameConfig) -> Result<(), ConfigurationError> {
        let board = shuffled_deck(&config, &mut self.rng)?;
        self.config = config;
        self.start_session(board);
        Ok(())
    }

    /// Start a fresh session on an explicit layout.
    ///
    /// Useful for replays and tests; later resets go back to shuffled decks of
    /// the current configuration.
    pub fn new_game_with_board(&mut self, board: Board) {
        self.start_session(board);
    }

    /// New game with the current configuration
    pub fn reset(&mut self) -> Result<(), ConfigurationError> {
        self.new_game(self.config.clone())
    }

    fn start_session(&mut self, board: Board) {
        let stats = load_stats(&self.store).max(self.state.stats());
        let generation = self.state.generation().wrapping_add(1);
        self.state = GameState::new(board, stats, generation);
        self.resolve_timer_ms = None;
        info!(generation, tiles = self.state.board().len(), "new session");
    }

    /// Pick a tile. A second pick arms the resolution countdown.
    #[instrument(level = "trace", skip(self))]
    pub fn select_tile(&mut self, id: TileId) -> Selection {
        let selection = self.state.select_tile(id);
        if let Selection::SecondRevealed(_) = selection {
            self.resolve_timer_ms = Some(0);
        }
        selection
    }

    /// Commit a pending turn and persist the resulting stats.
    ///
    /// Stale tickets (from before a reset) return `None` and change nothing.
    pub fn resolve(&mut self, ticket: ResolveTicket) -> Option<TurnOutcome> {
        let outcome = self.state.resolve(ticket)?;
        self.resolve_timer_ms = None;
        self.persist(outcome.stats);
        if outcome.won {
            info!(
                score = outcome.score,
                moves = self.state.move_count(),
                secs = self.state.clock().elapsed_secs(),
                "session won"
            );
        }
        Some(outcome)
    }

    /// Fixed-timestep driver: advance the clock and the resolution countdown
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<TurnOutcome> {
        self.state.advance_clock(elapsed_ms);

        let waited = self.resolve_timer_ms?.saturating_add(elapsed_ms);
        if waited < RESOLVE_DELAY_MS {
            self.resolve_timer_ms = Some(waited);
            return None;
        }

        self.resolve_timer_ms = None;
        let ticket = self.state.pending_ticket()?;
        self.resolve(ticket)
    }

    /// Advance only the clock, for hosts that schedule resolution themselves
    pub fn advance_clock(&mut self, elapsed_ms: u32) {
        self.state.advance_clock(elapsed_ms);
    }

    /// Apply a presentation-layer event. Returns whether anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::SelectTile(id) => !matches!(self.select_tile(id), Selection::Ignored),
            GameAction::NewGame => match self.reset() {
                Ok(()) => true,
                Err(err) => {
                    warn!(error = %err, "new game rejected");
                    false
                }
            },
        }
    }

    fn persist(&mut self, stats: SessionStats) {
        if let Err(err) = stats.save(&mut self.store) {
            warn!(error = %err, "failed to persist session stats; keeping them in memory");
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_won(&self) -> bool {
        self.state.is_won()
    }

    pub fn phase(&self) -> TurnPhase {
        self.state.phase()
    }

    pub fn stats(&self) -> SessionStats {
        self.state.stats()
    }

    pub fn generation(&self) -> u32 {
        self.state.generation()
    }

    pub fn pending_ticket(&self) -> Option<ResolveTicket> {
        self.state.pending_ticket()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.state.snapshot_into(out);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }
}

fn load_stats<S: SessionStore + ?Sized>(store: &S) -> SessionStats {
    match SessionStats::load(store) {
        Ok(stats) => stats,
        Err(err) => {
            warn!(error = %err, "failed to load session stats; starting from zero");
            SessionStats::default()
        }
    }
}
