//! Game state module - the pure session state machine
//!
//! This module ties together the board, the turn resolver, scoring and the
//! session clock. It performs no I/O and owns no timers: picking a second tile
//! hands out a [`ResolveTicket`], and whoever schedules the resolution delay
//! redeems it later with [`GameState::resolve`].
//!
//! Tickets carry the session generation. A ticket issued before a reset never
//! resolves against the new board.

use tracing::{debug, trace};

use crate::board::Board;
use crate::clock::SessionClock;
use crate::resolver::{Pick, TurnPhase, TurnResolver};
use crate::snapshot::{GameSnapshot, TileView};
use crate::store::SessionStats;
use crate::types::{TileId, MATCH_POINTS};

/// Claim on the pending resolution of one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolveTicket {
    pub generation: u32,
    pub first: TileId,
    pub second: TileId,
}

/// Result of a tile selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Nothing changed
    Ignored,
    /// The first tile of a turn is face-up
    FirstRevealed(TileId),
    /// Both tiles are face-up; resolve the ticket after the delay
    SecondRevealed(ResolveTicket),
}

/// What a resolved turn did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    pub first: TileId,
    pub second: TileId,
    pub matched: bool,
    pub score: u32,
    pub stats: SessionStats,
    pub won: bool,
}

/// Complete state of one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    resolver: TurnResolver,
    score: u32,
    /// Completed turns in this session
    move_count: u32,
    /// Best score and lifetime moves, carried across sessions
    stats: SessionStats,
    clock: SessionClock,
    /// Monotonic session id (increments on every new game).
    generation: u32,
}

impl GameState {
    /// Start a session on the given board
    pub fn new(board: Board, stats: SessionStats, generation: u32) -> Self {
        Self {
            board,
            resolver: TurnResolver::new(),
            score: 0,
            move_count: 0,
            stats,
            clock: SessionClock::new(),
            generation,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.stats.best_score
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn total_move_count(&self) -> u32 {
        self.stats.total_move_count
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn phase(&self) -> TurnPhase {
        self.resolver.phase()
    }

    pub fn pending_first(&self) -> Option<TileId> {
        self.resolver.pending_first()
    }

    pub fn pending_second(&self) -> Option<TileId> {
        self.resolver.pending_second()
    }

    /// Every tile matched
    pub fn is_won(&self) -> bool {
        self.board.all_matched()
    }

    /// Ticket for the pair currently waiting to be resolved
    pub fn pending_ticket(&self) -> Option<ResolveTicket> {
        self.resolver
            .pending_pair()
            .map(|(first, second)| ResolveTicket {
                generation: self.generation,
                first,
                second,
            })
    }

    /// Pick a tile.
    ///
    /// Ignored once the session is won, while a pair is resolving, and for
    /// unknown, matched or face-up tiles.
    pub fn select_tile(&mut self, id: TileId) -> Selection {
        if self.is_won() {
            trace!(id, "selection ignored: session won");
            return Selection::Ignored;
        }

        match self.resolver.select(&mut self.board, id) {
            Pick::Ignored => {
                trace!(id, phase = ?self.phase(), "selection ignored");
                Selection::Ignored
            }
            Pick::First(id) => {
                self.clock.start();
                debug!(id, "first tile revealed");
                Selection::FirstRevealed(id)
            }
            Pick::Second { first, second } => {
                self.clock.start();
                self.move_count = self.move_count.saturating_add(1);
                self.stats.total_move_count = self.stats.total_move_count.saturating_add(1);
                debug!(first, second, moves = self.move_count, "second tile revealed");
                Selection::SecondRevealed(ResolveTicket {
                    generation: self.generation,
                    first,
                    second,
                })
            }
        }
    }

    /// Commit the pending turn.
    ///
    /// Returns `None` for stale tickets (issued for another generation or
    /// another pair) and when nothing is pending.
    pub fn resolve(&mut self, ticket: ResolveTicket) -> Option<TurnOutcome> {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping stale resolution"
            );
            return None;
        }
        if self.resolver.pending_pair() != Some((ticket.first, ticket.second)) {
            return None;
        }

        let resolution = self.resolver.resolve(&mut self.board)?;
        if resolution.matched {
            self.score = self.score.saturating_add(MATCH_POINTS);
        }
        self.stats.best_score = self.stats.best_score.max(self.score);

        let won = self.is_won();
        if won {
            self.clock.stop();
        }

        debug!(
            first = resolution.first,
            second = resolution.second,
            matched = resolution.matched,
            score = self.score,
            won,
            "turn resolved"
        );

        Some(TurnOutcome {
            first: resolution.first,
            second: resolution.second,
            matched: resolution.matched,
            score: self.score,
            stats: self.stats,
            won,
        })
    }

    /// Raise the carried stats to at least `stats`
    pub fn absorb_stats(&mut self, stats: SessionStats) {
        self.stats = self.stats.max(stats);
    }

    /// Advance the session clock (no-op until the first pick, and after a win)
    pub fn advance_clock(&mut self, elapsed_ms: u32) {
        self.clock.advance(elapsed_ms);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.tiles.clear();
        out.tiles
            .extend(self.board.tiles().iter().copied().map(TileView::from));
        out.score = self.score;
        out.best_score = self.stats.best_score;
        out.move_count = self.move_count;
        out.total_move_count = self.stats.total_move_count;
        out.elapsed_secs = self.clock.elapsed_secs();
        out.clock_running = self.clock.is_running();
        out.phase = self.phase();
        out.won = self.is_won();
        out.generation = self.generation;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
