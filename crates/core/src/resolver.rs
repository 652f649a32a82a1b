//! Turn resolver - the two-pick state machine
//!
//! ```text
//!   Idle ──pick──▶ OneSelected ──pick──▶ Resolving ──resolve──▶ Idle
//! ```
//!
//! Only face-down, unmatched tiles can be picked. Everything else, including
//! any pick while a pair is waiting to be resolved, is ignored without
//! touching the board.

use crate::board::Board;
use crate::types::TileId;

/// Where the current turn stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TurnPhase {
    /// Waiting for the first pick
    #[default]
    Idle,
    /// First tile face-up, waiting for the second
    OneSelected,
    /// Both tiles face-up, waiting for the resolution delay to elapse
    Resolving,
}

/// Result of a single pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Ignored,
    First(TileId),
    Second { first: TileId, second: TileId },
}

/// Result of comparing the pending pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub first: TileId,
    pub second: TileId,
    pub matched: bool,
}

/// Pending pick slots of the current turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TurnResolver {
    first: Option<TileId>,
    second: Option<TileId>,
}

impl TurnResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> TurnPhase {
        match (self.first, self.second) {
            (None, _) => TurnPhase::Idle,
            (Some(_), None) => TurnPhase::OneSelected,
            (Some(_), Some(_)) => TurnPhase::Resolving,
        }
    }

    pub fn pending_first(&self) -> Option<TileId> {
        self.first
    }

    pub fn pending_second(&self) -> Option<TileId> {
        self.second
    }

    /// Both pending ids, present only while resolving
    pub fn pending_pair(&self) -> Option<(TileId, TileId)> {
        self.first.zip(self.second)
    }

    /// Pick a tile, flipping it face-up if it is eligible.
    ///
    /// Picking the first tile again is ignored because it is already face-up.
    pub fn select(&mut self, board: &mut Board, id: TileId) -> Pick {
        if self.second.is_some() {
            return Pick::Ignored;
        }

        let Some(tile) = board.get_mut(id) else {
            return Pick::Ignored;
        };
        if !tile.is_selectable() {
            return Pick::Ignored;
        }
        tile.is_revealed = true;

        match self.first {
            None => {
                self.first = Some(id);
                Pick::First(id)
            }
            Some(first) => {
                self.second = Some(id);
                Pick::Second { first, second: id }
            }
        }
    }

    /// Compare the pending pair and commit the result to the board.
    ///
    /// A match marks both tiles matched (they stay face-up); a mismatch flips
    /// both back. Either way the turn returns to idle. Returns `None` when no
    /// pair is pending.
    pub fn resolve(&mut self, board: &mut Board) -> Option<Resolution> {
        let (first, second) = self.pending_pair()?;
        let a = board.get(first)?.symbol;
        let b = board.get(second)?.symbol;
        let matched = a == b;

        for id in [first, second] {
            if let Some(tile) = board.get_mut(id) {
                if matched {
                    tile.is_matched = true;
                } else {
                    tile.is_revealed = false;
                }
            }
        }

        self.clear();
        Some(Resolution {
            first,
            second,
            matched,
        })
    }

    /// Drop any pending picks without touching the board
    pub fn clear(&mut self) {
        self.first = None;
        self.second = None;
    }
}
