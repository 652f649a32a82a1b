//! Error types for deck construction and session persistence.
//!
//! Player misuse (clicking a matched or face-up tile, clicking during
//! resolution) is deliberately absent here: those selections are no-ops.

use derive_more::{Display, Error};

use crate::types::{Symbol, TileId};

/// Invalid board configuration, raised when a deck is built.
///
/// Fatal to starting a session; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ConfigurationError {
    #[display("a board needs at least one pair")]
    EmptyBoard,

    #[display("{pair_count} pairs requested but the alphabet only has {alphabet_len} symbols")]
    AlphabetTooSmall {
        pair_count: usize,
        alphabet_len: usize,
    },

    #[display("symbol {symbol:?} is repeated in the alphabet")]
    DuplicateSymbol { symbol: Symbol },

    #[display("tile id {id} appears more than once")]
    DuplicateTileId { id: TileId },

    #[display("symbol {symbol:?} appears on {count} tiles instead of 2")]
    UnpairedSymbol { symbol: Symbol, count: usize },

    #[display("tile {id} is matched but face-down")]
    HiddenMatchedTile { id: TileId },
}

/// Failure of the key-value store behind best score and total moves.
///
/// Gameplay never stops because of one of these; the controller logs it and
/// keeps tracking stats in memory.
#[derive(Debug, Display, Error)]
pub enum StoreError {
    #[display("store I/O failed: {_0}")]
    Io(std::io::Error),

    #[display("store encoding failed: {message}")]
    Encoding { message: String },

    #[display("store unavailable")]
    Unavailable,
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err)
    }
}
