//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, making them usable
//! from the game core, the async runtime, and the terminal front end alike.
//!
//! # Board Dimensions
//!
//! The classic board is 8 pairs laid out as a 4x4 grid:
//!
//! - **Pairs**: 8 (16 tiles)
//! - **Grid columns**: 4
//! - **Pairing arity**: 2 tiles per symbol
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep of the terminal loop (~60 FPS) |
//! | `RESOLVE_DELAY_MS` | 1000 | Both picks stay visible this long before resolution |
//! | `CLOCK_TICK_MS` | 1000 | One session clock unit (one second) |
//!
//! # Examples
//!
//! ```
//! use memory_match_types::{GameAction, DEFAULT_SYMBOLS, PAIR_COUNT};
//!
//! assert_eq!(PAIR_COUNT, 8);
//! assert!(DEFAULT_SYMBOLS.len() >= PAIR_COUNT);
//!
//! let action = GameAction::from_str("select:3").unwrap();
//! assert_eq!(action, GameAction::SelectTile(3));
//! assert_eq!(GameAction::from_str("newGame"), Some(GameAction::NewGame));
//! ```

/// Number of pairs on the classic board
pub const PAIR_COUNT: usize = 8;

/// Tiles per symbol
pub const TILES_PER_SYMBOL: usize = 2;

/// Columns of the board grid (16 tiles => 4x4)
pub const GRID_COLUMNS: u16 = 4;

/// Points awarded for each confirmed pair
pub const MATCH_POINTS: u32 = 10;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// How long a revealed pair stays face-up before it is compared
pub const RESOLVE_DELAY_MS: u32 = 1000;

/// Length of one session clock unit
pub const CLOCK_TICK_MS: u32 = 1000;

/// Stable per-session tile identifier.
///
/// Unique per tile instance, not per symbol.
pub type TileId = u16;

/// Face value shared by two paired tiles. Equality of symbols defines a match.
pub type Symbol = char;

/// Symbol alphabet of the classic board.
///
/// Single-width glyphs so every tile occupies the same number of terminal
/// columns.
pub const DEFAULT_SYMBOLS: [Symbol; 8] = ['★', '☾', '◉', '≈', '✦', '☀', '✿', '♣'];

/// Player intents accepted by a session.
///
/// These are the only two inbound events of the presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Reveal the tile with the given id
    SelectTile(TileId),
    /// Discard the current board and start over
    NewGame,
}

impl GameAction {
    /// Parse an action from its textual form
    ///
    /// Accepts `select:<id>` and `newGame` (case-insensitive, `new` and
    /// `reset` are accepted as aliases).
    ///
    /// # Examples
    ///
    /// ```
    /// use memory_match_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("SELECT:12"), Some(GameAction::SelectTile(12)));
    /// assert_eq!(GameAction::from_str("reset"), Some(GameAction::NewGame));
    /// assert_eq!(GameAction::from_str("select:x"), None);
    /// assert_eq!(GameAction::from_str("flip"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        if let Some(id) = lower.strip_prefix("select:") {
            return id.parse().ok().map(GameAction::SelectTile);
        }
        match lower.as_str() {
            "newgame" | "new" | "reset" => Some(GameAction::NewGame),
            _ => None,
        }
    }

    /// Short name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::SelectTile(_) => "selectTile",
            GameAction::NewGame => "newGame",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_board_defaults() {
        assert_eq!(PAIR_COUNT, 8);
        assert_eq!(TILES_PER_SYMBOL, 2);
        assert_eq!(MATCH_POINTS, 10);
        assert_eq!(RESOLVE_DELAY_MS, 1000);
        assert_eq!(CLOCK_TICK_MS, 1000);
        assert_eq!(
            (PAIR_COUNT * TILES_PER_SYMBOL) as u16 % GRID_COLUMNS,
            0,
            "grid must be rectangular"
        );
    }

    #[test]
    fn default_symbols_are_distinct() {
        for (i, a) in DEFAULT_SYMBOLS.iter().enumerate() {
            for b in DEFAULT_SYMBOLS.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn action_names() {
        assert_eq!(GameAction::SelectTile(0).as_str(), "selectTile");
        assert_eq!(GameAction::NewGame.as_str(), "newGame");
    }
}
