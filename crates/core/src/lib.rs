//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the rules and session state machine of the memory
//! game. It has **no dependencies** on rendering, terminals or async runtimes,
//! making it:
//!
//! - **Deterministic**: Same seed produces identical layouts
//! - **Testable**: Persistence is an injected trait, timers are driven by the host
//! - **Portable**: Runs behind a terminal, an async task, or a test harness
//!
//! # Module Structure
//!
//! - [`deck`]: Paired deck generation and Fisher-Yates shuffling
//! - [`board`]: Tiles and the fixed board layout of a session
//! - [`resolver`]: The two-pick turn state machine
//! - [`clock`]: Elapsed-time tracking gated by session activity
//! - [`store`]: Key-value persistence seam for best score and total moves
//! - [`game_state`]: Pure session transitions (scoring, moves, generations)
//! - [`controller`]: Effect layer adding persistence and resolution scheduling
//! - [`snapshot`]: Read-only view handed to presentation layers
//!
//! # Game Rules
//!
//! - **Deck**: 8 pairs, shuffled face-down
//! - **Turn**: reveal two tiles; after a one second delay they are compared
//! - **Match**: both tiles stay face-up for good, +10 points
//! - **Mismatch**: both tiles flip back
//! - **Win**: every tile matched; the clock stops and input is ignored
//!
//! # Example
//!
//! ```
//! use memory_match_core::{GameConfig, GameController, MemoryStore, Selection};
//! use memory_match_core::types::RESOLVE_DELAY_MS;
//!
//! let mut game = GameController::with_seed(GameConfig::default(), MemoryStore::new(), 7)
//!     .unwrap();
//!
//! let first = game.state().board().tiles()[0].id;
//! let second = game.state().board().tiles()[1].id;
//!
//! assert!(matches!(game.select_tile(first), Selection::FirstRevealed(_)));
//! assert!(matches!(game.select_tile(second), Selection::SecondRevealed(_)));
//!
//! // The pair resolves once it has been visible for the full delay.
//! let outcome = game.tick(RESOLVE_DELAY_MS).unwrap();
//! assert_eq!(game.state().move_count(), 1);
//! assert_eq!(game.state().score(), if outcome.matched { 10 } else { 0 });
//! ```

pub mod board;
pub mod clock;
pub mod controller;
pub mod deck;
pub mod error;
pub mod game_state;
pub mod resolver;
pub mod snapshot;
pub mod store;

pub use memory_match_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Tile};
pub use clock::{format_elapsed, SessionClock};
pub use controller::GameController;
pub use deck::{build_deck, shuffle, shuffled_deck, GameConfig};
pub use error::{ConfigurationError, StoreError};
pub use game_state::{GameState, ResolveTicket, Selection, TurnOutcome};
pub use resolver::{Pick, Resolution, TurnPhase, TurnResolver};
pub use snapshot::{GameSnapshot, TileView};
pub use store::{MemoryStore, SessionStats, SessionStore, BEST_SCORE_KEY, TOTAL_MOVE_COUNT_KEY};
