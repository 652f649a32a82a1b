//! Terminal input module.
//!
//! Maps `crossterm` key events onto a cursor over the tile grid and turns
//! selections into [`crate::types::GameAction`]s. It knows nothing about game
//! rules; ineligible selections are filtered by the core.

pub mod cursor;
pub mod map;

pub use memory_match_types as types;

pub use cursor::{Cursor, InputHandler};
pub use map::{handle_key_event, should_quit, Direction, InputCommand};
