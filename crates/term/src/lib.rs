//! Terminal "game renderer" module.
//!
//! Renders `GameSnapshot`s into a small framebuffer and flushes it to the
//! terminal with row diffs. No widget toolkit; layout is computed directly in
//! terminal cells.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use memory_match_core as core;
pub use memory_match_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rect, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
