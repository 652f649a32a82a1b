//! Grid cursor and the handler that turns key presses into game actions.

use crossterm::event::KeyEvent;

use crate::map::{handle_key_event, Direction, InputCommand};
use crate::types::{GameAction, TileId, GRID_COLUMNS};

/// Position on a row-major tile grid.
///
/// Movement stops at the edges; it never wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    columns: usize,
    len: usize,
}

impl Cursor {
    pub fn new(columns: usize, len: usize) -> Self {
        Self {
            index: 0,
            columns: columns.max(1),
            len,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn row(&self) -> usize {
        self.index / self.columns
    }

    pub fn col(&self) -> usize {
        self.index % self.columns
    }

    /// Adapt to a board of a different size, clamping the position.
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        if self.index >= len {
            self.index = len.saturating_sub(1);
        }
    }

    pub fn step(&mut self, dir: Direction) {
        if self.len == 0 {
            return;
        }
        let next = match dir {
            Direction::Left if self.col() > 0 => self.index - 1,
            Direction::Right if self.col() + 1 < self.columns => self.index + 1,
            Direction::Up if self.index >= self.columns => self.index - self.columns,
            Direction::Down => self.index + self.columns,
            _ => self.index,
        };
        if next < self.len {
            self.index = next;
        }
    }
}

/// Tracks the cursor and emits [`GameAction`]s
#[derive(Debug, Clone)]
pub struct InputHandler {
    cursor: Cursor,
}

impl InputHandler {
    pub fn new(tile_count: usize) -> Self {
        Self {
            cursor: Cursor::new(GRID_COLUMNS as usize, tile_count),
        }
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Handle a key press against the current layout (tile ids in board order).
    ///
    /// Cursor moves are absorbed here and return `None`.
    pub fn handle_key(&mut self, key: KeyEvent, layout: &[TileId]) -> Option<GameAction> {
        self.cursor.resize(layout.len());
        match handle_key_event(key)? {
            InputCommand::Move(dir) => {
                self.cursor.step(dir);
                None
            }
            InputCommand::Select => layout
                .get(self.cursor.index())
                .map(|&id| GameAction::SelectTile(id)),
            InputCommand::NewGame => Some(GameAction::NewGame),
        }
    }
}
