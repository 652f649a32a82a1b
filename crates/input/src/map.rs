//! Key mapping from terminal events to input commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Cursor direction on the tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Move(Direction),
    /// Flip the tile under the cursor
    Select,
    NewGame,
}

/// Map keyboard input to input commands.
pub fn handle_key_event(key: KeyEvent) -> Option<InputCommand> {
    match key.code {
        // Cursor
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(InputCommand::Move(Direction::Left)),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(InputCommand::Move(Direction::Right)),
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(InputCommand::Move(Direction::Up)),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(InputCommand::Move(Direction::Down)),

        // Actions
        KeyCode::Enter | KeyCode::Char(' ') => Some(InputCommand::Select),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('r') | KeyCode::Char('R') => {
            Some(InputCommand::NewGame)
        }

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
