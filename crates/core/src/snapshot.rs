use crate::board::Tile;
use crate::clock::format_elapsed;
use crate::resolver::TurnPhase;
use crate::types::{Symbol, TileId};

/// What the presentation layer may know about a tile.
///
/// `symbol` is withheld while the tile is face-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileView {
    pub id: TileId,
    pub symbol: Option<Symbol>,
    pub revealed: bool,
    pub matched: bool,
}

impl From<Tile> for TileView {
    fn from(value: Tile) -> Self {
        let revealed = value.is_revealed || value.is_matched;
        Self {
            id: value.id,
            symbol: revealed.then_some(value.symbol),
            revealed,
            matched: value.is_matched,
        }
    }
}

/// Read-only view of a session, produced after every transition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    pub tiles: Vec<TileView>,
    pub score: u32,
    pub best_score: u32,
    pub move_count: u32,
    pub total_move_count: u32,
    pub elapsed_secs: u64,
    pub clock_running: bool,
    pub phase: TurnPhase,
    pub won: bool,
    pub generation: u32,
}

impl GameSnapshot {
    /// Elapsed time as `mm:ss`
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed_secs)
    }

    /// Whether a pick could currently be accepted
    pub fn playable(&self) -> bool {
        !self.won && self.phase != TurnPhase::Resolving
    }

    pub fn tile(&self, id: TileId) -> Option<&TileView> {
        self.tiles.iter().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_down_tile_hides_symbol() {
        let view = TileView::from(Tile::new(3, 'A'));
        assert_eq!(view.symbol, None);
        assert!(!view.revealed);
    }

    #[test]
    fn face_up_tile_shows_symbol() {
        let mut tile = Tile::new(3, 'A');
        tile.is_revealed = true;
        assert_eq!(TileView::from(tile).symbol, Some('A'));

        tile.is_matched = true;
        let view = TileView::from(tile);
        assert!(view.matched && view.revealed);
        assert_eq!(view.symbol, Some('A'));
    }

    #[test]
    fn playable_reflects_phase_and_win() {
        let mut snap = GameSnapshot::default();
        assert!(snap.playable());
        snap.phase = TurnPhase::Resolving;
        assert!(!snap.playable());
        snap.phase = TurnPhase::Idle;
        snap.won = true;
        assert!(!snap.playable());
    }
}
