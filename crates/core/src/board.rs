//! Board module - the ordered tile layout of one session
//!
//! Tiles keep their positions for the whole session; only their
//! revealed/matched flags change. Lookups are by [`TileId`], not by position.

use crate::error::ConfigurationError;
use crate::types::{Symbol, TileId, TILES_PER_SYMBOL};

/// One face of a matchable pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub symbol: Symbol,
    /// Face-up, either pending resolution or permanently after a match
    pub is_revealed: bool,
    /// Terminal: a matched tile never flips back
    pub is_matched: bool,
}

impl Tile {
    /// Create a face-down, unmatched tile
    pub fn new(id: TileId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            is_revealed: false,
            is_matched: false,
        }
    }

    /// Whether a pick on this tile can start or complete a turn
    pub fn is_selectable(&self) -> bool {
        !self.is_matched && !self.is_revealed
    }
}

/// Ordered collection of tiles for one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    /// Build a board from an explicit layout.
    ///
    /// Rejects layouts that break the pairing invariants: duplicate ids, a
    /// symbol on anything other than exactly two tiles, or a matched tile
    /// that is face-down.
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self, ConfigurationError> {
        if tiles.is_empty() {
            return Err(ConfigurationError::EmptyBoard);
        }

        for (i, tile) in tiles.iter().enumerate() {
            if tiles[..i].iter().any(|t| t.id == tile.id) {
                return Err(ConfigurationError::DuplicateTileId { id: tile.id });
            }
            if tile.is_matched && !tile.is_revealed {
                return Err(ConfigurationError::HiddenMatchedTile { id: tile.id });
            }
            let count = tiles.iter().filter(|t| t.symbol == tile.symbol).count();
            if count != TILES_PER_SYMBOL {
                return Err(ConfigurationError::UnpairedSymbol {
                    symbol: tile.symbol,
                    count,
                });
            }
        }

        Ok(Self { tiles })
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub(crate) fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.tiles.len() / TILES_PER_SYMBOL
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|t| t.id == id)
    }

    /// Every tile matched: the win condition
    pub fn all_matched(&self) -> bool {
        self.tiles.iter().all(|t| t.is_matched)
    }

    pub fn matched_pairs(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_matched).count() / TILES_PER_SYMBOL
    }

    /// Number of tiles face-up but not yet matched
    pub fn revealed_unmatched(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.is_revealed && !t.is_matched)
            .count()
    }
}
