//! Deck module - paired tile generation and Fisher-Yates shuffling
//!
//! A deck takes the first `pair_count` symbols of the alphabet and lays down
//! two tiles for each. Pair `i` gets ids `2i` and `2i + 1`, so ids are assigned
//! before the shuffle and stay with their tile afterwards.
//!
//! The random source is always injected. Seeded [`rand::rngs::StdRng`]s give
//! reproducible layouts for tests and benchmarks.

use rand::Rng;

use crate::board::{Board, Tile};
use crate::error::ConfigurationError;
use crate::types::{Symbol, TileId, DEFAULT_SYMBOLS, PAIR_COUNT, TILES_PER_SYMBOL};

/// Board shape of a session: how many pairs, drawn from which alphabet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub pair_count: usize,
    pub symbols: Vec<Symbol>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pair_count: PAIR_COUNT,
            symbols: DEFAULT_SYMBOLS.to_vec(),
        }
    }
}

impl GameConfig {
    pub fn new(pair_count: usize, symbols: impl Into<Vec<Symbol>>) -> Self {
        Self {
            pair_count,
            symbols: symbols.into(),
        }
    }

    pub fn tile_count(&self) -> usize {
        self.pair_count * TILES_PER_SYMBOL
    }

    /// Check the config can produce a deck without building one
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.pair_count == 0 {
            return Err(ConfigurationError::EmptyBoard);
        }
        if self.symbols.len() < self.pair_count {
            return Err(ConfigurationError::AlphabetTooSmall {
                pair_count: self.pair_count,
                alphabet_len: self.symbols.len(),
            });
        }
        let chosen = &self.symbols[..self.pair_count];
        for (i, symbol) in chosen.iter().enumerate() {
            if chosen[..i].contains(symbol) {
                return Err(ConfigurationError::DuplicateSymbol { symbol: *symbol });
            }
        }
        Ok(())
    }
}

/// Build an unshuffled deck: `[s0, s0, s1, s1, ...]`, all face-down.
///
/// # Examples
///
/// ```
/// use memory_match_core::build_deck;
///
/// let board = build_deck(2, &['A', 'B', 'C']).unwrap();
/// assert_eq!(board.len(), 4);
/// assert!(build_deck(4, &['A', 'B', 'C']).is_err());
/// ```
pub fn build_deck(pair_count: usize, alphabet: &[Symbol]) -> Result<Board, ConfigurationError> {
    let config = GameConfig::new(pair_count, alphabet);
    config.validate()?;

    let tiles = config.symbols[..pair_count]
        .iter()
        .enumerate()
        .flat_map(|(i, &symbol)| {
            let base = (i * TILES_PER_SYMBOL) as TileId;
            [Tile::new(base, symbol), Tile::new(base + 1, symbol)]
        })
        .collect();

    Board::from_tiles(tiles)
}

/// Shuffle a slice in place using Fisher-Yates.
///
/// Walks from the last index down to 1 and swaps each element with one drawn
/// uniformly from `0..=i`. `gen_range` rejects out-of-zone samples, so every
/// permutation is equally likely for a fair source.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Build and shuffle the deck for a session
pub fn shuffled_deck<R: Rng + ?Sized>(
    config: &GameConfig,
    rng: &mut R,
) -> Result<Board, ConfigurationError> {
    let mut board = build_deck(config.pair_count, &config.symbols)?;
    shuffle(board.tiles_mut(), rng);
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_build_deck_pairs_every_symbol() {
        for pair_count in 1..=PAIR_COUNT {
            let board = build_deck(pair_count, &DEFAULT_SYMBOLS).unwrap();
            assert_eq!(board.len(), 2 * pair_count);

            for symbol in &DEFAULT_SYMBOLS[..pair_count] {
                let count = board.tiles().iter().filter(|t| t.symbol == *symbol).count();
                assert_eq!(count, 2, "symbol {symbol} should appear twice");
            }

            let mut ids: Vec<_> = board.tiles().iter().map(|t| t.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), board.len(), "ids must be unique");

            assert!(board
                .tiles()
                .iter()
                .all(|t| !t.is_revealed && !t.is_matched));
        }
    }

    #[test]
    fn test_build_deck_layout_is_unshuffled() {
        let board = build_deck(2, &['A', 'B']).unwrap();
        let layout: Vec<_> = board.tiles().iter().map(|t| (t.id, t.symbol)).collect();
        assert_eq!(layout, vec![(0, 'A'), (1, 'A'), (2, 'B'), (3, 'B')]);
    }

    #[test]
    fn test_build_deck_alphabet_too_small() {
        assert_eq!(
            build_deck(3, &['A', 'B']).unwrap_err(),
            ConfigurationError::AlphabetTooSmall {
                pair_count: 3,
                alphabet_len: 2
            }
        );
    }

    #[test]
    fn test_build_deck_zero_pairs() {
        assert_eq!(
            build_deck(0, &['A']).unwrap_err(),
            ConfigurationError::EmptyBoard
        );
    }

    #[test]
    fn test_build_deck_duplicate_symbol() {
        assert_eq!(
            build_deck(2, &['A', 'A', 'B']).unwrap_err(),
            ConfigurationError::DuplicateSymbol { symbol: 'A' }
        );
        // Only the symbols actually drawn have to be distinct.
        assert!(build_deck(2, &['A', 'B', 'A']).is_ok());
    }

    #[test]
    fn test_shuffle_deterministic() {
        let mut a: Vec<u32> = (0..16).collect();
        let mut b = a.clone();
        shuffle(&mut a, &mut StdRng::seed_from_u64(12345));
        shuffle(&mut b, &mut StdRng::seed_from_u64(12345));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let mut items: Vec<u32> = (0..16).collect();
            shuffle(&mut items, &mut rng);
            let mut sorted = items.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..16).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_shuffle_trivial_slices() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: [u8; 0] = [];
        shuffle(&mut empty, &mut rng);
        let mut one = [9u8];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, [9]);
    }

    #[test]
    fn test_shuffle_position_distribution_is_uniform() {
        const N: usize = 4;
        const TRIALS: usize = 40_000;
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let mut counts = [[0usize; N]; N];

        for _ in 0..TRIALS {
            let mut items = [0usize, 1, 2, 3];
            shuffle(&mut items, &mut rng);
            for (pos, &value) in items.iter().enumerate() {
                counts[pos][value] += 1;
            }
        }

        // Expected 10_000 per cell; std-dev is ~87, so ±500 is > 5 sigma.
        let expected = TRIALS / N;
        for row in counts.iter() {
            for &c in row.iter() {
                assert!(
                    c.abs_diff(expected) < 500,
                    "cell count {c} too far from {expected}: {counts:?}"
                );
            }
        }
    }

    #[test]
    fn test_shuffled_deck_keeps_ids_with_symbols() {
        let config = GameConfig::default();
        let board = shuffled_deck(&config, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(board.len(), config.tile_count());
        for tile in board.tiles() {
            let pair = (tile.id as usize) / TILES_PER_SYMBOL;
            assert_eq!(tile.symbol, DEFAULT_SYMBOLS[pair]);
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
        assert_eq!(GameConfig::default().tile_count(), 16);
    }
}
