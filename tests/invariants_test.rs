//! Randomized play checking the board and counter invariants after every step.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use memory_match::core::{GameConfig, GameController, GameSnapshot, MemoryStore, TurnPhase};
use memory_match::types::{TileId, RESOLVE_DELAY_MS, TICK_MS};

fn check_board(game: &GameController<MemoryStore>) {
    let board = game.state().board();

    // Two tiles per symbol, matched or not.
    for tile in board.tiles() {
        let same = board.tiles().iter().filter(|t| t.symbol == tile.symbol).count();
        assert_eq!(same, 2, "symbol {:?} appears {} times", tile.symbol, same);
        if tile.is_matched {
            assert!(tile.is_revealed, "matched tile {} is face-down", tile.id);
        }
    }

    let face_up_unmatched = board.revealed_unmatched();
    match game.phase() {
        TurnPhase::Idle => assert_eq!(face_up_unmatched, 0),
        TurnPhase::OneSelected => assert_eq!(face_up_unmatched, 1),
        TurnPhase::Resolving => assert_eq!(face_up_unmatched, 2),
    }
}

fn check_monotonic(prev: &GameSnapshot, next: &GameSnapshot) {
    assert!(next.score >= prev.score);
    assert!(next.best_score >= prev.best_score);
    assert!(next.move_count >= prev.move_count);
    assert!(next.total_move_count >= prev.total_move_count);
    assert!(next.elapsed_secs >= prev.elapsed_secs);
    assert!(next.best_score >= next.score);
    for (a, b) in prev.tiles.iter().zip(&next.tiles) {
        if a.matched {
            assert!(b.matched, "tile {} was unmatched", a.id);
        }
    }
}

#[test]
fn random_play_keeps_invariants() {
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game =
            GameController::with_seed(GameConfig::default(), MemoryStore::new(), seed).unwrap();
        let tile_count = game.state().board().len() as TileId;
        let mut prev = game.snapshot();

        for _ in 0..2_000 {
            if game.is_won() {
                break;
            }
            if rng.gen_bool(0.7) {
                game.select_tile(rng.gen_range(0..tile_count));
            } else {
                game.tick(TICK_MS * rng.gen_range(1..40));
            }
            check_board(&game);
            let next = game.snapshot();
            check_monotonic(&prev, &next);
            prev = next;
        }
    }
}

#[test]
fn perfect_memory_player_wins_with_pair_count_moves() {
    let mut game = GameController::with_seed(GameConfig::default(), MemoryStore::new(), 77).unwrap();
    let tiles = game.state().board().tiles().to_vec();

    for tile in &tiles {
        if game.state().board().get(tile.id).is_some_and(|t| t.is_matched) {
            continue;
        }
        let partner = tiles
            .iter()
            .find(|t| t.symbol == tile.symbol && t.id != tile.id)
            .map(|t| t.id)
            .unwrap();
        game.select_tile(tile.id);
        game.select_tile(partner);
        game.tick(RESOLVE_DELAY_MS);
    }

    let snap = game.snapshot();
    assert!(snap.won);
    assert_eq!(snap.move_count, 8);
    assert_eq!(snap.score, 80);
    assert_eq!(snap.best_score, 80);
}

#[test]
fn reset_restores_a_fresh_board_with_same_shape() {
    let mut game = GameController::with_seed(GameConfig::default(), MemoryStore::new(), 3).unwrap();
    let first = game.state().board().tiles()[0].id;
    game.select_tile(first);
    game.reset().unwrap();

    let snap = game.snapshot();
    assert_eq!(snap.tiles.len(), 16);
    assert_eq!(snap.phase, TurnPhase::Idle);
    assert!(snap.tiles.iter().all(|t| !t.revealed && !t.matched));
    assert_eq!(snap.elapsed_secs, 0);
    assert!(!snap.clock_running);
}
