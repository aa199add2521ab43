use logisweep_core::*;

const SEEDS: std::ops::Range<u64> = 0..40;

fn first_click(config: GameConfig, start: Coord2) -> GameEngine {
    let mut engine = GameEngine::new(config);
    engine.primary_click(start);
    engine
}

#[test]
fn first_click_neighborhood_is_mine_free() {
    for seed in SEEDS {
        for start in [(0, 0), (4, 4), (15, 7), (8, 0)] {
            let engine = first_click(GameConfig::new(16, 8, 40).with_seed(seed), start);

            assert_eq!(engine.board().count_mines(), 40);
            assert!(!engine.at(start).unwrap().is_mine);
            for pos in engine.neighbors(start) {
                assert!(!engine.at(pos).unwrap().is_mine, "mine next to {start:?} at {pos:?}");
            }
        }
    }
}

#[test]
fn clues_match_neighboring_mines() {
    for seed in SEEDS {
        let engine = first_click(GameConfig::new(12, 10, 30).with_seed(seed), (6, 5));

        for pos in engine.board().coords() {
            let expected = engine
                .neighbors(pos)
                .filter(|&n| engine.at(n).unwrap().is_mine)
                .count();
            assert_eq!(usize::from(engine.at(pos).unwrap().n_mines), expected);
        }
    }
}

#[test]
fn same_seed_same_board() {
    for seed in SEEDS {
        let config = GameConfig::new(16, 16, 40).with_seed(seed);

        let first = first_click(config, (3, 12));
        let second = first_click(config, (3, 12));

        assert_eq!(first.board(), second.board());
        assert_eq!(first.unsolvable(), second.unsolvable());
    }
}

#[test]
fn first_click_never_loses() {
    for seed in SEEDS {
        let engine = first_click(GameConfig::new(9, 9, 72).with_seed(seed).with_attempts(2), (4, 4));

        assert_ne!(engine.state(), GameState::Lost);
        assert_eq!(engine.at((4, 4)).unwrap().state, CellState::Revealed);
    }
}

#[test]
fn clicking_every_safe_cell_wins() {
    for seed in SEEDS {
        let mut engine = first_click(GameConfig::new(9, 9, 10).with_seed(seed), (4, 4));

        let safe: Vec<_> = engine
            .board()
            .coords()
            .filter(|&pos| !engine.at(pos).unwrap().is_mine)
            .collect();
        for pos in safe {
            engine.primary_click(pos);
        }

        assert_eq!(engine.state(), GameState::Won);
        assert_eq!(engine.cells_flagged(), 0);
    }
}

#[test]
fn flood_never_reveals_flagged_cells() {
    let board = Board::from_mine_coords((6, 6), &[(5, 5)]).unwrap();
    let mut engine = GameEngine::from_board(board);
    engine.secondary_click((2, 2));
    engine.secondary_click((3, 0));
    engine.secondary_click((3, 0));

    engine.primary_click((0, 5));

    assert_eq!(engine.at((2, 2)).unwrap().state, CellState::Flagged);
    assert_eq!(engine.at((3, 0)).unwrap().state, CellState::QuestionMarked);
    assert_eq!(engine.state(), GameState::Playing);
}

#[test]
fn toggle_cycle_holds_for_every_state() {
    let board = Board::from_mine_coords((3, 3), &[(0, 0)]).unwrap();
    let mut engine = GameEngine::from_board(board);
    engine.primary_click((2, 2));
    assert_eq!(engine.at((2, 2)).unwrap().state, CellState::Revealed);

    for (state, next) in [
        (CellState::Hidden, CellState::Flagged),
        (CellState::Flagged, CellState::QuestionMarked),
        (CellState::QuestionMarked, CellState::Hidden),
    ] {
        assert_eq!(engine.at((0, 0)).unwrap().state, state);
        engine.toggle((0, 0));
        assert_eq!(engine.at((0, 0)).unwrap().state, next);
    }

    assert_eq!(engine.toggle((2, 2)), ClickOutcome::NoChange);
    assert_eq!(engine.at((2, 2)).unwrap().state, CellState::Revealed);
}

#[test]
fn engine_round_trips_through_json() {
    let mut engine = first_click(GameConfig::new(9, 9, 10).with_seed(17), (0, 0));
    engine.secondary_click((8, 8));

    let json = serde_json::to_string(&engine).unwrap();
    let restored: GameEngine = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, engine);
}
