use duel_2048::config::EngineConfig;
use duel_2048::engine::{is_game_over, shift, Board, Move};
use duel_2048::expectimax::{Difficulty, SearchPolicy, Searcher};
use duel_2048::game::{Game, GameError};
use duel_2048::history::HistoryError;
use rand::{rngs::StdRng, SeedableRng};

fn rows4(rows: [[u64; 4]; 4]) -> Board {
    let rows: Vec<Vec<u64>> = rows.iter().map(|r| r.to_vec()).collect();
    Board::from_rows(&rows).unwrap()
}

#[test]
fn row_scenarios_moving_left() {
    let cases = [
        ([2, 2, 4, 0], [4, 4, 0, 0], 4),
        ([2, 0, 2, 2], [4, 2, 0, 0], 4),
        ([2, 2, 2, 2], [4, 4, 0, 0], 8),
    ];
    for (input, expected, gain) in cases {
        let b = rows4([input, [0; 4], [0; 4], [0; 4]]);
        let r = shift(&b, Move::Left);
        assert!(r.moved);
        assert_eq!(r.board.rows()[0], expected.to_vec());
        assert_eq!(r.score_gain, gain);
    }
}

#[test]
fn packed_board_rejects_left_and_up() {
    let b = rows4([[64, 32, 16, 8], [32, 16, 8, 4], [16, 8, 4, 2], [8, 4, 2, 0]]);
    for dir in [Move::Left, Move::Up] {
        let r = shift(&b, dir);
        assert!(!r.moved);
        assert_eq!(r.board, b);
        assert_eq!(r.score_gain, 0);
    }
    assert!(shift(&b, Move::Right).moved);
}

#[test]
fn terminal_detection_scenarios() {
    let one_gap = rows4([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 0]]);
    assert!(!is_game_over(&one_gap));
    let full = rows4([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
    assert!(is_game_over(&full));
    let mut s = Searcher::with_rng(StdRng::seed_from_u64(0));
    assert_eq!(s.choose_direction(&full, Difficulty::Hard), None);
}

#[test]
fn undo_after_one_move_restores_position() {
    let mut g = Game::new(4, 10, StdRng::seed_from_u64(99)).unwrap();
    let before = g.board().clone();
    let dir = Move::ALL.into_iter().find(|&d| g.board().shift(d).moved).unwrap();
    g.play(dir).unwrap();
    g.settle();
    assert_ne!(g.board(), &before);
    g.undo().unwrap();
    assert_eq!(g.board().rows(), before.rows());
    assert_eq!(g.score(), before.score());
    assert_eq!(g.undo(), Err(GameError::History(HistoryError::Empty)));
}

#[test]
fn history_is_bounded_over_a_long_game() {
    let cfg = EngineConfig { seed: Some(5), ..Default::default() };
    let mut g = Game::from_config(&cfg, 0).unwrap();
    let mut ai = Searcher::with_rng(cfg.rng(1));
    let mut moves = 0;
    while moves < 40 {
        let Some(dir) = ai.choose_direction(g.board(), Difficulty::Medium) else { break };
        assert!(g.play_settled(dir).unwrap().moved);
        assert!(g.history_len() <= cfg.history_capacity);
        moves += 1;
    }
    assert_eq!(g.history_len(), cfg.history_capacity.min(moves));
    let mut undone = 0;
    while g.undo().is_ok() {
        undone += 1;
    }
    assert_eq!(undone, cfg.history_capacity.min(moves));
}

#[test]
fn opponent_and_hint_play_independent_boards() {
    let cfg = EngineConfig { seed: Some(17), grid_size: 5, ..Default::default() };
    let mut human = Game::from_config(&cfg, 0).unwrap();
    let mut opponent = Game::from_config(&cfg, 1).unwrap();
    let mut hint = Searcher::with_rng(cfg.rng(2));
    let mut ai = Searcher::with_rng(cfg.rng(3));
    for _ in 0..25 {
        let (h, o) = rayon::join(
            || hint.choose_direction(human.board(), SearchPolicy::hint()).map(|d| human.play_settled(d)),
            || ai.choose_direction(opponent.board(), Difficulty::Hard).map(|d| opponent.play_settled(d)),
        );
        assert!(h.map_or(true, |t| t.unwrap().moved));
        assert!(o.map_or(true, |t| t.unwrap().moved));
    }
    assert!(human.score() > 0);
    assert!(opponent.score() > 0);
    assert!(ai.cache_len() <= ai.cache_capacity());
}
