use super::*;
use upset_core::GameBoard;

#[test]
fn test_random_engine_returns_legal_move() {
    let mut engine = RandomEngine::new();
    let board = GameBoard::new();

    let result = engine
        .search(board.position(), &SearchLimits::depth(1))
        .unwrap();

    let mv = result.best_move.expect("start position has moves");
    assert!(board.legal_moves().contains(&mv));
}

#[test]
fn test_random_engine_handles_checkmate() {
    let mut engine = RandomEngine::new();
    let board =
        GameBoard::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
            .unwrap();

    let result = engine
        .search(board.position(), &SearchLimits::depth(1))
        .unwrap();

    assert!(result.best_move.is_none());
}

#[test]
fn test_random_engine_handles_stalemate() {
    let mut engine = RandomEngine::new();
    let board = GameBoard::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();

    let result = engine
        .search(board.position(), &SearchLimits::depth(1))
        .unwrap();

    assert!(result.best_move.is_none());
}

#[test]
fn test_seeded_engines_agree() {
    let board = GameBoard::new();
    let mut a = RandomEngine::with_seed(7);
    let mut b = RandomEngine::with_seed(7);

    for _ in 0..10 {
        let ma = a.search(board.position(), &SearchLimits::default()).unwrap();
        let mb = b.search(board.position(), &SearchLimits::default()).unwrap();
        assert_eq!(ma.best_move, mb.best_move);
    }
}

#[test]
fn test_launcher_seeds_sessions() {
    let launcher = RandomLauncher::new();
    let mut first = launcher.launch(1200, 3).unwrap();
    let mut second = launcher.launch(2400, 3).unwrap();
    assert_eq!(first.name(), "Random v1.0");
    assert!(second.new_game().is_ok());

    // Same seed, same moves, whatever the rating
    let mut board = GameBoard::new();
    for _ in 0..12 {
        let a = first.search(board.position(), &SearchLimits::default()).unwrap();
        let b = second.search(board.position(), &SearchLimits::default()).unwrap();
        assert_eq!(a.best_move, b.best_move);
        let Some(mv) = a.best_move else { break };
        board.play(mv).unwrap();
    }
    assert_eq!(launcher.describe(), "random");
}
