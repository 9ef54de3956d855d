use super::*;
use std::path::PathBuf;

/// Play `moves` from the start and record the game the way the runner does.
fn play(moves: &[&str], white_elo: u32, black_elo: u32) -> GameRecord {
    let mut board = GameBoard::new();
    let mut log = Vec::new();
    for text in moves {
        let before = board.fen();
        let mover = board.turn();
        let mv = board.play_uci(text).unwrap();
        log.push(MoveRecord {
            position_before_move: before,
            move_text: move_text(&mv),
            mover,
        });
    }
    let outcome = board
        .outcome(true)
        .unwrap_or(Outcome::draw(Termination::MoveLimit));
    GameRecord::from_game(board.fen(), log, outcome, white_elo, black_elo)
}

fn sample_table() -> GameTable {
    GameTable::new(vec![
        play(&["f2f3", "e7e5", "g2g4", "d8h4"], 2100, 700),
        play(&["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6", "h5f7"], 1500, 1500),
        play(&["d2d4", "d7d5", "c2c4"], 300, 2400),
    ])
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("upset_core_{}_{}.json", std::process::id(), name))
}

#[test]
fn test_json_round_trip_preserves_move_logs() {
    let table = sample_table();
    let json = table.to_json().unwrap();
    let loaded = GameTable::from_json(&json).unwrap();

    assert_eq!(loaded, table);
    for (a, b) in loaded.games().iter().zip(table.games()) {
        assert_eq!(a.move_log, b.move_log);
    }
}

#[test]
fn test_sample_games_classified() {
    let table = sample_table();
    let games = table.games();

    assert_eq!(games[0].winner, Some(Side::Black));
    assert_eq!(games[0].upset, UpsetStatus::Upset);
    assert_eq!(games[0].ply_pair_count, 2);

    assert_eq!(games[1].winner, Some(Side::White));
    assert_eq!(games[1].upset, UpsetStatus::NotUpset);
    assert_eq!(games[1].move_log.len(), 7);
    assert_eq!(games[1].move_log.last().map(|m| m.mover), Some(Side::White));
    assert_eq!(games[1].ply_pair_count, 4);

    assert_eq!(games[2].winner, None);
    assert_eq!(games[2].upset, UpsetStatus::NotApplicable);
}

#[test]
fn test_column_names() {
    let json = sample_table().to_json().unwrap();
    for column in [
        "FEN",
        "MOVES_DF",
        "NUM_MOVE_PAIRS",
        "RESULT",
        "WINNER",
        "WHITE_ELO",
        "BLACK_ELO",
        "UPSET",
        "FEN_BEFORE_MOVE",
        "MOVE_MADE",
        "TURN",
    ] {
        assert!(json.contains(&format!("\"{column}\"")), "missing {column}");
    }
}

#[test]
fn test_save_and_load_file() {
    let path = temp_path("save_load");
    let table = sample_table();
    table.save(&path).unwrap();

    let loaded = GameTable::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded, table);
}

#[test]
fn test_load_missing_file() {
    let err = GameTable::load(&temp_path("does_not_exist")).unwrap_err();
    assert!(matches!(err, TableError::Read { .. }));
}

#[test]
fn test_malformed_json_is_parse_error() {
    let err = GameTable::from_json("[{\"FEN\": 3}").unwrap_err();
    assert!(matches!(err, TableError::Parse(_)));
}

#[test]
fn test_invalid_row_reports_index() {
    let mut games = sample_table().into_games();
    games[1].winner = None;
    let json = GameTable::new(games).to_json().unwrap();

    let err = GameTable::from_json(&json).unwrap_err();
    assert!(matches!(err, TableError::Invalid { row: 1, .. }));
}

#[test]
fn test_empty_table() {
    let table = GameTable::from_json("[]").unwrap();
    assert!(table.is_empty());
}
