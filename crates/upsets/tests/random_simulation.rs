//! End-to-end runs with the built-in random mover.

use random_engine::RandomLauncher;
use upset_core::{GameBoard, GameRecord, GameTable, Side, StrengthRange, Termination, UpsetStatus};
use upsets::{summarize, SimulationConfig, SimulationReport, SimulationRunner, SummaryError};

fn simulate(trials: u32, seed: u64) -> Vec<GameRecord> {
    let config = SimulationConfig {
        trials,
        seed: Some(seed),
        ..Default::default()
    };
    SimulationRunner::new(config)
        .run(&RandomLauncher::new())
        .unwrap()
}

#[test]
fn test_move_logs_replay_to_final_position() {
    for record in simulate(5, 3) {
        let mut board = GameBoard::new();
        for (index, entry) in record.move_log.iter().enumerate() {
            assert_eq!(entry.position_before_move, board.fen(), "ply {index}");
            assert_eq!(entry.mover, board.turn());
            let expected = if index % 2 == 0 { Side::White } else { Side::Black };
            assert_eq!(entry.mover, expected);
            board.play_uci(&entry.move_text).unwrap();
        }
        assert_eq!(record.final_position, board.fen());
        assert_eq!(
            board.outcome(true).map(|o| o.termination),
            Some(record.termination)
        );
        assert_eq!(record.ply_pair_count as usize, record.move_log.len().div_ceil(2));
    }
}

#[test]
fn test_winner_and_upset_follow_termination() {
    let range = StrengthRange::default();
    for record in simulate(8, 21) {
        assert!(range.contains(record.white_elo));
        assert!(range.contains(record.black_elo));

        if record.termination == Termination::Checkmate {
            let winner = record.winner.expect("checkmate has a winner");
            // The side that delivered mate made the last move
            assert_eq!(record.move_log.last().map(|m| m.mover), Some(winner));
            let expected = record.elo(winner) < record.elo(winner.other());
            assert_eq!(record.upset == UpsetStatus::Upset, expected);
        } else {
            assert_eq!(record.winner, None);
            assert_eq!(record.upset, UpsetStatus::NotApplicable);
        }
    }
}

#[test]
fn test_saved_run_reports_the_same() {
    let records = simulate(6, 8);
    let path = std::env::temp_dir().join(format!("upsets_run_{}.json", std::process::id()));

    GameTable::new(records.clone()).save(&path).unwrap();
    let loaded = GameTable::load(&path).unwrap().into_games();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, records);
    assert_eq!(
        SimulationReport::from_records(&loaded),
        SimulationReport::from_records(&records)
    );

    match summarize(&loaded) {
        Ok(summary) => {
            let decisive = loaded.iter().filter(|r| r.is_decisive()).count() as u32;
            assert_eq!(summary.decisive_games(), decisive);
            assert!((0.0..=100.0).contains(&summary.upset_percentage));
        }
        Err(SummaryError::DivisionUndefined) => {
            assert!(loaded.iter().all(|r| !r.is_decisive()));
        }
    }
}
