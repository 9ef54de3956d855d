use super::*;
use upset_core::{GameRecord, Outcome, Side, Termination};

fn game(outcome: Outcome, white_elo: u32, black_elo: u32) -> GameRecord {
    GameRecord::from_game(String::new(), Vec::new(), outcome, white_elo, black_elo)
}

#[test]
fn test_outcome_tally() {
    let records = [
        game(Outcome::checkmate(Side::White), 1000, 1200),
        game(Outcome::checkmate(Side::White), 1300, 1200),
        game(Outcome::checkmate(Side::Black), 1000, 1200),
        game(Outcome::draw(Termination::Stalemate), 1000, 1200),
    ];
    let tally = OutcomeTally::from_records(&records);

    assert_eq!(tally.white_wins, 2);
    assert_eq!(tally.black_wins, 1);
    assert_eq!(tally.draws, 1);
    assert_eq!(tally.total_games(), 4);
    assert!((tally.score() - 0.625).abs() < 1e-9);
    assert_eq!(OutcomeTally::new().score(), 0.5);
}

#[test]
fn test_report_counts_terminations_in_order() {
    let records = [
        game(Outcome::draw(Termination::FivefoldRepetition), 700, 900),
        game(Outcome::checkmate(Side::Black), 700, 900),
        game(Outcome::draw(Termination::FivefoldRepetition), 700, 900),
    ];
    let report = SimulationReport::from_records(&records);

    assert_eq!(report.games, 3);
    assert_eq!(
        report.terminations,
        vec![
            (Termination::Checkmate, 1),
            (Termination::FivefoldRepetition, 2)
        ]
    );
}

#[test]
fn test_report_text() {
    let records = [
        game(Outcome::checkmate(Side::White), 1000, 1600),
        game(Outcome::checkmate(Side::Black), 1000, 1600),
        game(Outcome::checkmate(Side::Black), 1000, 1600),
        game(Outcome::checkmate(Side::Black), 1000, 1600),
    ];
    let text = SimulationReport::from_records(&records).generate_report();

    assert!(text.contains("=== Upset Report: 4 games ==="));
    assert!(text.contains("CHECKMATE"));
    assert!(text.contains("Ended in Upset: 1\n"));
    assert!(text.contains("Didn't End in Upset: 3\n"));
    assert!(text.contains("Percentage of Decisive Games that Ended in Upset: 25 %"));
    assert!(text.contains("500-749"));
}

#[test]
fn test_report_without_decisive_games() {
    let records = [game(Outcome::draw(Termination::InsufficientMaterial), 1000, 1100)];
    let report = SimulationReport::from_records(&records);

    assert_eq!(report.summary, Err(SummaryError::DivisionUndefined));
    assert!(report.gaps.is_empty());
    assert!(report.generate_report().contains("undefined"));
}
