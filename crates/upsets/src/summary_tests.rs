use super::*;
use crate::summary::percentage;
use upset_core::{GameRecord, Outcome, Side, Termination};

fn game(winner: Option<Side>, white_elo: u32, black_elo: u32) -> GameRecord {
    let outcome = match winner {
        Some(side) => Outcome::checkmate(side),
        None => Outcome::draw(Termination::Stalemate),
    };
    GameRecord::from_game(String::new(), Vec::new(), outcome, white_elo, black_elo)
}

#[test]
fn test_seventeen_upsets_in_a_hundred() {
    let mut records = Vec::new();
    records.extend((0..17).map(|_| game(Some(Side::White), 800, 1600)));
    records.extend((0..83).map(|_| game(Some(Side::Black), 800, 1600)));

    let summary = summarize(&records).unwrap();
    assert_eq!(summary.upset_count, 17);
    assert_eq!(summary.non_upset_count, 83);
    assert_eq!(summary.upset_percentage, 17.0);
    assert_eq!(summary.decisive_games(), 100);
}

#[test]
fn test_draws_do_not_count() {
    let mut records = vec![
        game(Some(Side::White), 1000, 2000),
        game(Some(Side::White), 2000, 1000),
    ];
    records.extend((0..5).map(|_| game(None, 1000, 2000)));

    let summary = summarize(&records).unwrap();
    assert_eq!(summary.upset_count, 1);
    assert_eq!(summary.non_upset_count, 1);
    assert_eq!(summary.upset_percentage, 50.0);
}

#[test]
fn test_no_decisive_games_is_undefined() {
    let draws: Vec<GameRecord> = (0..4).map(|_| game(None, 500, 900)).collect();
    assert_eq!(summarize(&draws), Err(SummaryError::DivisionUndefined));
    assert_eq!(summarize(&[]), Err(SummaryError::DivisionUndefined));
}

#[test]
fn test_equal_ratings_are_not_upsets() {
    let records = [game(Some(Side::Black), 1500, 1500)];
    let summary = summarize(&records).unwrap();
    assert_eq!(summary.upset_count, 0);
    assert_eq!(summary.upset_percentage, 0.0);
}

#[test]
fn test_percentage_rounds_to_three_places() {
    let records = [
        game(Some(Side::White), 1000, 1200),
        game(Some(Side::White), 1200, 1000),
        game(Some(Side::Black), 1200, 1000),
    ];
    let summary = summarize(&records).unwrap();
    assert_eq!(summary.upset_percentage, 66.667);

    assert_eq!(percentage(1, 3), 33.333);
    assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
}
