//! Elo expectations and upsets by rating gap

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use upset_core::{GameRecord, UpsetStatus};

use crate::summary::percentage;

/// Width of one rating-gap bucket in the breakdown
pub const GAP_BUCKET_WIDTH: u32 = 250;

/// Expected score of a player rated `rating` against `opponent`
/// (1 for a sure win, 0.5 for even odds).
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((opponent - rating) / 400.0))
}

/// Decisive games whose rating gap falls in `[min_gap, max_gap)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapBucket {
    pub min_gap: u32,
    pub max_gap: u32,
    pub games: u32,
    pub upsets: u32,
    /// Mean Elo-expected score of the lower-rated side
    pub expected_underdog_score: f64,
}

impl GapBucket {
    /// Observed upset rate in percent
    pub fn upset_percentage(&self) -> Option<f64> {
        (self.games > 0).then(|| percentage(self.upsets, self.games))
    }
}

#[derive(Default)]
struct Accumulator {
    games: u32,
    upsets: u32,
    expected_sum: f64,
}

/// Group decisive games by rating gap.
///
/// Buckets are `width` rating points wide and only present when they hold
/// at least one game; games without a winner are skipped.
pub fn rating_gap_breakdown(records: &[GameRecord], width: u32) -> Vec<GapBucket> {
    let width = width.max(1);
    let mut buckets: BTreeMap<u32, Accumulator> = BTreeMap::new();

    for record in records.iter().filter(|r| r.is_decisive()) {
        let gap = record.rating_gap();
        let (low, high) = if record.white_elo <= record.black_elo {
            (record.white_elo, record.black_elo)
        } else {
            (record.black_elo, record.white_elo)
        };

        let acc = buckets.entry(gap / width).or_default();
        acc.games += 1;
        if record.upset == UpsetStatus::Upset {
            acc.upsets += 1;
        }
        acc.expected_sum += expected_score(f64::from(low), f64::from(high));
    }

    buckets
        .into_iter()
        .map(|(index, acc)| GapBucket {
            min_gap: index * width,
            max_gap: (index + 1) * width,
            games: acc.games,
            upsets: acc.upsets,
            expected_underdog_score: acc.expected_sum / f64::from(acc.games),
        })
        .collect()
}
