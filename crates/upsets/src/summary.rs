//! Upset aggregation over finished games

use serde::{Deserialize, Serialize};
use thiserror::Error;
use upset_core::{GameRecord, UpsetStatus};

/// Decimal places kept in percentages
pub const PERCENTAGE_PLACES: i32 = 3;

/// Upset counts over the decisive games of a run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UpsetSummary {
    pub upset_count: u32,
    pub non_upset_count: u32,
    /// Share of decisive games that were upsets, in percent, 3 decimals
    pub upset_percentage: f64,
}

impl UpsetSummary {
    pub fn decisive_games(&self) -> u32 {
        self.upset_count + self.non_upset_count
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SummaryError {
    /// No game had a winner, so the percentage has no denominator
    #[error("upset percentage is undefined: no decisive games")]
    DivisionUndefined,
}

/// Count upsets among decisive games.
///
/// Games without a winner are left out of both counts and the denominator.
pub fn summarize(records: &[GameRecord]) -> Result<UpsetSummary, SummaryError> {
    let mut upset_count = 0u32;
    let mut non_upset_count = 0u32;
    for record in records {
        match record.upset {
            UpsetStatus::Upset => upset_count += 1,
            UpsetStatus::NotUpset => non_upset_count += 1,
            UpsetStatus::NotApplicable => {}
        }
    }

    let decisive = upset_count + non_upset_count;
    if decisive == 0 {
        return Err(SummaryError::DivisionUndefined);
    }

    Ok(UpsetSummary {
        upset_count,
        non_upset_count,
        upset_percentage: percentage(upset_count, decisive),
    })
}

/// `100 * part / whole`, rounded to [`PERCENTAGE_PLACES`] decimals.
pub(crate) fn percentage(part: u32, whole: u32) -> f64 {
    round_to(100.0 * f64::from(part) / f64::from(whole), PERCENTAGE_PLACES)
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    (value * scale).round() / scale
}
