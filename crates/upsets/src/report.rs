//! Simulation results reporting

use serde::{Deserialize, Serialize};
use upset_core::{GameRecord, Side, Termination};

use crate::elo::{rating_gap_breakdown, GapBucket, GAP_BUCKET_WIDTH};
use crate::summary::{summarize, SummaryError, UpsetSummary};

/// Results by colour over all games
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeTally {
    pub white_wins: u32,
    pub black_wins: u32,
    pub draws: u32,
}

impl OutcomeTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[GameRecord]) -> Self {
        let mut tally = Self::new();
        for record in records {
            match record.winner {
                Some(Side::White) => tally.white_wins += 1,
                Some(Side::Black) => tally.black_wins += 1,
                None => tally.draws += 1,
            }
        }
        tally
    }

    pub fn total_games(&self) -> u32 {
        self.white_wins + self.black_wins + self.draws
    }

    /// Score from White's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.white_wins as f64 + 0.5 * self.draws as f64) / total
    }
}

/// Everything printed after a run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationReport {
    pub games: usize,
    pub tally: OutcomeTally,
    /// Games per termination, in [`Termination::ALL`] order, zero counts left out
    pub terminations: Vec<(Termination, u32)>,
    pub summary: Result<UpsetSummary, SummaryError>,
    pub gaps: Vec<GapBucket>,
}

impl SimulationReport {
    pub fn from_records(records: &[GameRecord]) -> Self {
        let terminations = Termination::ALL
            .iter()
            .map(|&t| {
                let count = records.iter().filter(|r| r.termination == t).count() as u32;
                (t, count)
            })
            .filter(|&(_, count)| count > 0)
            .collect();

        Self {
            games: records.len(),
            tally: OutcomeTally::from_records(records),
            terminations,
            summary: summarize(records),
            gaps: rating_gap_breakdown(records, GAP_BUCKET_WIDTH),
        }
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Upset Report: {} games ===\n\n", self.games));

        report.push_str(&format!(
            "White wins: {}, Black wins: {}, Draws: {} (White score {:.1}%)\n\n",
            self.tally.white_wins,
            self.tally.black_wins,
            self.tally.draws,
            self.tally.score() * 100.0
        ));

        report.push_str("Terminations:\n");
        for (termination, count) in &self.terminations {
            report.push_str(&format!("{:<24} {:>6}\n", termination.as_str(), count));
        }
        report.push('\n');

        report.push_str("Ratio of Decisive Games that Ended in an Upset:\n");
        match &self.summary {
            Ok(summary) => {
                report.push_str(&format!("Ended in Upset: {}\n", summary.upset_count));
                report.push_str(&format!(
                    "Didn't End in Upset: {}\n",
                    summary.non_upset_count
                ));
                report.push_str(&format!(
                    "Percentage of Decisive Games that Ended in Upset: {} %\n",
                    summary.upset_percentage
                ));
            }
            Err(e) => report.push_str(&format!("{}\n", e)),
        }

        if !self.gaps.is_empty() {
            report.push('\n');
            report.push_str(&format!(
                "{:<12} {:>6} {:>7} {:>9} {:>10}\n",
                "Rating gap", "Games", "Upsets", "Upset %", "Expected %"
            ));
            report.push_str(&"-".repeat(48));
            report.push('\n');
            for bucket in &self.gaps {
                report.push_str(&format!(
                    "{:<12} {:>6} {:>7} {:>9.1} {:>10.1}\n",
                    format!("{}-{}", bucket.min_gap, bucket.max_gap - 1),
                    bucket.games,
                    bucket.upsets,
                    bucket.upset_percentage().unwrap_or(0.0),
                    bucket.expected_underdog_score * 100.0
                ));
            }
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}
