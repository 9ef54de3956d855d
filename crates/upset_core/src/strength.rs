//! Strength ratings assigned to engine sessions.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lowest rating drawn by default
pub const DEFAULT_MIN_ELO: u32 = 200;

/// Highest rating drawn by default
pub const DEFAULT_MAX_ELO: u32 = 2500;

/// Closed range of ratings each side is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrengthRange {
    pub min: u32,
    pub max: u32,
}

impl Default for StrengthRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_ELO,
            max: DEFAULT_MAX_ELO,
        }
    }
}

impl StrengthRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, elo: u32) -> bool {
        (self.min..=self.max).contains(&elo)
    }

    /// Draw a rating uniformly from the range, both ends included.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min..=self.max)
    }
}
