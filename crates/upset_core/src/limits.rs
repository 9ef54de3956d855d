//! Search limits handed to engines for every move.

use std::time::Duration;

/// Python-stockfish's default search depth, kept so runs stay comparable.
pub const DEFAULT_DEPTH: u8 = 15;

/// Limits that bound a single best-move query.
///
/// Engines stop when any configured limit is reached. At least one limit
/// should be set; an engine may otherwise think forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum search depth in plies (half-moves)
    pub depth: Option<u8>,
    /// Maximum time allowed for this move
    pub move_time: Option<Duration>,
}

impl SearchLimits {
    /// Create limits with only depth constraint (no time limit).
    pub fn depth(depth: u8) -> Self {
        Self {
            depth: Some(depth),
            move_time: None,
        }
    }

    /// Create limits with only time constraint (infinite depth).
    pub fn time(move_time: Duration) -> Self {
        Self {
            depth: None,
            move_time: Some(move_time),
        }
    }

    /// Create limits with both depth and time constraints.
    pub fn depth_and_time(depth: u8, move_time: Duration) -> Self {
        Self {
            depth: Some(depth),
            move_time: Some(move_time),
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.depth.is_some() || self.move_time.is_some()
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(DEFAULT_DEPTH)
    }
}
