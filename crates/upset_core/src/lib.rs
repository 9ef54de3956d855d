//! Core types for engine-vs-engine upset studies.
//!
//! - [`GameBoard`]: a game from the standard start, with draw bookkeeping
//! - [`GameRecord`] / [`MoveRecord`]: what a finished game leaves behind
//! - [`GameTable`]: the persisted set of records of one run
//! - [`Engine`] / [`EngineLauncher`]: seam for move-producing sessions
//!
//! The chess rules themselves come from `shakmaty`.

pub mod board;
pub mod error;
pub mod limits;
pub mod strength;
pub mod table;
pub mod types;

#[cfg(test)]
mod table_tests;

pub use board::*;
pub use error::*;
pub use limits::*;
pub use strength::*;
pub use table::*;
pub use types::*;

pub use shakmaty::{Chess, Move};

// =============================================================================
// Engine trait: implemented by every move source (UCI processes, random, ...)
// =============================================================================

/// Result of a best-move query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found (None if the side to move has no legal moves)
    pub best_move: Option<Move>,
    /// Deepest depth the engine reported, if any
    pub depth: Option<u32>,
    /// Nodes searched, if the engine reported them
    pub nodes: Option<u64>,
}

/// A single engine session. Sessions belong to one game and one side.
pub trait Engine: Send {
    /// Best move for the side to move in `pos`.
    ///
    /// Returns `best_move: None` only when the side to move has no legal
    /// move. Failing to answer at all is an [`EngineError`].
    fn search(&mut self, pos: &Chess, limits: &SearchLimits) -> Result<SearchResult, EngineError>;

    /// Returns the engine's name for logs and error messages
    fn name(&self) -> &str;

    /// Reset internal state for a new game (clear hash tables, history, etc.)
    fn new_game(&mut self) -> Result<(), EngineError> {
        Ok(())
    }
}

/// Creates engine sessions playing at a given strength rating.
///
/// Shared by every worker of a run, hence `Sync`.
pub trait EngineLauncher: Sync {
    /// Start a session playing at `elo`.
    ///
    /// `seed` is drawn per trial and side. Sessions that make random choices
    /// seed from it, so a seeded run replays the same games on any number of
    /// workers.
    fn launch(&self, elo: u32, seed: u64) -> Result<Box<dyn Engine>, EngineError>;

    /// Short human-readable description for logs
    fn describe(&self) -> String;
}
