//! Random Move Chess Engine
//!
//! Selects moves uniformly at random from all legal moves. Useful for:
//! - Running the simulation without an engine binary installed
//! - Tests that need whole games quickly and deterministically

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use shakmaty::Position;
use upset_core::{Chess, Engine, EngineError, EngineLauncher, SearchLimits, SearchResult};

#[cfg(test)]
mod lib_tests;

/// A chess engine that plays random legal moves.
///
/// The strength rating is accepted and ignored.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, pos: &Chess, _limits: &SearchLimits) -> Result<SearchResult, EngineError> {
        let moves = pos.legal_moves();
        let best_move = moves.choose(&mut self.rng).cloned();

        Ok(SearchResult {
            best_move,
            depth: Some(1),
            nodes: Some(moves.len() as u64),
        })
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }
}

/// Launches [`RandomEngine`] sessions seeded from the trial.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomLauncher;

impl RandomLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl EngineLauncher for RandomLauncher {
    fn launch(&self, _elo: u32, seed: u64) -> Result<Box<dyn Engine>, EngineError> {
        Ok(Box::new(RandomEngine::with_seed(seed)))
    }

    fn describe(&self) -> String {
        "random".to_string()
    }
}
