//! Simulation runner: plays strength-limited engine games

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};
use upset_core::{
    move_text, BoardError, Engine, EngineError, EngineLauncher, GameBoard, GameRecord,
    MoveRecord, Outcome, SearchLimits, Side, StrengthRange, Termination,
};

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Number of games to play
    pub trials: u32,
    /// Range each side's rating is drawn from
    pub strength: StrengthRange,
    /// Limits for every best-move query
    pub limits: SearchLimits,
    /// Adjudicate the game after this many plies (None = play to the end)
    pub max_plies: Option<u32>,
    /// Base seed for ratings and session seeds (None = fresh entropy per trial)
    pub seed: Option<u64>,
    /// Number of games played at once
    pub workers: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            strength: StrengthRange::default(),
            limits: SearchLimits::default(),
            max_plies: None,
            seed: None,
            workers: 1,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.trials == 0 {
            return Err(SimulationError::Config("trials must be at least 1".into()));
        }
        if self.workers == 0 {
            return Err(SimulationError::Config("workers must be at least 1".into()));
        }
        if !self.strength.is_valid() {
            return Err(SimulationError::Config(format!(
                "strength range {}..={} is empty",
                self.strength.min, self.strength.max
            )));
        }
        if !self.limits.is_bounded() {
            return Err(SimulationError::Config(
                "search needs a depth or a move time".into(),
            ));
        }
        if self.limits.depth == Some(0) || self.limits.move_time.is_some_and(|t| t.is_zero()) {
            return Err(SimulationError::Config(
                "search limits must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Why a single game could not be completed
#[derive(Debug, Error)]
pub enum TrialError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Board(#[from] BoardError),
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("trial {trial} aborted: {source}")]
    Trial {
        trial: u32,
        #[source]
        source: TrialError,
    },

    #[error("invalid simulation config: {0}")]
    Config(String),

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Runs independent games between freshly launched engine pairs
pub struct SimulationRunner {
    config: SimulationConfig,
}

impl SimulationRunner {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Play every trial and return the records in trial order.
    ///
    /// The first failing trial aborts the run; engine trouble is an
    /// environment problem, not something to retry.
    pub fn run(&self, launcher: &dyn EngineLauncher) -> Result<Vec<GameRecord>, SimulationError> {
        self.config.validate()?;
        info!(
            trials = self.config.trials,
            workers = self.config.workers,
            engine = %launcher.describe(),
            "starting simulation"
        );

        let trials = 0..self.config.trials;
        if self.config.workers == 1 {
            return trials.map(|trial| self.play_trial(launcher, trial)).collect();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers)
            .build()?;
        pool.install(|| {
            trials
                .into_par_iter()
                .map(|trial| self.play_trial(launcher, trial))
                .collect()
        })
    }

    /// Play one trial: draw ratings, launch both sessions, play the game.
    ///
    /// Both sessions are dropped, and their processes released, before this
    /// returns, whatever the outcome.
    pub fn play_trial(
        &self,
        launcher: &dyn EngineLauncher,
        trial: u32,
    ) -> Result<GameRecord, SimulationError> {
        let mut rng = self.trial_rng(trial);
        let white_elo = self.config.strength.sample(&mut rng);
        let black_elo = self.config.strength.sample(&mut rng);
        let white_seed: u64 = rng.gen();
        let black_seed: u64 = rng.gen();
        let fail = |source: TrialError| SimulationError::Trial { trial, source };

        let mut white = launcher
            .launch(white_elo, white_seed)
            .map_err(|e| fail(e.into()))?;
        let mut black = launcher
            .launch(black_elo, black_seed)
            .map_err(|e| fail(e.into()))?;

        debug!(trial, white_elo, black_elo, "trial started");
        let record = self
            .play_game(white.as_mut(), black.as_mut(), white_elo, black_elo)
            .map_err(fail)?;

        info!(
            "Game {}/{}: {} ({} vs {}) winner={} upset={} plies={}",
            trial + 1,
            self.config.trials,
            record.termination,
            white_elo,
            black_elo,
            record.winner.map(|s| s.as_str()).unwrap_or("NONE"),
            record.upset,
            record.move_log.len()
        );
        Ok(record)
    }

    /// Play a single game from the standard start position.
    pub fn play_game<'a>(
        &self,
        white: &'a mut dyn Engine,
        black: &'a mut dyn Engine,
        white_elo: u32,
        black_elo: u32,
    ) -> Result<GameRecord, TrialError> {
        let mut board = GameBoard::new();
        let mut log: Vec<MoveRecord> = Vec::new();
        white.new_game()?;
        black.new_game()?;

        while !board.is_game_over() {
            if self.ply_cap_reached(log.len()) {
                break;
            }

            let mover = board.turn();
            let engine = match mover {
                Side::White => &mut *white,
                Side::Black => &mut *black,
            };

            let result = engine.search(board.position(), &self.config.limits)?;
            // The game is not over, so the side to move has a legal move
            let Some(mv) = result.best_move else {
                return Err(EngineError::NoMove {
                    engine: engine.name().to_string(),
                    fen: board.fen(),
                }
                .into());
            };

            log.push(MoveRecord {
                position_before_move: board.fen(),
                move_text: move_text(&mv),
                mover,
            });
            board.play(mv)?;
        }

        let outcome = board
            .outcome(true)
            .unwrap_or(Outcome::draw(Termination::MoveLimit));

        Ok(GameRecord::from_game(
            board.fen(),
            log,
            outcome,
            white_elo,
            black_elo,
        ))
    }

    fn ply_cap_reached(&self, plies: usize) -> bool {
        self.config
            .max_plies
            .is_some_and(|cap| plies >= cap as usize)
    }

    fn trial_rng(&self, trial: u32) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(u64::from(trial))),
            None => StdRng::from_entropy(),
        }
    }
}

/// Quick utility to run a simulation with default settings
pub fn quick_simulation(
    launcher: &dyn EngineLauncher,
    trials: u32,
    limits: SearchLimits,
) -> Result<Vec<GameRecord>, SimulationError> {
    let config = SimulationConfig {
        trials,
        limits,
        ..Default::default()
    };
    SimulationRunner::new(config).run(launcher)
}
