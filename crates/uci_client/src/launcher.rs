//! Launches strength-limited UCI sessions for the simulation runner.

use tracing::debug;
use upset_core::{Engine, EngineError, EngineLauncher};

use crate::engine::{EngineCommand, UciEngine};

/// Starts a fresh engine process per session and configures it.
#[derive(Debug, Clone)]
pub struct UciLauncher {
    command: EngineCommand,
    /// Extra `setoption` pairs applied before the strength limit
    options: Vec<(String, String)>,
}

impl UciLauncher {
    pub fn new(command: EngineCommand) -> Self {
        Self {
            command,
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push((name.into(), value.into()));
        self
    }

    /// Start a session limited to `elo` without boxing it.
    pub fn start(&self, elo: u32) -> Result<UciEngine, EngineError> {
        let mut engine = UciEngine::spawn(&self.command)?;
        for (name, value) in &self.options {
            engine.set_option(name, value)?;
        }
        engine.set_elo(elo)?;
        engine.new_game()?;
        debug!(engine = %engine.name(), elo, "session configured");
        Ok(engine)
    }
}

impl EngineLauncher for UciLauncher {
    fn launch(&self, elo: u32, _seed: u64) -> Result<Box<dyn Engine>, EngineError> {
        Ok(Box::new(self.start(elo)?))
    }

    fn describe(&self) -> String {
        if self.command.args.is_empty() {
            self.command.program.clone()
        } else {
            format!("{} {}", self.command.program, self.command.args.join(" "))
        }
    }
}
