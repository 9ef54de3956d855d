//! Run configuration loaded from `upsets.toml`
//!
//! Every field has a default, so the file is optional and may set only the
//! values that differ. Command-line flags override the file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use upset_core::{SearchLimits, StrengthRange, DEFAULT_DEPTH};

use crate::simulation::SimulationConfig;

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "upsets.toml";

/// Where games are cached between runs
pub const DEFAULT_OUTPUT_FILE: &str = "chess_moves.json";

/// Engine name that selects the built-in random mover instead of a process
pub const RANDOM_ENGINE: &str = "random";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub trials: u32,
    pub output: PathBuf,
    pub workers: usize,
    pub seed: Option<u64>,
    pub max_plies: Option<u32>,
    pub strength: StrengthRange,
    pub engine: EngineConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            workers: 1,
            seed: None,
            max_plies: None,
            strength: StrengthRange::default(),
            engine: EngineConfig::default(),
        }
    }
}

/// How to start and drive the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Executable path, or `random` for the built-in random mover
    pub path: String,
    pub args: Vec<String>,
    pub depth: Option<u8>,
    pub movetime_ms: Option<u64>,
    /// Extra UCI options set on every session (`Threads`, `Hash`, ...)
    pub options: BTreeMap<String, String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            path: "stockfish".to_string(),
            args: Vec::new(),
            depth: Some(DEFAULT_DEPTH),
            movetime_ms: None,
            options: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    pub fn is_random(&self) -> bool {
        self.path == RANDOM_ENGINE
    }

    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            depth: self.depth,
            move_time: self.movetime_ms.map(Duration::from_millis),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.path.trim().is_empty() {
            return Err(ConfigError::Invalid("engine.path is empty".into()));
        }
        self.simulation_config()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            trials: self.trials,
            strength: self.strength,
            limits: self.engine.search_limits(),
            max_plies: self.max_plies,
            seed: self.seed,
            workers: self.workers,
        }
    }
}
