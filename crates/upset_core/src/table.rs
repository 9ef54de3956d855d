//! Persisted game table.
//!
//! A run is written once, at the end, as a JSON array of [`GameRecord`]
//! rows. Each row carries its move log as a nested array instead of an
//! embedded CSV string, so reloading needs no second parse pass.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::types::GameRecord;

/// All games of one simulation run, in trial order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameTable {
    games: Vec<GameRecord>,
}

impl GameTable {
    pub fn new(games: Vec<GameRecord>) -> Self {
        Self { games }
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn into_games(self) -> Vec<GameRecord> {
        self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a table and check every row's invariants.
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let table: GameTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Save results to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), TableError> {
        let write_err = |source| TableError::Write {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n").map_err(write_err)?;
        writer.flush().map_err(write_err)
    }

    /// Load results from a JSON file
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let file = File::open(path).map_err(|source| TableError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let table: GameTable = serde_json::from_reader(BufReader::new(file))?;
        table.validate()?;
        Ok(table)
    }

    fn validate(&self) -> Result<(), TableError> {
        for (row, game) in self.games.iter().enumerate() {
            game.validate()
                .map_err(|source| TableError::Invalid { row, source })?;
        }
        Ok(())
    }
}

impl From<Vec<GameRecord>> for GameTable {
    fn from(games: Vec<GameRecord>) -> Self {
        Self::new(games)
    }
}
