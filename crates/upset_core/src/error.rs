//! Error types shared by the simulation crates.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{Side, Termination};

/// Failure talking to a chess-playing engine.
///
/// Engine availability is a precondition of a run, so every variant is
/// treated as fatal by the simulation runner.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("engine `{engine}` closed its output")]
    Disconnected { engine: String },

    #[error("i/o error talking to engine `{engine}`: {source}")]
    Io {
        engine: String,
        #[source]
        source: io::Error,
    },

    #[error("engine `{engine}` sent an unexpected reply: {line}")]
    Protocol { engine: String, line: String },

    #[error("engine `{engine}` played illegal move `{mv}` in {fen}: {reason}")]
    IllegalMove {
        engine: String,
        mv: String,
        fen: String,
        reason: String,
    },

    #[error("engine `{engine}` returned no move in {fen}, which is not a finished game")]
    NoMove { engine: String, fen: String },
}

/// Failure parsing or applying something on a [`crate::GameBoard`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid FEN `{fen}`: {reason}")]
    InvalidFen { fen: String, reason: String },

    #[error("unparseable move `{text}`: {reason}")]
    InvalidMove { text: String, reason: String },

    #[error("move `{text}` is not legal in {fen}")]
    IllegalMove { text: String, fen: String },
}

/// A persisted record that breaks one of the record invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidRecord {
    #[error("NUM_MOVE_PAIRS is {found} but the move log implies {expected}")]
    PlyPairCount { expected: u32, found: u32 },

    #[error("move {index} should be played by {expected}")]
    MoverOrder { index: usize, expected: Side },

    #[error("termination {termination} with winner {winner:?}")]
    Winner {
        termination: Termination,
        winner: Option<Side>,
    },

    #[error("UPSET flag does not match the winner and ratings")]
    UpsetFlag,
}

/// Failure reading or writing the persisted game table.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed game table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("game table row {row} is invalid: {source}")]
    Invalid {
        row: usize,
        #[source]
        source: InvalidRecord,
    },
}
