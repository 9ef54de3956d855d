//! Engine upset simulator
//!
//! This crate provides infrastructure for:
//! - Playing games between two strength-limited engine sessions
//! - Counting upsets, decisive games won by the lower-rated side
//! - Breaking upsets down by rating gap against Elo expectations
//!
//! # Usage
//!
//! ```bash
//! # Simulate 100 games with Stockfish on PATH (or load chess_moves.json)
//! cargo run -p upsets -- run --trials 100 --engine stockfish
//!
//! # Print the report for an existing table
//! cargo run -p upsets -- report --input chess_moves.json
//! ```

mod config;
mod elo;
mod report;
mod simulation;
mod summary;

#[cfg(test)]
mod config_tests;
#[cfg(test)]
mod report_tests;
#[cfg(test)]
mod summary_tests;

pub use config::*;
pub use elo::*;
pub use report::*;
pub use simulation::*;
pub use summary::*;
