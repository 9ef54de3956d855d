//! UCI client for external chess engines
//!
//! Each [`UciEngine`] owns one engine process for one side of one game.
//! Sessions are configured through `setoption` (strength via
//! `UCI_LimitStrength` / `UCI_Elo`) and queried with
//! `position fen ...` followed by `go`.
//!
//! ```no_run
//! use uci_client::{EngineCommand, UciLauncher};
//! use upset_core::EngineLauncher;
//!
//! let launcher = UciLauncher::new(EngineCommand::new("stockfish")).with_option("Threads", "1");
//! let engine = launcher.launch(1500, 0).expect("stockfish on PATH");
//! ```

mod engine;
mod launcher;
pub mod protocol;


pub use engine::*;
pub use launcher::*;
