//! Records produced by a simulation run.
//!
//! Field names on the wire follow the original table layout
//! (`FEN`, `MOVES_DF`, `NUM_MOVE_PAIRS`, ...), so files written by older runs
//! keep their column headers.

use std::fmt;

use serde::{Deserialize, Serialize};
use shakmaty::Color;

use crate::error::InvalidRecord;

/// The side to move or the side that made a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::White => "WHITE",
            Side::Black => "BLACK",
        }
    }
}

impl From<Color> for Side {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Side::White,
            Color::Black => Side::Black,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of how a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerminationKind {
    Checkmate,
    Stalemate,
    DrawByRule,
    Other,
}

/// The rule under which a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Termination {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    SeventyfiveMoves,
    FivefoldRepetition,
    /// Claimable draw: halfmove clock reached 100.
    FiftyMoves,
    /// Claimable draw: position seen for the third time.
    ThreefoldRepetition,
    /// Adjudicated after the configured ply cap.
    MoveLimit,
}

impl Termination {
    /// Every termination, in the order reports list them.
    pub const ALL: [Termination; 8] = [
        Termination::Checkmate,
        Termination::Stalemate,
        Termination::InsufficientMaterial,
        Termination::SeventyfiveMoves,
        Termination::FivefoldRepetition,
        Termination::FiftyMoves,
        Termination::ThreefoldRepetition,
        Termination::MoveLimit,
    ];

    pub fn kind(self) -> TerminationKind {
        match self {
            Termination::Checkmate => TerminationKind::Checkmate,
            Termination::Stalemate => TerminationKind::Stalemate,
            Termination::InsufficientMaterial
            | Termination::SeventyfiveMoves
            | Termination::FivefoldRepetition
            | Termination::FiftyMoves
            | Termination::ThreefoldRepetition => TerminationKind::DrawByRule,
            Termination::MoveLimit => TerminationKind::Other,
        }
    }

    pub fn is_decisive(self) -> bool {
        self == Termination::Checkmate
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Termination::Checkmate => "CHECKMATE",
            Termination::Stalemate => "STALEMATE",
            Termination::InsufficientMaterial => "INSUFFICIENT_MATERIAL",
            Termination::SeventyfiveMoves => "SEVENTYFIVE_MOVES",
            Termination::FivefoldRepetition => "FIVEFOLD_REPETITION",
            Termination::FiftyMoves => "FIFTY_MOVES",
            Termination::ThreefoldRepetition => "THREEFOLD_REPETITION",
            Termination::MoveLimit => "MOVE_LIMIT",
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a finished game ended: the rule, plus the winner for checkmates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub termination: Termination,
    pub winner: Option<Side>,
}

impl Outcome {
    pub fn checkmate(winner: Side) -> Self {
        Self {
            termination: Termination::Checkmate,
            winner: Some(winner),
        }
    }

    pub fn draw(termination: Termination) -> Self {
        Self {
            termination,
            winner: None,
        }
    }
}

/// Whether a game was won by the lower-rated side.
///
/// Persisted as `true` / `false` / `null`, `null` meaning the game had no
/// winner and is excluded from upset statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum UpsetStatus {
    Upset,
    NotUpset,
    NotApplicable,
}

impl UpsetStatus {
    /// Classify a finished game. Equal ratings are never an upset.
    pub fn classify(winner: Option<Side>, white_elo: u32, black_elo: u32) -> Self {
        let (winner_elo, loser_elo) = match winner {
            Some(Side::White) => (white_elo, black_elo),
            Some(Side::Black) => (black_elo, white_elo),
            None => return UpsetStatus::NotApplicable,
        };
        if winner_elo < loser_elo {
            UpsetStatus::Upset
        } else {
            UpsetStatus::NotUpset
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        self.into()
    }
}

impl From<Option<bool>> for UpsetStatus {
    fn from(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => UpsetStatus::Upset,
            Some(false) => UpsetStatus::NotUpset,
            None => UpsetStatus::NotApplicable,
        }
    }
}

impl From<UpsetStatus> for Option<bool> {
    fn from(status: UpsetStatus) -> Self {
        match status {
            UpsetStatus::Upset => Some(true),
            UpsetStatus::NotUpset => Some(false),
            UpsetStatus::NotApplicable => None,
        }
    }
}

impl fmt::Display for UpsetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UpsetStatus::Upset => "True",
            UpsetStatus::NotUpset => "False",
            UpsetStatus::NotApplicable => "N/A",
        })
    }
}

/// One ply of a simulated game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    #[serde(rename = "FEN_BEFORE_MOVE")]
    pub position_before_move: String,
    #[serde(rename = "MOVE_MADE")]
    pub move_text: String,
    #[serde(rename = "TURN")]
    pub mover: Side,
}

/// One simulated game. Built once when the game ends and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(rename = "FEN")]
    pub final_position: String,
    #[serde(rename = "MOVES_DF")]
    pub move_log: Vec<MoveRecord>,
    #[serde(rename = "NUM_MOVE_PAIRS")]
    pub ply_pair_count: u32,
    #[serde(rename = "RESULT")]
    pub termination: Termination,
    #[serde(rename = "WINNER")]
    pub winner: Option<Side>,
    #[serde(rename = "WHITE_ELO")]
    pub white_elo: u32,
    #[serde(rename = "BLACK_ELO")]
    pub black_elo: u32,
    #[serde(rename = "UPSET")]
    pub upset: UpsetStatus,
}

impl GameRecord {
    /// Assemble a record from a finished game.
    ///
    /// The winner is only kept for checkmates; every other termination is a
    /// game without a winner.
    pub fn from_game(
        final_position: String,
        move_log: Vec<MoveRecord>,
        outcome: Outcome,
        white_elo: u32,
        black_elo: u32,
    ) -> Self {
        let winner = if outcome.termination.is_decisive() {
            outcome.winner
        } else {
            None
        };
        let ply_pair_count = ply_pairs(move_log.len());
        Self {
            final_position,
            move_log,
            ply_pair_count,
            termination: outcome.termination,
            winner,
            white_elo,
            black_elo,
            upset: UpsetStatus::classify(winner, white_elo, black_elo),
        }
    }

    pub fn is_decisive(&self) -> bool {
        self.winner.is_some()
    }

    pub fn elo(&self, side: Side) -> u32 {
        match side {
            Side::White => self.white_elo,
            Side::Black => self.black_elo,
        }
    }

    /// Absolute rating difference between the two sides.
    pub fn rating_gap(&self) -> u32 {
        self.white_elo.abs_diff(self.black_elo)
    }

    /// The lower-rated side, or `None` for equal ratings.
    pub fn underdog(&self) -> Option<Side> {
        match self.white_elo.cmp(&self.black_elo) {
            std::cmp::Ordering::Less => Some(Side::White),
            std::cmp::Ordering::Greater => Some(Side::Black),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Check the structural invariants of a record read back from storage.
    pub fn validate(&self) -> Result<(), InvalidRecord> {
        let expected = ply_pairs(self.move_log.len());
        if self.ply_pair_count != expected {
            return Err(InvalidRecord::PlyPairCount {
                expected,
                found: self.ply_pair_count,
            });
        }

        // Games start from the standard position, so White always moves on even plies.
        for (index, record) in self.move_log.iter().enumerate() {
            let expected = if index % 2 == 0 { Side::White } else { Side::Black };
            if record.mover != expected {
                return Err(InvalidRecord::MoverOrder { index, expected });
            }
        }

        if self.termination.is_decisive() != self.winner.is_some() {
            return Err(InvalidRecord::Winner {
                termination: self.termination,
                winner: self.winner,
            });
        }

        if self.upset != UpsetStatus::classify(self.winner, self.white_elo, self.black_elo) {
            return Err(InvalidRecord::UpsetFlag);
        }

        Ok(())
    }
}

/// Number of move pairs covering `plies` half-moves; a trailing White move
/// counts as a pair of its own.
pub fn ply_pairs(plies: usize) -> u32 {
    plies.div_ceil(2) as u32
}
