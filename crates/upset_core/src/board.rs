//! Game board with the draw bookkeeping needed to end engine games.
//!
//! `shakmaty` knows the rules of a single position. Repetition and the
//! distinction between automatic and claimable draws need the game history,
//! which this wrapper keeps.

use std::collections::HashMap;

use shakmaty::fen::Fen;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, MoveList, Position};

use crate::error::BoardError;
use crate::types::{Outcome, Side, Termination};

/// Halfmove clock at which a draw may be claimed
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Halfmove clock at which the game is drawn without a claim
pub const SEVENTYFIVE_MOVE_PLIES: u32 = 150;

/// A game in progress from a given starting position.
#[derive(Debug, Clone)]
pub struct GameBoard {
    pos: Chess,
    /// Occurrences of each position, keyed by FEN without move counters
    seen: HashMap<String, u32>,
}

impl Default for GameBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBoard {
    /// A board in the standard starting position.
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let parsed = fen.parse::<Fen>().map_err(|e| BoardError::InvalidFen {
            fen: fen.to_string(),
            reason: e.to_string(),
        })?;
        let pos: Chess =
            parsed
                .into_position(CastlingMode::Standard)
                .map_err(|e| BoardError::InvalidFen {
                    fen: fen.to_string(),
                    reason: e.to_string(),
                })?;
        Ok(Self::from_position(pos))
    }

    fn from_position(pos: Chess) -> Self {
        let mut board = Self {
            pos,
            seen: HashMap::new(),
        };
        board.mark_seen();
        board
    }

    pub fn position(&self) -> &Chess {
        &self.pos
    }

    pub fn fen(&self) -> String {
        position_fen(&self.pos)
    }

    pub fn turn(&self) -> Side {
        self.pos.turn().into()
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.pos.halfmoves()
    }

    pub fn legal_moves(&self) -> MoveList {
        self.pos.legal_moves()
    }

    /// How many times the current position has occurred in this game.
    pub fn repetitions(&self) -> u32 {
        self.seen.get(&self.repetition_key()).copied().unwrap_or(0)
    }

    /// Parse a move in UCI notation against the current position.
    pub fn parse_uci(&self, text: &str) -> Result<Move, BoardError> {
        let uci = text.parse::<UciMove>().map_err(|e| BoardError::InvalidMove {
            text: text.to_string(),
            reason: e.to_string(),
        })?;
        uci.to_move(&self.pos).map_err(|_| BoardError::IllegalMove {
            text: text.to_string(),
            fen: self.fen(),
        })
    }

    /// Apply a legal move.
    pub fn play(&mut self, mv: Move) -> Result<(), BoardError> {
        if !self.pos.legal_moves().contains(&mv) {
            return Err(BoardError::IllegalMove {
                text: move_text(&mv),
                fen: self.fen(),
            });
        }
        self.pos.play_unchecked(mv);
        self.mark_seen();
        Ok(())
    }

    /// Parse and apply a move in UCI notation.
    pub fn play_uci(&mut self, text: &str) -> Result<Move, BoardError> {
        let mv = self.parse_uci(text)?;
        self.play(mv.clone())?;
        Ok(mv)
    }

    /// True once the game has ended without anyone claiming a draw.
    pub fn is_game_over(&self) -> bool {
        self.outcome(false).is_some()
    }

    /// The result of the game, or `None` while it is still running.
    ///
    /// With `claim_draw` the fifty-move rule and threefold repetition also
    /// end the game, as if the side to move had claimed the draw.
    pub fn outcome(&self, claim_draw: bool) -> Option<Outcome> {
        if self.pos.is_checkmate() {
            return Some(Outcome::checkmate(self.turn().other()));
        }
        if self.pos.is_insufficient_material() {
            return Some(Outcome::draw(Termination::InsufficientMaterial));
        }
        if self.pos.is_stalemate() {
            return Some(Outcome::draw(Termination::Stalemate));
        }

        let halfmoves = self.halfmove_clock();
        let repetitions = self.repetitions();
        if halfmoves >= SEVENTYFIVE_MOVE_PLIES {
            return Some(Outcome::draw(Termination::SeventyfiveMoves));
        }
        if repetitions >= 5 {
            return Some(Outcome::draw(Termination::FivefoldRepetition));
        }

        if claim_draw {
            if halfmoves >= FIFTY_MOVE_PLIES {
                return Some(Outcome::draw(Termination::FiftyMoves));
            }
            if repetitions >= 3 {
                return Some(Outcome::draw(Termination::ThreefoldRepetition));
            }
        }

        None
    }

    fn mark_seen(&mut self) {
        *self.seen.entry(self.repetition_key()).or_insert(0) += 1;
    }

    /// Placement, side to move, castling rights and en passant square.
    fn repetition_key(&self) -> String {
        let fen = self.fen();
        fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
    }
}

/// FEN of a position, listing the en passant square only when the capture is legal.
pub fn position_fen(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

/// A move in UCI long algebraic notation (`e2e4`, `e7e8q`, `e1g1`).
pub fn move_text(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}
