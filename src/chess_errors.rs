//! Errors used throughout the rules core.
//!
//! `ChessError` is the single error type returned by board edits, notation
//! parsing, move application and engine text handling. Every variant names
//! the offending field or value so a UI can show it verbatim.
//!
//! Failures are raised before any state is touched: a caller that receives
//! an error still holds the exact position it had before the call.

use thiserror::Error;

use crate::game_state::chess_types::Color;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    /// A FEN string failed structural validation.
    #[error("invalid FEN ({field}): {reason}")]
    InvalidFen { field: &'static str, reason: String },

    /// A square name was not in `a1..h8`.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// A piece letter or piece description could not be understood.
    #[error("invalid piece: {0}")]
    InvalidPiece(String),

    /// A SAN or coordinate move token could not be matched to any legal move.
    #[error("invalid or illegal move: {0}")]
    InvalidSan(String),

    /// A SAN token matched more than one legal move.
    #[error("ambiguous move: {0}")]
    AmbiguousSan(String),

    /// A structured move request is not legal in the current position.
    #[error("illegal move: {0}")]
    IllegalMove(String),

    /// A promotion was requested for something other than a pawn reaching the last rank.
    #[error("invalid promotion: {0}")]
    InvalidPromotion(String),

    /// `undo_move` was called with no history.
    #[error("no move to undo")]
    EmptyHistory,

    /// A second king of the same color would be placed on the board.
    #[error("{color} already has a king on {square}")]
    DuplicateKing { color: Color, square: String },

    /// PGN text was malformed or contained an illegal move.
    #[error("invalid PGN: {reason}")]
    InvalidPgn { reason: String },

    /// Engine option or UCI-style engine text was malformed.
    #[error("invalid engine text: {0}")]
    InvalidEngineText(String),
}

impl ChessError {
    pub(crate) fn fen(field: &'static str, reason: impl Into<String>) -> Self {
        ChessError::InvalidFen {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn pgn(reason: impl Into<String>) -> Self {
        ChessError::InvalidPgn {
            reason: reason.into(),
        }
    }
}
