//! Error types for chess engine
//!
//! Provides custom error types for chess engine operations including
//! move text decoding, position setup and move application.
//!
//! Two families are kept apart:
//! - [`ChessEngineError`] for inputs the engine cannot work with at all
//!   (undecodable text, a move applied to a finished game)
//! - [`IllegalReason`] for well-formed moves the rules reject; these are an
//!   ordinary outcome of play and never change the position

use thiserror::Error;

use crate::types::{GameResult, Square};

/// Errors that can occur in the chess engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessEngineError {
    /// Move text does not decode to a move
    #[error("Malformed move {input:?}: {reason}")]
    MalformedMove { input: String, reason: &'static str },

    /// Square text does not name a square
    #[error("Invalid square {input:?} (expected a-h followed by 1-8)")]
    InvalidSquare { input: String },

    /// Position text could not be decoded
    #[error("Invalid FEN {fen:?}: {reason}")]
    InvalidFen { fen: String, reason: &'static str },

    /// No piece at source square
    #[error("No piece at source square {square}")]
    NoPieceAtSquare { square: Square },

    /// The game has already ended
    #[error("Game is over ({result}), no further moves can be applied")]
    GameOver { result: GameResult },
}

/// Result type alias for chess engine operations
pub type ChessEngineResult<T> = Result<T, ChessEngineError>;

/// Why a move was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IllegalReason {
    #[error("it is not your turn")]
    NotYourTurn,

    #[error("no piece on source square")]
    NoPieceOnSource,

    #[error("piece on source square belongs to the opponent")]
    WrongColorPiece,

    #[error("piece cannot move that way")]
    IllegalPattern,

    #[error("move would leave the king in check")]
    KingWouldBeInCheck,

    /// Kept for wire compatibility; never produced by this engine, since a
    /// [`Square`] can only hold valid coordinates
    #[error("coordinates do not name a square")]
    BadCoordinates,

    #[error("move text could not be decoded")]
    MalformedMove,
}

impl IllegalReason {
    /// Stable snake_case identifier used on the wire
    pub fn code(self) -> &'static str {
        match self {
            IllegalReason::NotYourTurn => "not_your_turn",
            IllegalReason::NoPieceOnSource => "no_piece_on_source",
            IllegalReason::WrongColorPiece => "wrong_color_piece",
            IllegalReason::IllegalPattern => "illegal_pattern",
            IllegalReason::KingWouldBeInCheck => "king_would_be_in_check",
            IllegalReason::BadCoordinates => "bad_coordinates",
            IllegalReason::MalformedMove => "malformed_move",
        }
    }
}
