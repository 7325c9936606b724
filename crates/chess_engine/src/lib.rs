//! # Chess rules engine
//!
//! Board representation, coordinate move parsing, legality checking and
//! check/checkmate/stalemate detection for standard chess without castling,
//! en passant or draw rules.
//!
//! Everything here is synchronous and side-effect free apart from
//! [`api::apply_move`], the single operation that advances a
//! [`board::Position`]. A host that shares one position between several
//! connections must serialize calls to it.
//!
//! ```
//! use chess_engine::api::{apply_move, check_move, new_game};
//! use chess_engine::notation::parse_move;
//! use chess_engine::types::{Color, GameResult};
//!
//! let mut game = new_game();
//! let mv = parse_move("e2e4").unwrap();
//! check_move(&game, &mv, Color::White).unwrap();
//! assert_eq!(apply_move(&mut game, &mv).unwrap(), GameResult::InProgress);
//! assert_eq!(game.side_to_move(), Color::Black);
//! ```

pub mod api;
pub mod board;
pub mod constants;
pub mod error;
pub mod move_gen;
pub mod notation;
pub mod types;

pub use board::{Board, Position};
pub use error::{ChessEngineError, ChessEngineResult, IllegalReason};
pub use types::{Color, GameResult, Move, Piece, PieceKind, Square, Termination};
