//! # Chess Engine Constants - Board Geometry & Notation
//!
//! ## Overview
//!
//! This module centralizes the fixed values the rules engine is built on: the
//! board dimensions, the coordinate alphabet used by move text, the starting
//! layout, and the movement offsets of every piece kind.
//!
//! ## Direction Vectors
//!
//! Movement is expressed as `(file_delta, rank_delta)` pairs rather than
//! offsets into a flat 0-63 array. Working in two dimensions means a step off
//! the edge of the board is detected by a simple bounds check on the resulting
//! coordinates; there is no need to guard against an offset of `+1` silently
//! wrapping from the h-file onto the a-file of the next rank.
//!
//! - **Rook**: the four orthogonal unit steps
//! - **Bishop**: the four diagonal unit steps
//! - **Queen**: the union of both
//! - **Knight**: the eight L-shaped jumps (2+1 / 1+2)
//! - **King**: the eight unit steps, identical to the queen directions but
//!   applied only once
//!
//! ## Snapshot Placeholders
//!
//! Snapshots sent to players use FEN. Castling rights, the en-passant target and
//! the move clocks are not tracked by this engine, so those FEN fields are
//! emitted as the fixed placeholder [`FEN_UNTRACKED_FIELDS`].

use crate::types::PieceKind;

/// Number of files (and ranks) on the board
pub const BOARD_SIZE: i8 = 8;

/// Number of squares on the board
pub const SQUARE_COUNT: usize = 64;

/// File letters in coordinate notation, a-file first
pub const FILE_CHARS: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Rank digits in coordinate notation, first rank first
pub const RANK_CHARS: [char; 8] = ['1', '2', '3', '4', '5', '6', '7', '8'];

/// Back-rank layout from the a-file to the h-file
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Orthogonal unit steps
pub const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Diagonal unit steps
pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Orthogonal and diagonal unit steps
pub const QUEEN_DIRS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// The eight L-shaped knight jumps
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Piece kinds a pawn may be promoted to
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// FEN fields the engine does not track: castling, en passant, halfmove and fullmove clocks
pub const FEN_UNTRACKED_FIELDS: &str = "- - 0 1";

/// FEN of the standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";
