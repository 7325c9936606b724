//! Movement patterns and attack detection
//!
//! This module answers the purely geometric questions the rules engine asks:
//! can this piece travel from here to there on this board, and is this square
//! attacked. King safety is layered on top by [`crate::api`].
//!
//! Each piece kind lives in its own submodule; [`matches_pattern`] dispatches
//! to them after the checks shared by every kind (a piece on the source, a
//! real displacement, no own piece on the destination).

mod attack;
mod king;
mod knight;
mod pawn;
mod sliding;

pub use attack::{is_square_attacked, king_attacked};

use crate::board::Board;
use crate::types::*;

/// Check if the piece on `from` may travel to `to` under its movement pattern
///
/// Ignores whose turn it is and whether the mover's king ends up attacked.
pub fn matches_pattern(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.piece_at(from) else {
        return false;
    };
    if from == to {
        return false;
    }
    if board
        .piece_at(to)
        .map(|target| target.color == piece.color)
        .unwrap_or(false)
    {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => pawn::can_pawn_move(board, from, to, piece.color),
        PieceKind::Knight => knight::is_knight_jump(from, to),
        PieceKind::King => king::is_king_step(from, to),
        kind => sliding::slider_dirs(kind)
            .map(|dirs| sliding::is_ray_clear(board, from, to, dirs))
            .unwrap_or(false),
    }
}

/// Every source/destination pair for the pieces of `color`
///
/// Brute force: each own piece is paired
/// with all 64 squares, before any pattern or king-safety filtering.
pub fn pseudo_candidates(board: &Board, color: Color) -> impl Iterator<Item = Move> + '_ {
    board.pieces(color).flat_map(|(from, _)| {
        Square::all()
            .filter(move |&to| to != from)
            .map(move |to| Move::new(from, to, None))
    })
}
