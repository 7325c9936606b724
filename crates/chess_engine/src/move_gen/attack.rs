//! Attack detection and square checking
//!
//! Provides functions to check if squares are under attack and if kings are in check.
//! This module is critical for move legality validation and check detection.
//!
//! ## Algorithm
//!
//! To check if a square is attacked, we iterate through all pieces of the
//! attacking color and verify if any can reach the target square under its
//! attack pattern. Pawns attack only their two forward diagonals; sliders are
//! blocked by the first occupant of the ray.
//!
//! Nothing here calls back into legality checking, so attack detection can be
//! used freely from inside the king-safety filter.

use super::king::is_king_step;
use super::knight::is_knight_jump;
use super::pawn::pawn_attacks;
use super::sliding::{is_ray_clear, slider_dirs};
use crate::board::Board;
use crate::types::*;

/// Check if a square is under attack by pieces of the specified color
///
/// This function determines if any piece of `by_color` can attack the target
/// square. It's used for:
/// - Check detection (is the king attacked?)
/// - Move legality (does this move leave the king in check?)
///
/// # Examples
///
/// ```
/// use chess_engine::board::Board;
/// use chess_engine::move_gen::is_square_attacked;
/// use chess_engine::types::Color;
///
/// let board = Board::starting();
/// // f3 is covered by the g1 knight and the e2/g2 pawns
/// assert!(is_square_attacked(&board, "f3".parse().unwrap(), Color::White));
/// assert!(!is_square_attacked(&board, "e4".parse().unwrap(), Color::White));
/// ```
pub fn is_square_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    board
        .pieces(by_color)
        .any(|(from, piece)| piece_attacks(board, from, piece, square))
}

/// Check if `piece` standing on `from` attacks `target`
fn piece_attacks(board: &Board, from: Square, piece: Piece, target: Square) -> bool {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(from, target, piece.color),
        PieceKind::Knight => is_knight_jump(from, target),
        PieceKind::King => is_king_step(from, target),
        kind => slider_dirs(kind)
            .map(|dirs| is_ray_clear(board, from, target, dirs))
            .unwrap_or(false),
    }
}

/// Check if the king of a given color is attacked by the opponent
///
/// A board without that king reports `false`.
pub fn king_attacked(board: &Board, color: Color) -> bool {
    board
        .find_king(color)
        .map(|king| is_square_attacked(board, king, color.opponent()))
        .unwrap_or(false)
}
