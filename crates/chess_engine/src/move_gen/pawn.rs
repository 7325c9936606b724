//! Pawn movement
//!
//! Handles the pawn patterns:
//! - Single forward push to an empty square
//! - Double push from the home rank through two empty squares
//! - Diagonal single-step capture of an enemy piece
//!
//! ## Pawn Movement Rules
//!
//! Pawns are the only piece whose capturing pattern differs from its moving
//! pattern, so two predicates are exposed: [`can_pawn_move`] for legality and
//! [`pawn_attacks`] for attack detection. A pawn attacks its forward diagonals
//! whether or not anything stands there; it never attacks the square in front
//! of it. En passant is not supported.

use crate::board::Board;
use crate::types::*;

/// Check if a pawn of `color` on `from` may move to `to`
///
/// Assumes `to` does not hold a piece of the pawn's own color; that is
/// checked once for every piece kind by the caller.
pub fn can_pawn_move(board: &Board, from: Square, to: Square, color: Color) -> bool {
    let (df, dr) = from.delta_to(to);
    let dir = color.pawn_direction();

    if df == 0 {
        if !board.is_empty(to) {
            return false;
        }
        if dr == dir {
            return true;
        }
        // Double push: intermediate square must also be empty
        if dr == 2 * dir && from.rank() == color.pawn_home_rank() {
            return from
                .offset(0, dir)
                .map(|mid| board.is_empty(mid))
                .unwrap_or(false);
        }
        return false;
    }

    // Diagonal moves are only valid for captures
    df.abs() == 1
        && dr == dir
        && board
            .piece_at(to)
            .map(|target| target.color != color)
            .unwrap_or(false)
}

/// Check if a pawn of `color` on `from` attacks `to`
#[inline]
pub fn pawn_attacks(from: Square, to: Square, color: Color) -> bool {
    let (df, dr) = from.delta_to(to);
    df.abs() == 1 && dr == color.pawn_direction()
}
