//! Sliding piece movement
//!
//! Common functionality for sliding pieces (bishops, rooks, queens).
//! These pieces can move multiple squares in a direction until blocked.
//!
//! ## Algorithm
//!
//! Given a source and a destination we:
//! 1. Reduce the displacement to a unit step `(signum(df), signum(dr))`
//! 2. Reject it unless the step is one of the piece's directions and the
//!    displacement is a whole number of steps (straight line or true diagonal)
//! 3. Walk the squares strictly between source and destination; the first
//!    occupied one blocks the ray
//!
//! The destination itself is not inspected, so the same check serves both
//! movement (where the caller rejects own-color targets) and attack detection
//! (where any occupant of the target is attacked).

use crate::board::Board;
use crate::constants::{BISHOP_DIRS, QUEEN_DIRS, ROOK_DIRS};
use crate::types::{PieceKind, Square};

/// Directions a sliding piece moves in, `None` for non-sliders
pub fn slider_dirs(kind: PieceKind) -> Option<&'static [(i8, i8)]> {
    match kind {
        PieceKind::Bishop => Some(&BISHOP_DIRS),
        PieceKind::Rook => Some(&ROOK_DIRS),
        PieceKind::Queen => Some(&QUEEN_DIRS),
        _ => None,
    }
}

/// Check that `to` lies on one of `dirs` from `from` with nothing in between
pub fn is_ray_clear(board: &Board, from: Square, to: Square, dirs: &[(i8, i8)]) -> bool {
    let (df, dr) = from.delta_to(to);
    if df == 0 && dr == 0 {
        return false;
    }
    if df != 0 && dr != 0 && df.abs() != dr.abs() {
        return false;
    }

    let step = (df.signum(), dr.signum());
    if !dirs.contains(&step) {
        return false;
    }

    let mut current = from.offset(step.0, step.1);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if !board.is_empty(sq) {
            return false; // Path is blocked
        }
        current = sq.offset(step.0, step.1);
    }

    false
}
