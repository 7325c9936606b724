//! King movement
//!
//! Kings move one square in any direction (8 possible destinations, fewer at
//! the edge). Castling is not supported.
//!
//! Whether the destination is attacked is not this module's concern: the
//! king-safety filter in [`check_move`](crate::api::check_move) rejects any
//! move, king moves included, that leaves the mover's king attacked.

use crate::types::Square;

/// Check if `to` is exactly one king step away from `from`
#[inline]
pub fn is_king_step(from: Square, to: Square) -> bool {
    let (df, dr) = from.delta_to(to);
    df.abs().max(dr.abs()) == 1
}
