//! Knight movement
//!
//! Knights move in an L-shape pattern: 2 squares in one direction, then 1
//! square perpendicular (or vice versa). They jump, so occupancy of the
//! squares in between never matters.

use crate::constants::KNIGHT_OFFSETS;
use crate::types::Square;

/// Check if `to` is one knight jump away from `from`
#[inline]
pub fn is_knight_jump(from: Square, to: Square) -> bool {
    KNIGHT_OFFSETS.contains(&from.delta_to(to))
}

