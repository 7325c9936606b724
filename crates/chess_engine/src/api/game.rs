//! Game lifecycle management
//!
//! Creating games.

use crate::board::Position;

/// Create a new game with initial position, white to move
pub fn new_game() -> Position {
    Position::new()
}
