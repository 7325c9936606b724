//! Public API for the rules engine
//!
//! Provides the operations a game host needs: create a game, decide whether a
//! move is legal, apply it, and query check and termination.
//!
//! ## Module Organization
//!
//! - `game` - Game lifecycle (new_game)
//! - `moves` - Move validation and execution (check_move, is_legal, apply_move)
//! - `state` - Game state queries (is_in_check, legal_moves, termination)

mod game;
mod moves;
mod state;

pub use game::new_game;
pub use moves::{apply_move, check_move, is_legal};
pub use state::{
    evaluate_termination, has_any_legal_move, is_in_check, is_square_attacked, legal_moves,
    termination,
};
