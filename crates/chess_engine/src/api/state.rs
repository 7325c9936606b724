//! Game state queries
//!
//! Functions for querying check, legal moves and game termination.
//!
//! ## Termination
//!
//! After every applied move the engine asks one question of the new side to
//! move: does it have any legal reply? The search is brute force (every own
//! piece against every one of the 64 squares, each run through the full
//! legality check) which is O(64 × 64) per ply. On an 8×8 board with no clock
//! that is cheap enough, and it reuses exactly the rules that judge submitted
//! moves, so the two can never disagree.
//!
//! "Did the last move give check" and "is the side to move checkmated" are
//! different questions: checkmate is the absence of legal replies while in
//! check, never the mere presence of a check.

use crate::board::Position;
use crate::move_gen::{self, king_attacked, pseudo_candidates};
use crate::types::*;

use super::moves::is_legal;

/// Check if the side to move is in check
///
/// A position without the side-to-move king reports `false`.
pub fn is_in_check(position: &Position) -> bool {
    king_attacked(position.board(), position.side_to_move())
}

/// Check if `square` is attacked by any piece of `by_color`
#[inline]
pub fn is_square_attacked(position: &Position, square: Square, by_color: Color) -> bool {
    move_gen::is_square_attacked(position.board(), square, by_color)
}

/// All legal moves for the side to move
///
/// A pawn move onto the last rank appears once, without a promotion kind;
/// playing it promotes to a queen.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let color = position.side_to_move();
    pseudo_candidates(position.board(), color)
        .filter(|mv| is_legal(position, mv, color))
        .collect()
}

/// Check if the side to move has at least one legal move
pub fn has_any_legal_move(position: &Position) -> bool {
    let color = position.side_to_move();
    pseudo_candidates(position.board(), color).any(|mv| is_legal(position, &mv, color))
}

/// Decide the result of `position` for its side to move
///
/// - No legal move and king attacked: the opponent wins (checkmate)
/// - No legal move and king safe: draw (stalemate)
/// - Side to move has no king at all: the opponent wins
/// - Otherwise the game is still in progress
pub fn evaluate_termination(position: &Position) -> GameResult {
    let mover = position.side_to_move();
    let opponent = mover.opponent();

    let Some(king) = position.board().find_king(mover) else {
        return GameResult::win_for(opponent);
    };

    if has_any_legal_move(position) {
        return GameResult::InProgress;
    }

    if move_gen::is_square_attacked(position.board(), king, opponent) {
        GameResult::win_for(opponent)
    } else {
        GameResult::Draw
    }
}

/// How a finished game ended, `None` while it is in progress
pub fn termination(position: &Position) -> Option<Termination> {
    match position.result() {
        GameResult::InProgress => None,
        GameResult::Draw => Some(Termination::Stalemate),
        GameResult::WhiteWins | GameResult::BlackWins => Some(Termination::Checkmate),
    }
}
