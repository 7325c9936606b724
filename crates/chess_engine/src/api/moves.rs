//! Move validation and execution
//!
//! Functions for checking move legality and applying moves.

use crate::board::{Board, Position};
use crate::error::{ChessEngineError, ChessEngineResult, IllegalReason};
use crate::move_gen::{king_attacked, matches_pattern};
use crate::types::*;

use super::state::evaluate_termination;

/// Check if a move is legal, and why not if it isn't
///
/// Validates, in order, that:
/// - It is `color`'s turn
/// - Source square contains a piece
/// - Piece belongs to `color`
/// - Move matches the piece's movement pattern
/// - Move doesn't leave `color`'s king attacked
///
/// The last check plays the move on a private copy of the board; `position`
/// itself is never modified.
///
/// # Examples
///
/// ```
/// use chess_engine::api::{check_move, new_game};
/// use chess_engine::error::IllegalReason;
/// use chess_engine::types::Color;
///
/// let game = new_game();
/// assert_eq!(check_move(&game, &"e2e4".parse().unwrap(), Color::White), Ok(()));
/// assert_eq!(
///     check_move(&game, &"e2e5".parse().unwrap(), Color::White),
///     Err(IllegalReason::IllegalPattern)
/// );
/// ```
pub fn check_move(position: &Position, mv: &Move, color: Color) -> Result<(), IllegalReason> {
    if color != position.side_to_move() {
        return Err(IllegalReason::NotYourTurn);
    }

    let piece = position
        .piece_at(mv.from)
        .ok_or(IllegalReason::NoPieceOnSource)?;

    if piece.color != color {
        return Err(IllegalReason::WrongColorPiece);
    }

    if !matches_pattern(position.board(), mv.from, mv.to) {
        return Err(IllegalReason::IllegalPattern);
    }

    // Verify it doesn't leave king in check
    let mut scratch = *position.board();
    place(&mut scratch, mv);
    if king_attacked(&scratch, color) {
        return Err(IllegalReason::KingWouldBeInCheck);
    }

    Ok(())
}

/// Boolean form of [`check_move`]
#[inline]
pub fn is_legal(position: &Position, mv: &Move, color: Color) -> bool {
    check_move(position, mv, color).is_ok()
}

/// Apply a move and evaluate whether the game has ended
///
/// Moves the piece (promoting a pawn that reaches its last rank), hands the
/// turn to the opponent, records the move as played, then runs termination
/// evaluation for the new side to move and stores the result.
///
/// The recorded move carries the promotion that actually happened: a
/// defaulted promotion is recorded as a queen, and a promotion letter on a
/// move that promotes nothing is dropped.
///
/// Legality is the caller's responsibility: run [`check_move`] first.
///
/// # Errors
///
/// - [`ChessEngineError::GameOver`] if the position is already terminal
/// - [`ChessEngineError::NoPieceAtSquare`] if the source square is empty
///
/// Neither error modifies the position.
pub fn apply_move(position: &mut Position, mv: &Move) -> ChessEngineResult<GameResult> {
    if position.is_terminal() {
        return Err(ChessEngineError::GameOver {
            result: position.result(),
        });
    }
    if position.piece_at(mv.from).is_none() {
        return Err(ChessEngineError::NoPieceAtSquare { square: mv.from });
    }

    let promotion = place(position.board_mut(), mv);
    position.record(Move::new(mv.from, mv.to, promotion));

    let result = evaluate_termination(position);
    position.set_result(result);
    Ok(result)
}

/// Move the piece on the board, handling promotion
///
/// A pawn landing on its promotion rank becomes the requested kind, or a
/// queen when none (or an unsupported kind) was requested. Returns the kind
/// promoted to, if any.
pub(crate) fn place(board: &mut Board, mv: &Move) -> Option<PieceKind> {
    let piece = board.take(mv.from)?;

    let promotion = (piece.kind == PieceKind::Pawn && mv.to.rank() == piece.color.promotion_rank())
        .then(|| {
            mv.promotion
                .filter(|kind| kind.is_promotable())
                .unwrap_or(PieceKind::Queen)
        });

    let placed = promotion.map_or(piece, |kind| Piece::new(piece.color, kind));
    board.set(mv.to, Some(placed));
    promotion
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::new_game;

    fn mv(text: &str) -> Move {
        text.parse().unwrap()
    }

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn test_reasons_in_order() {
        let game = new_game();
        assert_eq!(
            check_move(&game, &mv("e7e5"), Color::Black),
            Err(IllegalReason::NotYourTurn)
        );
        assert_eq!(
            check_move(&game, &mv("e4e5"), Color::White),
            Err(IllegalReason::NoPieceOnSource)
        );
        assert_eq!(
            check_move(&game, &mv("e7e5"), Color::White),
            Err(IllegalReason::WrongColorPiece)
        );
        assert_eq!(
            check_move(&game, &mv("e2e5"), Color::White),
            Err(IllegalReason::IllegalPattern)
        );
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        // White bishop on e2 pinned by the rook on e8 against the king on e1
        let position = Position::from_fen("k3r3/8/8/8/8/8/4B3/4K3 w").unwrap();
        assert_eq!(
            check_move(&position, &mv("e2d3"), Color::White),
            Err(IllegalReason::KingWouldBeInCheck)
        );
        assert!(is_legal(&position, &mv("e1d1"), Color::White));
    }

    #[test]
    fn test_king_cannot_step_into_attack() {
        let position = Position::from_fen("k7/8/8/8/8/8/r7/4K3 w").unwrap();
        assert_eq!(
            check_move(&position, &mv("e1e2"), Color::White),
            Err(IllegalReason::KingWouldBeInCheck)
        );
        assert!(is_legal(&position, &mv("e1f1"), Color::White));
    }

    #[test]
    fn test_must_resolve_check() {
        // Black rook on e8 checks the white king on e1
        let position = Position::from_fen("k3r3/8/8/8/8/8/P7/4K3 w").unwrap();
        assert_eq!(
            check_move(&position, &mv("a2a3"), Color::White),
            Err(IllegalReason::KingWouldBeInCheck)
        );
        assert!(is_legal(&position, &mv("e1d2"), Color::White));
    }

    #[test]
    fn test_check_move_leaves_position_untouched() {
        let game = new_game();
        let before = game.clone();
        for text in ["e2e4", "e2e5", "e7e5", "g1f3", "a1a8"] {
            let _ = check_move(&game, &mv(text), Color::White);
        }
        assert_eq!(game, before);
    }

    #[test]
    fn test_apply_move_updates_turn_and_history() {
        let mut game = new_game();
        let result = apply_move(&mut game, &mv("e2e4")).unwrap();
        assert_eq!(result, GameResult::InProgress);
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.history(), &[mv("e2e4")]);
        assert_eq!(game.piece_at(sq("e2")), None);
        assert_eq!(
            game.piece_at(sq("e4")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
    }

    #[test]
    fn test_apply_move_captures() {
        let mut position = Position::from_fen("k7/8/8/3p4/4P3/8/8/K7 w").unwrap();
        apply_move(&mut position, &mv("e4d5")).unwrap();
        assert_eq!(
            position.piece_at(sq("d5")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(position.board().pieces(Color::Black).count(), 1);
    }

    #[test]
    fn test_history_records_promotion_played() {
        let mut position = Position::from_fen("k7/4P3/8/8/8/8/8/K7 w").unwrap();
        apply_move(&mut position, &mv("e7e8")).unwrap();
        assert_eq!(position.history(), &[mv("e7e8q")]);
        assert_eq!(position.history()[0].to_string(), "e7e8q");

        let mut game = new_game();
        apply_move(&mut game, &mv("e2e4q")).unwrap();
        assert_eq!(game.history(), &[mv("e2e4")]);
    }

    #[test]
    fn test_promotion_defaults_to_queen() {
        let mut position = Position::from_fen("k7/4P3/8/8/8/8/8/K7 w").unwrap();
        apply_move(&mut position, &mv("e7e8")).unwrap();
        assert_eq!(
            position.piece_at(sq("e8")),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
    }

    #[test]
    fn test_promotion_honours_requested_kind() {
        let mut position = Position::from_fen("k7/8/8/8/8/8/4p3/7K b").unwrap();
        apply_move(&mut position, &mv("e2e1n")).unwrap();
        assert_eq!(
            position.piece_at(sq("e1")),
            Some(Piece::new(Color::Black, PieceKind::Knight))
        );
    }

    #[test]
    fn test_unsupported_promotion_kind_becomes_queen() {
        let mut position = Position::from_fen("k7/4P3/8/8/8/8/8/K7 w").unwrap();
        let king_promotion = Move::new(sq("e7"), sq("e8"), Some(PieceKind::King));
        apply_move(&mut position, &king_promotion).unwrap();
        assert_eq!(
            position.piece_at(sq("e8")),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
    }

    #[test]
    fn test_promotion_letter_ignored_off_last_rank() {
        let mut game = new_game();
        apply_move(&mut game, &mv("e2e4q")).unwrap();
        assert_eq!(
            game.piece_at(sq("e4")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
    }

    #[test]
    fn test_apply_move_refuses_empty_source() {
        let mut game = new_game();
        let before = game.clone();
        assert_eq!(
            apply_move(&mut game, &mv("e4e5")),
            Err(ChessEngineError::NoPieceAtSquare { square: sq("e4") })
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_apply_move_refuses_finished_game() {
        let mut position = Position::from_fen("7k/8/6K1/7Q/8/8/8/8 w").unwrap();
        apply_move(&mut position, &mv("h5h7")).unwrap();
        assert!(position.is_terminal());
        let before = position.clone();
        assert!(matches!(
            apply_move(&mut position, &mv("g6f6")),
            Err(ChessEngineError::GameOver { .. })
        ));
        assert_eq!(position, before);
    }
}
