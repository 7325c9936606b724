//! Board model
//!
//! Provides the two containers the rest of the engine works on:
//! - [`Board`]: the 64 cells and nothing else; cheap to copy, used as the
//!   scratch space for "play it and see" legality checks
//! - [`Position`]: a board plus side to move, move history and result
//!
//! A `Position` is only ever advanced through
//! [`apply_move`](crate::api::apply_move); the mutators here are crate-private
//! except for [`Position::set_piece`], which exists for building fixtures.

use crate::constants::*;
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::*;

/// Piece placement on the 64 squares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; SQUARE_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Board {
            cells: [None; SQUARE_COUNT],
        }
    }
}

impl Board {
    /// Board with no pieces
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard starting layout
    pub fn starting() -> Self {
        let mut board = Board::empty();
        for color in [Color::White, Color::Black] {
            for (file, &kind) in BACK_RANK.iter().enumerate() {
                if let Some(sq) = Square::new(file as u8, color.back_rank()) {
                    board.set(sq, Some(Piece::new(color, kind)));
                }
                if let Some(sq) = Square::new(file as u8, color.pawn_home_rank()) {
                    board.set(sq, Some(Piece::new(color, PieceKind::Pawn)));
                }
            }
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.cells[square.index()].is_none()
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.index()] = piece;
    }

    /// Remove and return the occupant of `square`
    #[inline]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.index()].take()
    }

    /// Every piece of `color` with its square
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(piece) if piece.color == color => Some((sq, piece)),
            _ => None,
        })
    }

    /// Locate the king of `color`
    ///
    /// Returns `None` only for hand-built positions without that king.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// FEN piece-placement field, eighth rank first
    pub fn placement(&self) -> String {
        let mut rows = Vec::with_capacity(8);
        for rank in (0..BOARD_SIZE as u8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..BOARD_SIZE as u8 {
                match Square::new(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push(piece.fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }
        rows.join("/")
    }
}

/// A game position: board, side to move, history and result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    history: Vec<Move>,
    result: GameResult,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// Standard starting position, white to move
    pub fn new() -> Self {
        Position {
            board: Board::starting(),
            side_to_move: Color::White,
            history: Vec::new(),
            result: GameResult::InProgress,
        }
    }

    /// Position with no pieces; populate it with [`Position::set_piece`]
    pub fn empty(side_to_move: Color) -> Self {
        Position {
            board: Board::empty(),
            side_to_move,
            history: Vec::new(),
            result: GameResult::InProgress,
        }
    }

    /// Build a position from the placement and side-to-move fields of a FEN
    ///
    /// Remaining fields are accepted but ignored.
    pub fn from_fen(fen: &str) -> ChessEngineResult<Self> {
        let invalid = |reason: &'static str| ChessEngineError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };

        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or_else(|| invalid("empty"))?;
        let side = match fields.next() {
            Some("w") | None => Color::White,
            Some("b") => Color::Black,
            Some(_) => return Err(invalid("side to move must be w or b")),
        };

        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != BOARD_SIZE as usize {
            return Err(invalid("expected 8 ranks"));
        }

        let mut position = Position::empty(side);
        for (i, row) in rows.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0u8;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as u8;
                    continue;
                }
                let piece = Piece::from_fen_char(c).ok_or_else(|| invalid("unknown piece letter"))?;
                let sq = Square::new(file, rank).ok_or_else(|| invalid("rank too long"))?;
                position.board.set(sq, Some(piece));
                file += 1;
            }
            if file != BOARD_SIZE as u8 {
                return Err(invalid("rank does not cover 8 files"));
            }
        }
        Ok(position)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    /// Place or clear a piece while setting up a position
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.board.set(square, piece);
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Moves applied so far, oldest first
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[inline]
    pub fn result(&self) -> GameResult {
        self.result
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.result.is_terminal()
    }

    /// Snapshot sent to players
    ///
    /// Untracked FEN fields are emitted as fixed placeholders.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {}",
            self.board.placement(),
            self.side_to_move.fen_char(),
            FEN_UNTRACKED_FIELDS
        )
    }

    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub(crate) fn record(&mut self, mv: Move) {
        self.history.push(mv);
        self.side_to_move = self.side_to_move.opponent();
    }

    pub(crate) fn set_result(&mut self, result: GameResult) {
        self.result = result;
    }
}
