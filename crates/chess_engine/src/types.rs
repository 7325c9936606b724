//! # Chess Engine Core Types
//!
//! ## Overview
//!
//! This module defines the value types the rules engine works with:
//!
//! 1. [`Color`] - the two sides, with the pawn geometry that depends on them
//! 2. [`PieceKind`] / [`Piece`] - what occupies a square
//! 3. [`Square`] - a validated `(file, rank)` coordinate
//! 4. [`Move`] - a source/destination pair with an optional promotion kind
//! 5. [`GameResult`] / [`Termination`] - how (and whether) a game ended
//!
//! All of them are small `Copy` values. A [`Square`] can only be constructed
//! through checked constructors, so every `Square` in the engine names a real
//! square and indexing the 64-cell board with it cannot go out of bounds.
//!
//! ## Coordinates
//!
//! Files and ranks are both zero based: `a1` is `(0, 0)` and `h8` is `(7, 7)`.
//! The flat index used by the board is `rank * 8 + file`, so `a1 = 0`,
//! `h1 = 7`, `a8 = 56` and `h8 = 63`.

use std::fmt;

use crate::constants::*;

/// One of the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The other side
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a single pawn step
    #[inline]
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank pawns start on (and may double-step from)
    #[inline]
    pub fn pawn_home_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank on which pawns promote
    #[inline]
    pub fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank holding this side's pieces in the starting position
    #[inline]
    pub fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// FEN side-to-move letter
    pub fn fen_char(self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// The six kinds of chess piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Upper-case FEN letter
    pub fn fen_char(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Parse a FEN letter of either case
    pub fn from_fen_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Whether a pawn may promote to this kind
    #[inline]
    pub fn is_promotable(self) -> bool {
        PROMOTION_KINDS.contains(&self)
    }
}

/// A colored piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }

    /// FEN letter: upper case for white, lower case for black
    pub fn fen_char(self) -> char {
        let c = self.kind.fen_char();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Parse a FEN letter, deriving the color from its case
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(color, kind))
    }
}

/// A square on the board
///
/// Constructed only through [`Square::new`], [`Square::from_index`] or parsing,
/// so both coordinates are always in `0..8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Build a square from zero-based file and rank
    pub fn new(file: u8, rank: u8) -> Option<Square> {
        if file < BOARD_SIZE as u8 && rank < BOARD_SIZE as u8 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// Build a square from its flat index (`rank * 8 + file`)
    pub fn from_index(index: usize) -> Option<Square> {
        if index < SQUARE_COUNT {
            Some(Square {
                file: (index % 8) as u8,
                rank: (index / 8) as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Flat index into the 64-cell board
    #[inline]
    pub fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    /// The square `(df, dr)` away, if it is still on the board
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file as i8 + df;
        let rank = self.rank as i8 + dr;
        if (0..BOARD_SIZE).contains(&file) && (0..BOARD_SIZE).contains(&rank) {
            Some(Square {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Signed `(file, rank)` distance from `self` to `other`
    #[inline]
    pub fn delta_to(self, other: Square) -> (i8, i8) {
        (
            other.file as i8 - self.file as i8,
            other.rank as i8 - self.rank as i8,
        )
    }

    /// All 64 squares, a1 first and h8 last
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARE_COUNT).filter_map(Square::from_index)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            FILE_CHARS[self.file as usize],
            RANK_CHARS[self.rank as usize]
        )
    }
}

/// A move in coordinate form
///
/// `promotion` only matters when a pawn reaches its last rank; when it is
/// `None` there the engine promotes to a queen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> Self {
        Move {
            from,
            to,
            promotion,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.fen_char().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameResult {
    #[default]
    InProgress,
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameResult {
    /// A decisive result in favour of `color`
    pub fn win_for(color: Color) -> GameResult {
        match color {
            Color::White => GameResult::WhiteWins,
            Color::Black => GameResult::BlackWins,
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self != GameResult::InProgress
    }

    /// The winning side, if the result is decisive
    pub fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::InProgress | GameResult::Draw => None,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameResult::InProgress => "*",
            GameResult::WhiteWins => "1-0",
            GameResult::BlackWins => "0-1",
            GameResult::Draw => "1/2-1/2",
        };
        write!(f, "{}", text)
    }
}

/// Why a terminal position is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Side to move has no legal move and is in check (or has lost its king)
    Checkmate,
    /// Side to move has no legal move and is not in check
    Stalemate,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Checkmate => write!(f, "checkmate"),
            Termination::Stalemate => write!(f, "stalemate"),
        }
    }
}
