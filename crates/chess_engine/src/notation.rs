//! Coordinate move notation
//!
//! Decodes move text of the form `<file><rank><file><rank>[promotion]`
//! (`e2e4`, `e7e8q`). Decoding is purely syntactic: whether the move is
//! playable is decided by [`check_move`](crate::api::check_move).

use std::str::FromStr;

use crate::constants::{FILE_CHARS, RANK_CHARS};
use crate::error::{ChessEngineError, ChessEngineResult};
use crate::types::{Move, PieceKind, Square};

fn square_from_chars(file: char, rank: char) -> Option<Square> {
    let file = FILE_CHARS.iter().position(|&c| c == file)?;
    let rank = RANK_CHARS.iter().position(|&c| c == rank)?;
    Square::new(file as u8, rank as u8)
}

impl FromStr for Square {
    type Err = ChessEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => square_from_chars(file, rank),
            _ => None,
        }
        .ok_or_else(|| ChessEngineError::InvalidSquare {
            input: s.to_string(),
        })
    }
}

/// Parse coordinate move text
///
/// Surrounding whitespace is ignored. The optional fifth character is a
/// promotion letter among `Q R B N` in either case.
///
/// # Errors
///
/// [`ChessEngineError::MalformedMove`] when the text is not 4 or 5 characters,
/// a square is off the board, or the promotion letter is not supported.
///
/// # Examples
///
/// ```
/// use chess_engine::notation::parse_move;
/// use chess_engine::types::PieceKind;
///
/// let mv = parse_move("e7e8n").unwrap();
/// assert_eq!(mv.promotion, Some(PieceKind::Knight));
/// assert!(parse_move("e2e9").is_err());
/// ```
pub fn parse_move(text: &str) -> ChessEngineResult<Move> {
    let input = text.trim();
    let malformed = |reason: &'static str| ChessEngineError::MalformedMove {
        input: input.to_string(),
        reason,
    };

    let chars: Vec<char> = input.chars().collect();
    if chars.len() != 4 && chars.len() != 5 {
        return Err(malformed("expected 4 or 5 characters"));
    }

    let from = square_from_chars(chars[0], chars[1]).ok_or_else(|| malformed("bad source square"))?;
    let to = square_from_chars(chars[2], chars[3])
        .ok_or_else(|| malformed("bad destination square"))?;

    let promotion = match chars.get(4) {
        None => None,
        Some(&c) => {
            let kind = PieceKind::from_fen_char(c)
                .filter(|kind| kind.is_promotable())
                .ok_or_else(|| malformed("unsupported promotion"))?;
            Some(kind)
        }
    };

    Ok(Move::new(from, to, promotion))
}

impl FromStr for Move {
    type Err = ChessEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_move(s)
    }
}
