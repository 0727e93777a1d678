use std::fmt;

use crate::chess::piece::PieceId;
use crate::core::position::Position;

/// A candidate move: `piece` goes from `from` to `to`, removing `captured`
/// first if set.
///
/// Moves are computed fresh from a board and consumed right away. Since piece
/// ids survive cloning, a move from a board applies to that board's clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub to: Position,
    pub captured: Option<PieceId>,
    pub piece: PieceId,
    pub from: Position,
}

impl Move {
    #[inline]
    pub fn quiet(piece: PieceId, from: Position, to: Position) -> Self {
        Self {
            to,
            captured: None,
            piece,
            from,
        }
    }

    #[inline]
    pub fn capture(piece: PieceId, from: Position, to: Position, captured: PieceId) -> Self {
        Self {
            to,
            captured: Some(captured),
            piece,
            from,
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{sep}{}", self.from, self.to)
    }
}
