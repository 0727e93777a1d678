use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::coord::Coord;
use crate::error::{ChessError, ChessResult};

const FILES: &[u8; 8] = b"ABCDEFGH";

/// A square on the 8x8 board as a `(column, row)` pair, both in `1..=8`.
///
/// Column 1 is file `A`, row 1 is White's back rank. A `Position` can only be
/// built through validation, so every value lies on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    col: u8,
    row: u8,
}

impl Position {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 8;

    pub fn new(col: i32, row: i32) -> ChessResult<Self> {
        Self::from_coord(Coord::new(col, row))
            .ok_or_else(|| ChessError::parse("position", format!("[{col}, {row}]")))
    }

    /// Callers guarantee both components are in `1..=8`.
    pub(crate) const fn at(col: u8, row: u8) -> Self {
        debug_assert!(col >= 1 && col <= 8 && row >= 1 && row <= 8);
        Self { col, row }
    }

    #[inline]
    pub fn col(self) -> i32 {
        self.col as i32
    }

    #[inline]
    pub fn row(self) -> i32 {
        self.row as i32
    }

    #[inline]
    pub fn coord(self) -> Coord {
        Coord::new(self.col(), self.row())
    }

    #[inline]
    pub fn from_coord(c: Coord) -> Option<Self> {
        let on_board = |n: i32| (Self::MIN..=Self::MAX).contains(&n);
        if on_board(c.x) && on_board(c.y) {
            Some(Self::at(c.x as u8, c.y as u8))
        } else {
            None
        }
    }

    /// The square `delta` away, or `None` if that falls off the board.
    #[inline]
    pub fn offset(self, delta: Coord) -> Option<Self> {
        Self::from_coord(self.coord() + delta)
    }

    #[inline]
    pub fn is_adjacent(self, other: Position) -> bool {
        let dx = (other.col() - self.col()).abs();
        let dy = (other.row() - self.row()).abs();
        dx.max(dy) == 1
    }

    /// Every square, A1, A2, ... H8.
    pub fn all() -> impl Iterator<Item = Position> {
        (1..=8u8).flat_map(|col| (1..=8u8).map(move |row| Position::at(col, row)))
    }

    fn parse_str(s: &str) -> ChessResult<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(ChessError::parse("position", s));
        }

        let rank = match bytes[1] {
            b @ b'1'..=b'8' => b - b'0',
            _ => return Err(ChessError::parse("position", s)),
        };

        let file = match bytes[0] {
            b @ b'a'..=b'h' => b - b'a' + 1,
            b @ b'A'..=b'H' => b - b'A' + 1,
            b @ b'1'..=b'8' => b - b'0',
            _ => return Err(ChessError::parse("position", s)),
        };

        Ok(Self::at(file, rank))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", FILES[self.col as usize - 1] as char, self.row)
    }
}

impl FromStr for Position {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl TryFrom<String> for Position {
    type Error = ChessError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_str(&s)
    }
}

impl From<Position> for String {
    fn from(p: Position) -> String {
        p.to_string()
    }
}

/// Anything a board square can be read from.
///
/// Accepted shapes:
/// - a `Position`,
/// - a two-character string, either file+rank (`"A4"`, `"a4"`) or two digits
///   (`"14"`),
/// - a two-element array whose elements are joined and re-parsed
///   (`["A", "4"]`, `[1, 4]`, `['a', '4']`),
/// - a piece (its current square).
pub trait IntoPosition {
    fn into_position(self) -> ChessResult<Position>;
}

impl IntoPosition for Position {
    fn into_position(self) -> ChessResult<Position> {
        Ok(self)
    }
}

impl IntoPosition for &Position {
    fn into_position(self) -> ChessResult<Position> {
        Ok(*self)
    }
}

impl IntoPosition for &str {
    fn into_position(self) -> ChessResult<Position> {
        Position::parse_str(self)
    }
}

impl IntoPosition for String {
    fn into_position(self) -> ChessResult<Position> {
        Position::parse_str(&self)
    }
}

impl IntoPosition for &String {
    fn into_position(self) -> ChessResult<Position> {
        Position::parse_str(self)
    }
}

impl<T: fmt::Display> IntoPosition for [T; 2] {
    fn into_position(self) -> ChessResult<Position> {
        Position::parse_str(&format!("{}{}", self[0], self[1]))
    }
}

pub fn parse_position(value: impl IntoPosition) -> ChessResult<Position> {
    value.into_position()
}

/// True iff `value` parses to a square on the board. Never fails.
pub fn valid_position(value: impl IntoPosition) -> bool {
    value.into_position().is_ok()
}

/// Canonical `"A4"` form.
pub fn format_position(value: impl IntoPosition) -> ChessResult<String> {
    value.into_position().map(|p| p.to_string())
}
