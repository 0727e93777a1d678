use std::fmt;
use std::ops::Not;

use serde::{Deserialize, Serialize};

use crate::error::{ChessError, ChessResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// White=0, Black=1.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn other(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// +1 for White, -1 for Black: the row direction of "forward".
    #[inline]
    pub fn forward(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The row a pawn of this color promotes on.
    #[inline]
    pub fn far_rank(self) -> i32 {
        match self {
            Color::White => 8,
            Color::Black => 1,
        }
    }

    pub fn name(self, capitalized: bool) -> &'static str {
        match (self, capitalized) {
            (Color::White, true) => "White",
            (Color::White, false) => "white",
            (Color::Black, true) => "Black",
            (Color::Black, false) => "black",
        }
    }
}

impl Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        self.other()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name(false))
    }
}

/// Anything a color can be read from: a `Color`, an index (0 = White,
/// 1 = Black), a case-insensitive `"w"`/`"white"`/`"b"`/`"black"`, or a piece.
pub trait IntoColor {
    fn into_color(self) -> ChessResult<Color>;
}

impl IntoColor for Color {
    fn into_color(self) -> ChessResult<Color> {
        Ok(self)
    }
}

impl IntoColor for &Color {
    fn into_color(self) -> ChessResult<Color> {
        Ok(*self)
    }
}

impl IntoColor for usize {
    fn into_color(self) -> ChessResult<Color> {
        Color::ALL
            .get(self)
            .copied()
            .ok_or_else(|| ChessError::parse("color", self.to_string()))
    }
}

impl IntoColor for i32 {
    fn into_color(self) -> ChessResult<Color> {
        usize::try_from(self)
            .map_err(|_| ChessError::parse("color", self.to_string()))?
            .into_color()
    }
}

impl IntoColor for &str {
    fn into_color(self) -> ChessResult<Color> {
        match self.to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Color::White),
            "b" | "black" => Ok(Color::Black),
            _ => Err(ChessError::parse("color", self)),
        }
    }
}

impl IntoColor for &String {
    fn into_color(self) -> ChessResult<Color> {
        self.as_str().into_color()
    }
}

pub fn get_color(value: impl IntoColor) -> ChessResult<Color> {
    value.into_color()
}

/// `"white"`/`"black"`, or `"White"`/`"Black"` when `capitalized`.
pub fn format_color(value: impl IntoColor, capitalized: bool) -> ChessResult<&'static str> {
    value.into_color().map(|c| c.name(capitalized))
}

pub fn anticolor(value: impl IntoColor) -> ChessResult<Color> {
    value.into_color().map(Color::other)
}
