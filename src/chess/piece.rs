use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::color::{Color, IntoColor};
use crate::core::coord::Coord;
use crate::core::position::{IntoPosition, Position};
use crate::error::{ChessError, ChessResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        use PieceKind::*;
        match self {
            Pawn => "pawn",
            Knight => "knight",
            Bishop => "bishop",
            Rook => "rook",
            Queen => "queen",
            King => "king",
        }
    }

    /// Outline glyph for White, solid glyph for Black.
    pub fn glyph(self, color: Color) -> char {
        use PieceKind::*;
        match (self, color) {
            (King, Color::White) => '♔',
            (Queen, Color::White) => '♕',
            (Rook, Color::White) => '♖',
            (Bishop, Color::White) => '♗',
            (Knight, Color::White) => '♘',
            (Pawn, Color::White) => '♙',
            (King, Color::Black) => '♚',
            (Queen, Color::Black) => '♛',
            (Rook, Color::Black) => '♜',
            (Bishop, Color::Black) => '♝',
            (Knight, Color::Black) => '♞',
            (Pawn, Color::Black) => '♟',
        }
    }
}

impl PieceKind {
    /// Fixed offsets for the kinds that step rather than slide. Pawns follow
    /// their own rule and sliders walk rays, so both get an empty table.
    #[inline]
    pub fn step_deltas(self) -> &'static [Coord] {
        match self {
            PieceKind::Knight => &KNIGHT_JUMPS,
            PieceKind::King => &KING_STEPS,
            _ => &[],
        }
    }
}

/// Up, down, left, right.
pub const STRAIGHT_DIRS: [Coord; 4] = [
    Coord { x: 0, y: 1 },
    Coord { x: 0, y: -1 },
    Coord { x: -1, y: 0 },
    Coord { x: 1, y: 0 },
];

pub const DIAGONAL_DIRS: [Coord; 4] = [
    Coord { x: 1, y: 1 },
    Coord { x: 1, y: -1 },
    Coord { x: -1, y: 1 },
    Coord { x: -1, y: -1 },
];

/// Knight jumps, clockwise from "up two, left one".
pub const KNIGHT_JUMPS: [Coord; 8] = [
    Coord { x: -1, y: 2 },
    Coord { x: 1, y: 2 },
    Coord { x: 2, y: 1 },
    Coord { x: 2, y: -1 },
    Coord { x: 1, y: -2 },
    Coord { x: -1, y: -2 },
    Coord { x: -2, y: -1 },
    Coord { x: -2, y: 1 },
];

/// One square in every direction: the straight and diagonal units together.
pub const KING_STEPS: [Coord; 8] = [
    STRAIGHT_DIRS[0],
    STRAIGHT_DIRS[1],
    STRAIGHT_DIRS[2],
    STRAIGHT_DIRS[3],
    DIAGONAL_DIRS[0],
    DIAGONAL_DIRS[1],
    DIAGONAL_DIRS[2],
    DIAGONAL_DIRS[3],
];

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PieceKind {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PieceKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ChessError::parse("piece kind", s))
    }
}

/// Stable handle for a piece on a board.
///
/// Ids are never reused within a board's lifetime and survive `Board::clone`,
/// so a `Move` generated on one board can be replayed on any of its clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub(crate) u32);

impl PieceId {
    /// Carried by pieces that are not on any board.
    pub const DETACHED: PieceId = PieceId(u32::MAX);
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::DETACHED {
            f.write_str("detached")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}

/// A piece record: kind, color and square, plus its handle on the owning board.
///
/// The owning board is not stored here; it is supplied by whoever borrows the
/// piece (see `PieceView`). A piece returned by `Board::remove_piece` carries
/// `PieceId::DETACHED`; its old handle no longer resolves on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub(crate) id: PieceId,
    kind: PieceKind,
    color: Color,
    pub(crate) position: Position,
}

impl Piece {
    /// A piece that is not yet on a board; see `Board::attach`.
    pub fn detached(
        kind: PieceKind,
        color: impl IntoColor,
        position: impl IntoPosition,
    ) -> ChessResult<Self> {
        let color = color.into_color()?;
        let position = position.into_position()?;
        Ok(Self {
            id: PieceId::DETACHED,
            kind,
            color,
            position,
        })
    }

    pub(crate) fn placed(id: PieceId, kind: PieceKind, color: Color, position: Position) -> Self {
        Self {
            id,
            kind,
            color,
            position,
        }
    }

    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub fn is_attached(&self) -> bool {
        self.id != PieceId::DETACHED
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn is(&self, kind: PieceKind) -> bool {
        self.kind == kind
    }

    #[inline]
    pub fn glyph(&self) -> char {
        self.kind.glyph(self.color)
    }

    /// Square at `(h, v)` from this piece, or `None` if off the board.
    ///
    /// With `relative`, `v` is flipped for Black so that positive `v` always
    /// points toward the opponent's back rank.
    pub fn offset_position(&self, h: i32, v: i32, relative: bool) -> Option<Position> {
        let v = if relative { v * self.color.forward() } else { v };
        self.position.offset(Coord::new(h, v))
    }

    /// A pawn standing on the rank it promotes on.
    #[inline]
    pub fn at_far_rank(&self) -> bool {
        self.position.row() == self.color.far_rank()
    }

    pub(crate) fn detach(mut self) -> Self {
        self.id = PieceId::DETACHED;
        self
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} at {}", self.color.name(true), self.kind, self.position)
    }
}

impl IntoPosition for &Piece {
    fn into_position(self) -> ChessResult<Position> {
        Ok(self.position)
    }
}

impl IntoColor for &Piece {
    fn into_color(self) -> ChessResult<Color> {
        Ok(self.color)
    }
}

/// How `Board::move_to` treats an occupied target square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conviction {
    /// Refuse if the target holds any piece.
    Refuse,
    /// Capture an opposite-color piece; refuse a same-color one.
    CaptureOpponent,
    /// Capture whatever is there.
    CaptureAny,
}
