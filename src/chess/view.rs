use std::ops::Deref;

use crate::board::Board;
use crate::chess::kinds;
use crate::chess::moves::Move;
use crate::chess::piece::{Piece, DIAGONAL_DIRS, STRAIGHT_DIRS};
use crate::core::coord::Coord;
use crate::core::position::Position;

/// A piece borrowed together with the board it stands on.
///
/// This is the piece's "back-reference": the board is only borrowed, so the
/// view cannot outlive or mutate it. All geometry that needs to see other
/// pieces lives here.
#[derive(Debug, Clone, Copy)]
pub struct PieceView<'b> {
    board: &'b Board,
    piece: &'b Piece,
}

impl<'b> PieceView<'b> {
    pub(crate) fn new(board: &'b Board, piece: &'b Piece) -> Self {
        Self { board, piece }
    }

    #[inline]
    pub fn board(&self) -> &'b Board {
        self.board
    }

    #[inline]
    pub fn piece(&self) -> &'b Piece {
        self.piece
    }

    /// Pseudo-legal moves: movement geometry and occupancy only.
    ///
    /// King moves are the exception: they already exclude destinations the
    /// opponent attacks (see `rules::check`).
    pub fn moves(&self) -> Vec<Move> {
        kinds::pseudo_moves(self)
    }

    /// The piece at `(h, v)` from this one. `None` covers both an empty square
    /// and a square off the board; use `offset_position` to tell them apart.
    pub fn offset(&self, h: i32, v: i32, relative: bool) -> Option<&'b Piece> {
        self.piece
            .offset_position(h, v, relative)
            .and_then(|p| self.board.occupant(p))
    }

    #[inline]
    pub fn offset_position(&self, h: i32, v: i32, relative: bool) -> Option<Position> {
        self.piece.offset_position(h, v, relative)
    }

    #[inline]
    pub fn adjacent_to(&self, other: &Piece) -> bool {
        self.piece.position().is_adjacent(other.position())
    }

    /// Rook lines: up, down, left, right.
    pub fn straight_moves(&self) -> Vec<Move> {
        self.slide(&STRAIGHT_DIRS)
    }

    /// Bishop lines.
    pub fn diagonal_moves(&self) -> Vec<Move> {
        self.slide(&DIAGONAL_DIRS)
    }

    /// Walks each ray from (not including) the current square. Empty squares are
    /// quiet moves; the first occupied square ends the ray and is a capture only
    /// when it holds the other color.
    fn slide(&self, dirs: &[Coord]) -> Vec<Move> {
        let mut out = Vec::new();
        let from = self.piece.position();

        for &dir in dirs {
            let mut step = 1;
            while let Some(to) = from.offset(dir.times(step)) {
                match self.board.occupant(to) {
                    None => out.push(Move::quiet(self.piece.id(), from, to)),
                    Some(other) => {
                        if other.color() != self.piece.color() {
                            out.push(Move::capture(self.piece.id(), from, to, other.id()));
                        }
                        break;
                    }
                }
                step += 1;
            }
        }

        out
    }

    /// A single-step move to `to`: quiet if empty, a capture if the other color
    /// stands there, nothing if our own piece does.
    pub(crate) fn step_to(&self, to: Position) -> Option<Move> {
        let from = self.piece.position();
        match self.board.occupant(to) {
            None => Some(Move::quiet(self.piece.id(), from, to)),
            Some(other) if other.color() != self.piece.color() => {
                Some(Move::capture(self.piece.id(), from, to, other.id()))
            }
            Some(_) => None,
        }
    }

    /// `step_to` over a fixed offset table, skipping off-board targets.
    pub(crate) fn steps(&self, deltas: &[Coord]) -> Vec<Move> {
        let from = self.piece.position();
        deltas
            .iter()
            .filter_map(|&d| from.offset(d))
            .filter_map(|to| self.step_to(to))
            .collect()
    }
}

impl Deref for PieceView<'_> {
    type Target = Piece;

    fn deref(&self) -> &Piece {
        self.piece
    }
}
