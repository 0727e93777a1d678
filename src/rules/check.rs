//! Check detection and king-safety filtering.
//!
//! Two filters exist. The generic one (`Board::leaves_king_safe`) replays a
//! candidate on a cloned board and asks whether the mover's king is attacked
//! there; it needs every piece's moves, kings included. The king therefore
//! cannot use it for its own candidates and goes through
//! `king_destination_safe`, which only looks at the enemy king's square and
//! at non-king enemy moves.

use log::{debug, trace};

use crate::board::Board;
use crate::chess::moves::Move;
use crate::chess::piece::{Piece, PieceKind};
use crate::core::color::Color;

/// A king that some enemy move could capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    /// Color of the king in check.
    pub color: Color,
    /// The first move found that captures it.
    pub attack: Move,
}

impl Board {
    /// Every piece's pseudo-legal moves, in piece order.
    pub fn all_moves(&self) -> Vec<Move> {
        self.views().flat_map(|v| v.moves()).collect()
    }

    /// The first king found under attack, scanning `all_moves`.
    pub fn find_check(&self) -> Option<Check> {
        self.all_moves().into_iter().find_map(|mv| {
            let target = self.piece(mv.captured?)?;
            target.is(PieceKind::King).then_some(Check {
                color: target.color(),
                attack: mv,
            })
        })
    }

    /// An enemy move that captures a king of `color`, if there is one.
    pub fn attack_on_king(&self, color: Color) -> Option<Move> {
        self.views()
            .filter(|v| v.color() != color)
            .flat_map(|v| v.moves())
            .find(|mv| {
                mv.captured
                    .and_then(|id| self.piece(id))
                    .is_some_and(|p| p.is(PieceKind::King) && p.color() == color)
            })
    }

    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.attack_on_king(color).is_some()
    }

    /// True if `mv` does not leave the mover's king attacked.
    ///
    /// Plays the move on a clone; the live board is never touched. Pins and
    /// discovered checks fall out of this for free.
    pub fn leaves_king_safe(&self, mv: &Move) -> bool {
        let Some(mover) = self.piece(mv.piece) else {
            return false;
        };
        let color = mover.color();

        let mut hypothetical = self.clone();
        if hypothetical.make_move(mv).is_err() {
            return false;
        }
        !hypothetical.is_in_check(color)
    }

    /// Moves for `color`'s pieces.
    ///
    /// With `exclude_unsafe`, only moves that leave `color`'s king unattacked
    /// are kept. Returns `None` when `color` is in check and nothing gets it
    /// out (checkmate); a side with no safe moves that is not in check gets an
    /// empty list instead.
    pub fn colored_moves(&self, color: Color, exclude_unsafe: bool) -> Option<Vec<Move>> {
        let candidates: Vec<Move> = self
            .views()
            .filter(|v| v.color() == color)
            .flat_map(|v| v.moves())
            .collect();

        if !exclude_unsafe {
            return Some(candidates);
        }

        let total = candidates.len();
        let safe: Vec<Move> = candidates
            .into_iter()
            .filter(|mv| {
                let ok = self.leaves_king_safe(mv);
                if !ok {
                    trace!("{mv} would leave the {color} king attacked");
                }
                ok
            })
            .collect();

        if self.is_in_check(color) {
            debug!("{color} is in check: {} of {total} moves escape", safe.len());
            if safe.is_empty() {
                return None;
            }
        }

        Some(safe)
    }

    /// `colored_moves(color, true)`.
    #[inline]
    pub fn legal_moves(&self, color: Color) -> Option<Vec<Move>> {
        self.colored_moves(color, true)
    }

    /// Safe moves for both colors, or `None` if either side is checkmated.
    pub fn safe_moves(&self) -> Option<Vec<Move>> {
        let mut out = self.colored_moves(Color::White, true)?;
        out.extend(self.colored_moves(Color::Black, true)?);
        Some(out)
    }

    #[inline]
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.colored_moves(color, true).is_none()
    }
}

/// Whether `king` may step as `mv` says.
///
/// On a clone with the step played, the destination is unsafe if an enemy king
/// stands next to it, or if any non-king enemy piece could then capture the
/// king. Only non-king move generation runs here, so there is no recursion
/// back into king moves.
pub(crate) fn king_destination_safe(board: &Board, king: &Piece, mv: &Move) -> bool {
    let mut hypothetical = board.clone();
    if hypothetical.make_move(mv).is_err() {
        return false;
    }

    let enemy = king.color().other();

    let next_to_enemy_king = hypothetical
        .pieces()
        .iter()
        .any(|p| p.is(PieceKind::King) && p.color() == enemy && p.position().is_adjacent(mv.to));
    if next_to_enemy_king {
        return false;
    }

    let attacked = hypothetical
        .views()
        .filter(|v| v.color() == enemy && !v.is(PieceKind::King))
        .any(|v| v.moves().iter().any(|m| m.captured == Some(king.id())));
    !attacked
}
