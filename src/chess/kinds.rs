//! Per-kind move generation.

use log::trace;

use crate::chess::moves::Move;
use crate::chess::piece::PieceKind;
use crate::chess::view::PieceView;
use crate::rules::check::king_destination_safe;

pub(crate) fn pseudo_moves(view: &PieceView<'_>) -> Vec<Move> {
    use PieceKind::*;
    match view.kind() {
        Pawn => pawn_moves(view),
        Knight => view.steps(Knight.step_deltas()),
        Bishop => view.diagonal_moves(),
        Rook => view.straight_moves(),
        Queen => {
            let mut out = view.straight_moves();
            out.extend(view.diagonal_moves());
            out
        }
        King => king_moves(view),
    }
}

/// One step forward onto an empty square, or a forward diagonal capture.
/// Nothing once on the far rank: promotion is the board's job.
fn pawn_moves(view: &PieceView<'_>) -> Vec<Move> {
    if view.at_far_rank() {
        return Vec::new();
    }

    let mut out = Vec::with_capacity(3);
    let from = view.position();

    if let Some(to) = view.offset_position(0, 1, true) {
        if view.offset(0, 1, true).is_none() {
            out.push(Move::quiet(view.id(), from, to));
        }
    }

    for h in [-1, 1] {
        if let Some(other) = view.offset(h, 1, true) {
            if other.color() != view.color() {
                trace!("{} sees {} on its diagonal", view.piece(), other);
                out.push(Move::capture(view.id(), from, other.position(), other.id()));
            }
        }
    }

    out
}

/// Adjacent squares, minus any the opponent would attack once the king stands
/// there. The generic safety filter cannot be used here: it scans every
/// piece's moves, including this king's own.
fn king_moves(view: &PieceView<'_>) -> Vec<Move> {
    view.steps(PieceKind::King.step_deltas())
        .into_iter()
        .filter(|mv| king_destination_safe(view.board(), view.piece(), mv))
        .collect()
}
