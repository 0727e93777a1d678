use std::fmt;
use std::str::FromStr;

use log::debug;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::chess::moves::Move;
use crate::chess::piece::{Conviction, Piece, PieceId, PieceKind};
use crate::chess::view::PieceView;
use crate::core::color::{Color, IntoColor};
use crate::core::position::{IntoPosition, Position};
use crate::error::{ChessError, ChessResult};

/// An unordered collection of pieces, iterated in insertion order.
///
/// No two pieces share a square: `add_piece`, `attach`, `move_to` and
/// `make_move` all refuse to break that, and `validate` re-checks it. Cloning
/// copies every piece, so a clone and its original never affect each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    pieces: Vec<Piece>,
    next_id: u32,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// A board in the standard starting position.
    pub fn standard() -> Self {
        let mut board = Self::new();
        board.set_board();
        board
    }

    /// Clears the board and sets up the starting position: pawns on ranks 2
    /// and 7, rooks/knights/bishops mirrored across the center files, kings on
    /// the D file and queens on the E file.
    pub fn set_board(&mut self) {
        self.clear();

        for col in 1..=8 {
            self.place(PieceKind::Pawn, Color::White, Position::at(col, 2));
            self.place(PieceKind::Pawn, Color::Black, Position::at(col, 7));
        }

        for (kind, col) in [
            (PieceKind::Rook, 1),
            (PieceKind::Knight, 2),
            (PieceKind::Bishop, 3),
        ] {
            self.place(kind, Color::White, Position::at(col, 1));
            self.place(kind, Color::White, Position::at(9 - col, 1));
            self.place(kind, Color::Black, Position::at(col, 8));
            self.place(kind, Color::Black, Position::at(9 - col, 8));
        }

        self.place(PieceKind::King, Color::White, Position::at(4, 1));
        self.place(PieceKind::King, Color::Black, Position::at(4, 8));
        self.place(PieceKind::Queen, Color::White, Position::at(5, 1));
        self.place(PieceKind::Queen, Color::Black, Position::at(5, 8));
    }

    pub fn clear(&mut self) {
        self.pieces.clear();
    }

    /// Puts a new piece on the board.
    ///
    /// Fails if the color or position does not parse, or the square is taken.
    pub fn add_piece(
        &mut self,
        kind: PieceKind,
        color: impl IntoColor,
        position: impl IntoPosition,
    ) -> ChessResult<PieceId> {
        let color = color.into_color()?;
        let position = position.into_position()?;
        if self.occupant(position).is_some() {
            return Err(ChessError::OccupiedSquare(position));
        }
        Ok(self.place(kind, color, position))
    }

    /// Re-attaches a piece built with `Piece::detached` or returned by
    /// `remove_piece`. It gets a fresh id.
    pub fn attach(&mut self, piece: Piece) -> ChessResult<PieceId> {
        self.add_piece(piece.kind(), piece.color(), piece.position())
    }

    fn mint_id(&mut self) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        id
    }

    fn place(&mut self, kind: PieceKind, color: Color, position: Position) -> PieceId {
        let id = self.mint_id();
        self.pieces.push(Piece::placed(id, kind, color, position));
        id
    }

    /// Swaps the piece at `idx` for a fresh one of `kind` on the same square,
    /// keeping its slot in iteration order.
    fn replace_at(&mut self, idx: usize, kind: PieceKind) -> PieceId {
        let old = &self.pieces[idx];
        let (color, position) = (old.color(), old.position());
        let id = self.mint_id();
        self.pieces[idx] = Piece::placed(id, kind, color, position);
        id
    }

    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    pub fn view(&self, id: PieceId) -> Option<PieceView<'_>> {
        self.piece(id).map(|p| PieceView::new(self, p))
    }

    pub fn views(&self) -> impl Iterator<Item = PieceView<'_>> {
        self.pieces.iter().map(move |p| PieceView::new(self, p))
    }

    fn index_of(&self, id: PieceId) -> Option<usize> {
        self.pieces.iter().position(|p| p.id() == id)
    }

    /// The piece on an already-validated square.
    pub fn occupant(&self, position: Position) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.position() == position)
    }

    /// The piece at `position`, if any. Fails only if `position` does not parse.
    pub fn piece_at(&self, position: impl IntoPosition) -> ChessResult<Option<&Piece>> {
        let position = position.into_position()?;
        Ok(self.occupant(position))
    }

    /// Pieces matching every predicate set in `filter`.
    pub fn filter(&self, filter: &PieceFilter) -> Vec<&Piece> {
        self.pieces.iter().filter(|p| filter.matches(p)).collect()
    }

    /// The first king of `color`, if that side has one.
    pub fn king(&self, color: Color) -> Option<&Piece> {
        self.pieces
            .iter()
            .find(|p| p.is(PieceKind::King) && p.color() == color)
    }

    /// False if two pieces share a square.
    pub fn validate(&self) -> bool {
        let mut seen = FxHashSet::default();
        self.pieces.iter().all(|p| seen.insert(p.position()))
    }

    /// Takes a piece off the board. The returned piece is detached; `id` no
    /// longer resolves.
    pub fn remove_piece(&mut self, id: PieceId) -> Option<Piece> {
        let idx = self.index_of(id)?;
        Some(self.pieces.remove(idx).detach())
    }

    /// Replaces a piece with a new one of `kind`, same color and square.
    /// Returns the new piece's id.
    pub fn morph(&mut self, id: PieceId, kind: PieceKind) -> ChessResult<PieceId> {
        let idx = self.index_of(id).ok_or(ChessError::MissingPiece(id))?;
        Ok(self.replace_at(idx, kind))
    }

    /// Relocates a piece to `target`, capturing according to `conviction`.
    ///
    /// Returns `Ok(false)` when the conviction forbids taking whatever stands
    /// on `target` (or `target` is where the piece already is).
    pub fn move_to(
        &mut self,
        id: PieceId,
        target: impl IntoPosition,
        conviction: Conviction,
    ) -> ChessResult<bool> {
        let target = target.into_position()?;
        let mover = self.piece(id).ok_or(ChessError::MissingPiece(id))?;
        let from = mover.position();

        let captured = match self.occupant(target) {
            None => None,
            Some(other) if other.id() == id => return Ok(false),
            Some(other) => match conviction {
                Conviction::Refuse => return Ok(false),
                Conviction::CaptureOpponent if other.color() == mover.color() => {
                    return Ok(false)
                }
                Conviction::CaptureOpponent | Conviction::CaptureAny => Some(other.id()),
            },
        };

        self.make_move(&Move {
            to: target,
            captured,
            piece: id,
            from,
        })?;
        Ok(true)
    }

    /// Applies a move: removes the captured piece, then relocates the mover.
    ///
    /// Checked up front so a stale move never half-applies: both ids must be on
    /// the board, the mover must stand on `mv.from`, the captured piece on
    /// `mv.to`, and otherwise the destination must be empty.
    pub fn make_move(&mut self, mv: &Move) -> ChessResult<()> {
        let mover = self.piece(mv.piece).ok_or(ChessError::MissingPiece(mv.piece))?;
        if mover.position() != mv.from {
            return Err(ChessError::StaleMove(*mv));
        }
        if let Some(captured) = mv.captured {
            let victim = self.piece(captured).ok_or(ChessError::MissingPiece(captured))?;
            if victim.position() != mv.to {
                return Err(ChessError::StaleMove(*mv));
            }
        }
        if let Some(occupant) = self.occupant(mv.to) {
            if Some(occupant.id()) != mv.captured && occupant.id() != mv.piece {
                return Err(ChessError::OccupiedSquare(mv.to));
            }
        }

        if let Some(captured) = mv.captured {
            self.remove_piece(captured);
        }
        if let Some(idx) = self.index_of(mv.piece) {
            self.pieces[idx].position = mv.to;
        }
        Ok(())
    }

    /// End-of-turn upkeep: every pawn on its far rank becomes a queen.
    /// Returns the ids of the new queens.
    pub fn maintain(&mut self) -> Vec<PieceId> {
        let mut out = Vec::new();
        for idx in 0..self.pieces.len() {
            let pawn = &self.pieces[idx];
            if !(pawn.is(PieceKind::Pawn) && pawn.at_far_rank()) {
                continue;
            }
            let old = pawn.id();
            let queen = self.replace_at(idx, PieceKind::Queen);
            debug!("promoted pawn {old} to queen {queen}");
            out.push(queen);
        }
        out
    }

    /// Piece counts per color and kind.
    pub fn material(&self) -> FxHashMap<(Color, PieceKind), usize> {
        let mut counts = FxHashMap::default();
        for p in &self.pieces {
            *counts.entry((p.color(), p.kind())).or_insert(0) += 1;
        }
        counts
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (1..=8u8).rev() {
            write!(f, "{row} ")?;
            for col in 1..=8u8 {
                let glyph = self
                    .occupant(Position::at(col, row))
                    .map_or('·', |p| p.glyph());
                write!(f, " {glyph}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   A B C D E F G H")
    }
}

/// Predicates for `Board::filter`; unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PieceFilter {
    pub color: Option<Color>,
    pub kind: Option<PieceKind>,
    pub position: Option<Position>,
}

impl PieceFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_kind(mut self, kind: PieceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Builds a filter from `(key, value)` pairs. Keys are `color`, `kind` (or
    /// `piece`) and `position`; anything else is an `UnknownFilter` error.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> ChessResult<Self> {
        let mut filter = Self::new();
        for (key, value) in pairs {
            match key {
                "color" => filter.color = Some(value.into_color()?),
                "kind" | "piece" => filter.kind = Some(value.parse()?),
                "position" => filter.position = Some(value.into_position()?),
                other => return Err(ChessError::UnknownFilter(other.to_string())),
            }
        }
        Ok(filter)
    }

    pub fn matches(&self, piece: &Piece) -> bool {
        self.color.map_or(true, |c| piece.color() == c)
            && self.kind.map_or(true, |k| piece.kind() == k)
            && self.position.map_or(true, |p| piece.position() == p)
    }
}

/// `"color=white kind=pawn"`; pairs separated by whitespace or commas.
impl FromStr for PieceFilter {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut pairs = Vec::new();
        for token in s.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            let (key, value) = token
                .split_once('=')
                .ok_or_else(|| ChessError::parse("filter", token))?;
            pairs.push((key, value));
        }
        Self::from_pairs(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_piece_refuses_occupied_squares_without_side_effects() {
        let mut board = Board::new();
        board.add_piece(PieceKind::Rook, "white", "A1").unwrap();
        let before = board.clone();

        let err = board.add_piece(PieceKind::Knight, "black", "a1").unwrap_err();
        assert_eq!(err, ChessError::OccupiedSquare("A1".parse().unwrap()));
        assert!(matches!(
            board.add_piece(PieceKind::Knight, "purple", "B1"),
            Err(ChessError::Parse { .. })
        ));
        assert!(matches!(
            board.add_piece(PieceKind::Knight, "black", "J1"),
            Err(ChessError::Parse { .. })
        ));
        assert_eq!(board, before);
    }

    #[test]
    fn remove_detaches_and_invalidates_the_handle() {
        let mut board = Board::new();
        let id = board.add_piece(PieceKind::Bishop, Color::Black, "C8").unwrap();
        let removed = board.remove_piece(id).unwrap();
        assert!(!removed.is_attached());
        assert!(board.piece(id).is_none());
        assert!(board.remove_piece(id).is_none());

        let again = board.attach(removed).unwrap();
        assert_ne!(again, id);
        assert_eq!(board.piece_at("C8").unwrap().unwrap().id(), again);
    }

    #[test]
    fn move_to_honours_conviction() {
        let mut board = Board::new();
        let rook = board.add_piece(PieceKind::Rook, Color::White, "A1").unwrap();
        board.add_piece(PieceKind::Pawn, Color::White, "A2").unwrap();
        board.add_piece(PieceKind::Pawn, Color::Black, "B1").unwrap();

        assert!(!board.move_to(rook, "B1", Conviction::Refuse).unwrap());
        assert!(!board.move_to(rook, "A2", Conviction::CaptureOpponent).unwrap());
        assert!(board.move_to(rook, "B1", Conviction::CaptureOpponent).unwrap());
        assert_eq!(board.len(), 2);
        assert!(board.move_to(rook, "B2", Conviction::Refuse).unwrap());
        assert!(board.move_to(rook, "A2", Conviction::CaptureAny).unwrap());
        assert_eq!(board.len(), 1);
        assert_eq!(board.piece_at("A2").unwrap().unwrap().id(), rook);
    }

    #[test]
    fn stale_moves_are_rejected_before_mutating() {
        let mut board = Board::new();
        let rook = board.add_piece(PieceKind::Rook, Color::White, "A1").unwrap();
        let pawn = board.add_piece(PieceKind::Pawn, Color::Black, "A5").unwrap();
        let mv = Move::quiet(rook, "A1".parse().unwrap(), "A5".parse().unwrap());
        let before = board.clone();

        assert!(matches!(board.make_move(&mv), Err(ChessError::OccupiedSquare(_))));
        board.remove_piece(pawn);
        let mv = Move::capture(rook, "A1".parse().unwrap(), "A5".parse().unwrap(), pawn);
        assert_eq!(board.make_move(&mv), Err(ChessError::MissingPiece(pawn)));
        assert_eq!(board.pieces().len() + 1, before.pieces().len());
    }

    #[test]
    fn moves_from_another_snapshot_do_not_teleport() {
        let mut board = Board::new();
        let rook = board.add_piece(PieceKind::Rook, Color::White, "A1").unwrap();
        board.add_piece(PieceKind::Pawn, Color::White, "A2").unwrap();

        let mut elsewhere = board.clone();
        elsewhere.move_to(rook, "H1", Conviction::Refuse).unwrap();
        let up = elsewhere
            .view(rook)
            .unwrap()
            .moves()
            .into_iter()
            .find(|m| m.to.to_string() == "H8")
            .unwrap();

        let before = board.clone();
        assert_eq!(board.make_move(&up), Err(ChessError::StaleMove(up)));
        assert_eq!(board, before);
        assert_eq!(board.piece(rook).unwrap().position().to_string(), "A1");
        elsewhere.make_move(&up).unwrap();

        // A capture whose victim has since moved away is just as stale.
        let mut board = Board::new();
        let rook = board.add_piece(PieceKind::Rook, Color::White, "A1").unwrap();
        let knight = board.add_piece(PieceKind::Knight, Color::Black, "A5").unwrap();
        let take = board
            .view(rook)
            .unwrap()
            .moves()
            .into_iter()
            .find(|m| m.captured == Some(knight))
            .unwrap();
        board.move_to(knight, "C6", Conviction::Refuse).unwrap();
        assert_eq!(board.make_move(&take), Err(ChessError::StaleMove(take)));
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn filter_combines_predicates() {
        let board = Board::standard();
        let white_pawns = board.filter(&"color=white kind=pawn".parse().unwrap());
        assert_eq!(white_pawns.len(), 8);
        let at_d8 = board.filter(&PieceFilter::new().with_position("D8".parse().unwrap()));
        assert_eq!(at_d8.len(), 1);
        assert_eq!(at_d8[0].kind(), PieceKind::King);
        let rooks = board.filter(&PieceFilter::from_pairs([("piece", "rook")]).unwrap());
        assert_eq!(rooks.len(), 4);
    }

    #[test]
    fn filter_rejects_unknown_keys() {
        assert_eq!(
            PieceFilter::from_pairs([("colour", "white")]),
            Err(ChessError::UnknownFilter("colour".to_string()))
        );
        assert!(matches!(
            "shape=round".parse::<PieceFilter>(),
            Err(ChessError::UnknownFilter(_))
        ));
        assert!(matches!(
            "color".parse::<PieceFilter>(),
            Err(ChessError::Parse { .. })
        ));
    }

    #[test]
    fn morph_keeps_color_and_square() {
        let mut board = Board::new();
        let pawn = board.add_piece(PieceKind::Pawn, Color::Black, "C1").unwrap();
        let knight = board.morph(pawn, PieceKind::Knight).unwrap();
        let p = board.piece(knight).unwrap();
        assert_eq!((p.kind(), p.color()), (PieceKind::Knight, Color::Black));
        assert_eq!(p.position().to_string(), "C1");
        assert!(board.piece(pawn).is_none());
        assert_eq!(board.morph(pawn, PieceKind::Queen), Err(ChessError::MissingPiece(pawn)));
    }

    #[test]
    fn promotion_keeps_the_piece_slot() {
        let mut board = Board::new();
        board.add_piece(PieceKind::Rook, Color::Black, "A5").unwrap();
        let pawn = board.add_piece(PieceKind::Pawn, Color::White, "D8").unwrap();
        board.add_piece(PieceKind::Knight, Color::Black, "H5").unwrap();

        let promoted = board.maintain();
        assert_eq!(promoted.len(), 1);
        assert!(board.piece(pawn).is_none());
        let kinds: Vec<PieceKind> = board.pieces().iter().map(|p| p.kind()).collect();
        assert_eq!(kinds, [PieceKind::Rook, PieceKind::Queen, PieceKind::Knight]);
        assert_eq!(board.pieces()[1].id(), promoted[0]);
        assert!(board.maintain().is_empty());
    }

    #[test]
    fn renders_rank_eight_on_top() {
        let text = Board::standard().to_string();
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("8 "));
        assert!(first.contains('♚'));
        assert!(text.ends_with("A B C D E F G H"));
    }
}
