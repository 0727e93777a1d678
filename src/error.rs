use thiserror::Error;

use crate::chess::moves::Move;
use crate::chess::piece::PieceId;
use crate::core::position::Position;

/// Errors raised by board construction, mutation and lookup.
///
/// All of them are detected before any state changes, so a failed call leaves
/// the board (and the game history) exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// A position or color could not be parsed.
    #[error("unable to parse {input:?} as a {what}")]
    Parse { what: &'static str, input: String },

    /// Something tried to land on a square that already holds a piece.
    #[error("a piece already exists at {0}")]
    OccupiedSquare(Position),

    /// `PieceFilter` was given a key it does not understand.
    #[error("unknown filter key {0:?}")]
    UnknownFilter(String),

    /// The handle does not refer to a piece on this board (it was removed or
    /// belongs to an unrelated board).
    #[error("no piece with id {0} on the board")]
    MissingPiece(PieceId),

    /// The moving piece is no longer on the move's origin square, typically
    /// because the move was generated on a different snapshot.
    #[error("move {0} does not start from the piece's current square")]
    StaleMove(Move),

    /// A history move was requested before `Game::init`.
    #[error("game history is not initialized")]
    HistoryNotInitialized,
}

impl ChessError {
    pub(crate) fn parse(what: &'static str, input: impl Into<String>) -> Self {
        ChessError::Parse {
            what,
            input: input.into(),
        }
    }
}

pub type ChessResult<T> = Result<T, ChessError>;
