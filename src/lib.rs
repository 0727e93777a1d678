//! An 8x8 chess rules engine: board state, per-piece move generation,
//! check/checkmate detection, and a linear, rewindable move history.
//!
//! Castling, en passant, double pawn steps and draw rules are not part of
//! the rules modeled here.

pub mod board;
pub mod chess;
pub mod core;
pub mod error;
pub mod game;
pub mod playback;
pub mod rules;

pub use crate::board::{Board, PieceFilter};
pub use crate::chess::moves::Move;
pub use crate::chess::piece::{Conviction, Piece, PieceId, PieceKind};
pub use crate::chess::view::PieceView;
pub use crate::core::color::{anticolor, format_color, get_color, Color, IntoColor};
pub use crate::core::position::{format_position, parse_position, valid_position, IntoPosition, Position};
pub use crate::error::{ChessError, ChessResult};
pub use crate::game::Game;
pub use crate::rules::check::Check;
