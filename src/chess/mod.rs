//! Pieces and how each kind moves.

pub mod kinds;
pub mod moves;
pub mod piece;
pub mod view;
