//! Whole-board rules: check, checkmate and king safety.

pub mod check;
