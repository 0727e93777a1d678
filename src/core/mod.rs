//! Board-independent primitives.
//!
//! - [`coord`]: integer steps that may point off the board.
//! - [`position`]: validated on-board squares plus parse/format helpers.
//! - [`color`]: the two sides plus conversion helpers.

pub mod color;
pub mod coord;
pub mod position;
