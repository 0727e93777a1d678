use std::ops::Add;

/// A column/row step. Unlike `Position` it may point off the board;
/// `Position::offset` is where it gets clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This step repeated `n` times, for walking a ray.
    #[inline]
    pub const fn times(self, n: i32) -> Self {
        Self::new(self.x * n, self.y * n)
    }
}

impl Add for Coord {
    type Output = Coord;

    #[inline]
    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rays_scale_the_unit_step() {
        let diag = Coord::new(1, -1);
        assert_eq!(diag.times(3), Coord::new(3, -3));
        assert_eq!(Coord::new(4, 4) + diag.times(2), Coord::new(6, 2));
    }
}
