use std::fmt;

use duplicate::duplicate;
use itertools::iproduct;
use paste::paste;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct GridSize {
    pub width:  i32,
    pub height: i32,
}

/// A span of grid cells, analogous to an integer rectangle with its origin at the top-left cell.
///
/// Any rectangle with a non-positive width or height is considered empty.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct GridRect {
    pub x:      i32,
    pub y:      i32,
    pub width:  i32,
    pub height: i32,
}

impl GridPos {
    pub const ZERO: Self = Self::new(0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl GridSize {
    pub const ZERO: Self = Self::new(0, 0);

    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }
}

impl GridRect {
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub const fn from_pos_size(pos: GridPos, size: GridSize) -> Self {
        Self::new(pos.x, pos.y, size.width, size.height)
    }

    /// Smallest rectangle containing both cells, regardless of which one is the top-left corner.
    pub fn from_corners_inclusive(a: GridPos, b: GridPos) -> Self {
        duplicate! {
            [dimension; [x]; [y]]
            paste! {
                let ([<min_ dimension>], [<max_ dimension>]) = (a.dimension.min(b.dimension), a.dimension.max(b.dimension));
            }
        }
        Self::new(min_x, min_y, max_x - min_x + 1, max_y - min_y + 1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    pub fn pos(&self) -> GridPos {
        GridPos::new(self.x, self.y)
    }

    /// Moves a negative origin up to zero and trims the far edges so they stay inside `bounds`.
    ///
    /// The size is only ever trimmed against the far edge, so moving a negative origin does not shrink it.
    /// Whatever ends up with no cells collapses to [`GridRect::EMPTY`].
    pub fn clamped_to(self, bounds: GridSize) -> Self {
        let x = self.x.max(0);
        let y = self.y.max(0);
        let clamped = Self::new(x, y, self.width.min(bounds.width - x), self.height.min(bounds.height - y));
        if clamped.is_empty() {
            Self::EMPTY
        } else {
            clamped
        }
    }

    /// All covered cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = GridPos> {
        let (xs, ys) = if self.is_empty() { (0..0, 0..0) } else { (self.x..self.x + self.width, self.y..self.y + self.height) };
        iproduct!(ys, xs).map(|(y, x)| GridPos::new(x, y))
    }
}

impl fmt::Display for GridRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}x{}", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_normalized() {
        let expected = GridRect::new(1, 2, 4, 3);
        assert_eq!(GridRect::from_corners_inclusive(GridPos::new(1, 2), GridPos::new(4, 4)), expected);
        assert_eq!(GridRect::from_corners_inclusive(GridPos::new(4, 4), GridPos::new(1, 2)), expected);
        assert_eq!(GridRect::from_corners_inclusive(GridPos::new(4, 2), GridPos::new(1, 4)), expected);
        assert_eq!(GridRect::from_corners_inclusive(GridPos::new(3, 3), GridPos::new(3, 3)), GridRect::new(3, 3, 1, 1));
    }

    #[test]
    fn clamping_trims_far_edges() {
        let bounds = GridSize::new(8, 4);
        assert_eq!(GridRect::new(6, 3, 5, 5).clamped_to(bounds), GridRect::new(6, 3, 2, 1));
        assert_eq!(GridRect::new(0, 0, 8, 4).clamped_to(bounds), GridRect::new(0, 0, 8, 4));
    }

    #[test]
    fn clamping_moves_negative_origin_to_zero() {
        let bounds = GridSize::new(8, 4);
        assert_eq!(GridRect::new(-3, -1, 2, 2).clamped_to(bounds), GridRect::new(0, 0, 2, 2));
        assert_eq!(GridRect::new(-3, 0, 20, 1).clamped_to(bounds), GridRect::new(0, 0, 8, 1));
    }

    #[test]
    fn clamping_outside_bounds_gives_empty() {
        let bounds = GridSize::new(8, 4);
        assert_eq!(GridRect::new(8, 0, 2, 2).clamped_to(bounds), GridRect::EMPTY);
        assert_eq!(GridRect::new(0, 1, 2, 0).clamped_to(bounds), GridRect::EMPTY);
        assert_eq!(GridRect::new(2, 2, 1, 1).clamped_to(GridSize::ZERO), GridRect::EMPTY);
    }

    #[test]
    fn cells_are_row_major() {
        let cells = GridRect::new(2, 5, 2, 2).cells().collect::<Vec<_>>();
        assert_eq!(cells, vec![GridPos::new(2, 5), GridPos::new(3, 5), GridPos::new(2, 6), GridPos::new(3, 6)]);
        assert_eq!(GridRect::new(0, 0, -1, 3).cells().count(), 0);
    }
}
