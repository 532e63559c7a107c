/// # Term definitions
///
/// ## Screen
/// The area of your display; units are points.
///
/// ## Grid
/// The tileset divided into cells; units are cell indices.
///
/// A grid cell spans one tile plus the spacing that follows it, called the cell pitch.
use duplicate::duplicate_item;
use emath::*;

use crate::grid_rect::GridPos;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct OnScreen<T>(pub T);

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct OnGrid<T>(pub T);

impl OnScreen<Vec2> {
    #[inline]
    pub fn to_grid(self, cell_pitch: Vec2) -> OnGrid<Vec2> {
        OnGrid((self.0 / cell_pitch).floor())
    }

    #[inline]
    pub fn to_pos2(self) -> OnScreen<Pos2> {
        OnScreen(self.0.to_pos2())
    }
}

impl OnGrid<Vec2> {
    #[inline]
    pub fn to_screen(self, cell_pitch: Vec2) -> OnScreen<Vec2> {
        OnScreen(self.0 * cell_pitch)
    }

    #[inline]
    pub fn to_pos2(self) -> OnGrid<Pos2> {
        OnGrid(self.0.to_pos2())
    }
}

impl OnScreen<Pos2> {
    #[inline]
    pub fn to_grid(self, origin: Self, cell_pitch: Vec2) -> OnGrid<Pos2> {
        self.relative_to(origin).to_grid(cell_pitch).to_pos2()
    }
}

impl OnGrid<Pos2> {
    #[inline]
    pub fn to_screen(self, origin: OnScreen<Pos2>, cell_pitch: Vec2) -> OnScreen<Pos2> {
        OnScreen(origin.0 + self.0.to_vec2() * cell_pitch)
    }

    /// Integer cell coordinates, or `None` if either axis is negative or not finite.
    #[inline]
    pub fn to_grid_pos(self) -> Option<GridPos> {
        let Pos2 { x, y } = self.0;
        (x.is_finite() && y.is_finite() && x >= 0. && y >= 0.).then(|| GridPos::new(x as i32, y as i32))
    }
}

#[duplicate_item(wrapper; [OnScreen]; [OnGrid])]
impl wrapper<Pos2> {
    #[inline]
    pub fn relative_to(self, other: Self) -> wrapper<Vec2> {
        wrapper(self.0 - other.0)
    }

    #[inline]
    pub fn to_vec2(self) -> wrapper<Vec2> {
        wrapper(self.0.to_vec2())
    }
}

impl From<GridPos> for OnGrid<Pos2> {
    #[inline]
    fn from(pos: GridPos) -> Self {
        OnGrid(pos2(pos.x as f32, pos.y as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_position_maps_to_cell_under_it() {
        let origin = OnScreen(pos2(10., 20.));
        let pitch = vec2(17., 9.);
        let cell = OnScreen(pos2(10. + 17. * 2. + 16.9, 20. + 9. * 3.)).to_grid(origin, pitch);
        assert_eq!(cell.to_grid_pos(), Some(GridPos::new(2, 3)));
    }

    #[test]
    fn positions_left_of_origin_have_no_cell() {
        let origin = OnScreen(pos2(10., 10.));
        let cell = OnScreen(pos2(9.5, 40.)).to_grid(origin, vec2(8., 8.));
        assert_eq!(cell.to_grid_pos(), None);
    }

    #[test]
    fn cell_maps_back_to_its_top_left_corner() {
        let origin = OnScreen(pos2(4., 4.));
        let screen = OnGrid::from(GridPos::new(3, 1)).to_screen(origin, vec2(18., 18.));
        assert_eq!(screen.0, pos2(4. + 54., 4. + 18.));
    }
}
