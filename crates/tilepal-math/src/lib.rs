pub mod grid;
pub mod grid_rect;
pub mod space;

pub use grid::Grid;
pub use grid_rect::{GridPos, GridRect, GridSize};
