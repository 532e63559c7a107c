use std::fmt;

use egui::{pos2, vec2, Rect, TextureHandle, TextureId, Vec2};
use serde::{Deserialize, Serialize};
use tilepal_math::{GridPos, GridSize};

use crate::{error::TilesetError, tile::TileIndex};

/// Arrangement of tiles in a tileset.
///
/// The atlas image stores tiles tightly packed in `columns` by `rows` cells, counted row by row.
/// `spacing` is only applied when the tiles are displayed.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TilesetLayout {
    pub columns:    u32,
    pub rows:       u32,
    /// Number of tiles actually present; the last row may be partially filled.
    /// `None` means every cell holds a tile.
    pub tile_total: Option<u32>,
    pub tile_size:  Vec2,
    pub spacing:    Vec2,
}

#[derive(Clone)]
pub struct Tileset {
    name:    String,
    layout:  TilesetLayout,
    texture: Option<TextureHandle>,
}

impl Default for TilesetLayout {
    fn default() -> Self {
        Self { columns: 16, rows: 16, tile_total: None, tile_size: Vec2::splat(16.), spacing: Vec2::splat(1.) }
    }
}

impl TilesetLayout {
    pub fn validate(&self) -> Result<(), TilesetError> {
        let Self { columns, rows, tile_total, tile_size, spacing } = *self;
        if columns == 0 || rows == 0 {
            return Err(TilesetError::InvalidGridSize { columns, rows });
        }
        // Grid coordinates are `i32` and tile indices are `u32`.
        let cell_count = u64::from(columns) * u64::from(rows);
        if i32::try_from(columns).is_err() || i32::try_from(rows).is_err() || cell_count > u64::from(u32::MAX) {
            return Err(TilesetError::GridTooLarge { columns, rows });
        }
        if !(tile_size.x > 0. && tile_size.y > 0.) {
            return Err(TilesetError::InvalidTileSize { width: tile_size.x, height: tile_size.y });
        }
        if !(spacing.x >= 0. && spacing.y >= 0.) {
            return Err(TilesetError::InvalidSpacing { x: spacing.x, y: spacing.y });
        }
        match tile_total {
            Some(tile_total) if u64::from(tile_total) > cell_count => {
                Err(TilesetError::TileTotalOutOfRange { tile_total, columns, rows })
            }
            _ => Ok(()),
        }
    }

    pub fn tile_total(&self) -> u32 {
        self.tile_total.unwrap_or(self.columns.saturating_mul(self.rows))
    }
}

impl Tileset {
    pub fn new(name: impl Into<String>, layout: TilesetLayout) -> Result<Self, TilesetError> {
        layout.validate()?;
        Ok(Self { name: name.into(), layout, texture: None })
    }

    pub fn with_texture(mut self, texture: TextureHandle) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layout(&self) -> &TilesetLayout {
        &self.layout
    }

    /// Replaces the arrangement in place. The texture is kept as-is.
    pub fn set_layout(&mut self, layout: TilesetLayout) -> Result<(), TilesetError> {
        layout.validate()?;
        self.layout = layout;
        Ok(())
    }

    pub fn texture_id(&self) -> Option<TextureId> {
        self.texture.as_ref().map(TextureHandle::id)
    }

    pub fn tile_count(&self) -> GridSize {
        GridSize::new(self.layout.columns as i32, self.layout.rows as i32)
    }

    pub fn tile_total(&self) -> u32 {
        self.layout.tile_total()
    }

    pub fn tile_size(&self) -> Vec2 {
        self.layout.tile_size
    }

    pub fn spacing(&self) -> Vec2 {
        self.layout.spacing
    }

    /// Index of the tile at the given grid cell, if there is one.
    pub fn tile_index(&self, pos: GridPos) -> Option<TileIndex> {
        if !self.tile_count().contains(pos) {
            return None;
        }
        let index = pos.y as u32 * self.layout.columns + pos.x as u32;
        (index < self.tile_total()).then_some(TileIndex(index))
    }

    pub fn tile_pos(&self, index: TileIndex) -> Option<GridPos> {
        (*index < self.tile_total())
            .then(|| GridPos::new((*index % self.layout.columns) as i32, (*index / self.layout.columns) as i32))
    }

    /// Normalized texture coordinates of a tile within the atlas.
    pub fn atlas_uv(&self, index: TileIndex) -> Option<Rect> {
        let pos = self.tile_pos(index)?;
        let cell = vec2(1. / self.layout.columns as f32, 1. / self.layout.rows as f32);
        Some(Rect::from_min_size(pos2(pos.x as f32 * cell.x, pos.y as f32 * cell.y), cell))
    }
}

impl fmt::Debug for Tileset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tileset")
            .field("name", &self.name)
            .field("layout", &self.layout)
            .field("texture", &self.texture_id())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(columns: u32, rows: u32, tile_total: Option<u32>) -> TilesetLayout {
        TilesetLayout { columns, rows, tile_total, ..Default::default() }
    }

    #[test]
    fn tile_indices_are_row_major() {
        let tileset = Tileset::new("test", layout(4, 3, None)).unwrap();
        assert_eq!(tileset.tile_index(GridPos::new(0, 0)), Some(TileIndex(0)));
        assert_eq!(tileset.tile_index(GridPos::new(3, 0)), Some(TileIndex(3)));
        assert_eq!(tileset.tile_index(GridPos::new(1, 2)), Some(TileIndex(9)));
        assert_eq!(tileset.tile_pos(TileIndex(9)), Some(GridPos::new(1, 2)));
    }

    #[test]
    fn cells_outside_grid_have_no_tile() {
        let tileset = Tileset::new("test", layout(4, 3, None)).unwrap();
        assert_eq!(tileset.tile_index(GridPos::new(4, 0)), None);
        assert_eq!(tileset.tile_index(GridPos::new(0, 3)), None);
        assert_eq!(tileset.tile_index(GridPos::new(-1, 1)), None);
        assert_eq!(tileset.tile_pos(TileIndex(12)), None);
    }

    #[test]
    fn partial_last_row() {
        let tileset = Tileset::new("test", layout(4, 3, Some(10))).unwrap();
        assert_eq!(tileset.tile_index(GridPos::new(1, 2)), Some(TileIndex(9)));
        assert_eq!(tileset.tile_index(GridPos::new(2, 2)), None);
        assert_eq!(tileset.tile_pos(TileIndex(10)), None);
    }

    #[test]
    fn invalid_layouts_are_rejected() {
        assert_eq!(
            Tileset::new("test", layout(0, 3, None)).unwrap_err(),
            TilesetError::InvalidGridSize { columns: 0, rows: 3 }
        );
        assert_eq!(
            Tileset::new("test", layout(2, 2, Some(5))).unwrap_err(),
            TilesetError::TileTotalOutOfRange { tile_total: 5, columns: 2, rows: 2 }
        );
        let flat = TilesetLayout { tile_size: vec2(16., 0.), ..Default::default() };
        assert!(matches!(Tileset::new("test", flat), Err(TilesetError::InvalidTileSize { .. })));
    }

    #[test]
    fn oversized_grids_are_rejected() {
        assert_eq!(
            Tileset::new("test", layout(70_000, 70_000, None)).unwrap_err(),
            TilesetError::GridTooLarge { columns: 70_000, rows: 70_000 }
        );
        assert_eq!(
            Tileset::new("test", layout(1 << 31, 1, None)).unwrap_err(),
            TilesetError::GridTooLarge { columns: 1 << 31, rows: 1 }
        );
        let widest = Tileset::new("test", layout(65_535, 65_537, None)).unwrap();
        assert_eq!(widest.tile_total(), u32::MAX);
        assert_eq!(widest.tile_index(GridPos::new(65_534, 65_536)), Some(TileIndex(u32::MAX - 1)));
    }

    #[test]
    fn negative_spacing_is_rejected() {
        let overlapping = TilesetLayout { spacing: vec2(1., -2.), ..Default::default() };
        assert_eq!(Tileset::new("test", overlapping).unwrap_err(), TilesetError::InvalidSpacing { x: 1., y: -2. });
    }

    #[test]
    fn atlas_uv_covers_one_cell() {
        let tileset = Tileset::new("test", layout(4, 2, None)).unwrap();
        let uv = tileset.atlas_uv(TileIndex(5)).unwrap();
        assert_eq!(uv, Rect::from_min_size(pos2(0.25, 0.5), vec2(0.25, 0.5)));
    }
}
