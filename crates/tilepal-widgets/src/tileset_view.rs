use std::rc::Rc;

use egui::{Pos2, Rect, Vec2};
use tilepal_math::{
    space::{OnGrid, OnScreen},
    GridPos,
    GridSize,
};
use tilepal_tileset::{TileIndex, TilesetRef};

use crate::paint::PaintSurface;

/// Margin around the tile grid, wide enough for the outermost selection outline.
pub const VIEW_PADDING: f32 = 8.;

/// Displays every tile of a tileset in a grid and keeps track of the hovered tile.
#[derive(Debug)]
pub struct TilesetView {
    tileset:      Option<TilesetRef>,
    hovered_tile: Option<TileIndex>,
    origin:       Pos2,
    zoom:         f32,
}

impl Default for TilesetView {
    fn default() -> Self {
        Self { tileset: None, hovered_tile: None, origin: Pos2::ZERO, zoom: 1. }
    }
}

impl TilesetView {
    pub fn new(tileset: Option<TilesetRef>) -> Self {
        Self { tileset, ..Default::default() }
    }

    pub fn tileset(&self) -> Option<&TilesetRef> {
        self.tileset.as_ref()
    }

    /// Returns `true` if the view now shows a different tileset than before.
    pub fn set_tileset(&mut self, tileset: Option<TilesetRef>) -> bool {
        let changed = match (&self.tileset, &tileset) {
            (Some(current), Some(new)) => !Rc::ptr_eq(current, new),
            (None, None) => false,
            _ => true,
        };
        if changed {
            self.tileset = tileset;
            self.hovered_tile = None;
        }
        changed
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(0.25, 8.);
    }

    /// Screen position of the top-left corner of the view, including padding.
    pub fn origin(&self) -> Pos2 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Pos2) {
        self.origin = origin;
    }

    pub fn tile_count(&self) -> GridSize {
        self.tileset.as_ref().map_or(GridSize::ZERO, |tileset| tileset.borrow().tile_count())
    }

    pub fn tile_size(&self) -> Vec2 {
        self.tileset.as_ref().map_or(Vec2::ZERO, |tileset| tileset.borrow().tile_size() * self.zoom)
    }

    pub fn spacing(&self) -> Vec2 {
        self.tileset.as_ref().map_or(Vec2::ZERO, |tileset| tileset.borrow().spacing() * self.zoom)
    }

    pub fn cell_pitch(&self) -> Vec2 {
        self.tile_size() + self.spacing()
    }

    /// Size the view needs to show the whole tileset.
    pub fn content_size(&self) -> Vec2 {
        let count = self.tile_count();
        Vec2::new(count.width as f32, count.height as f32) * self.cell_pitch() + Vec2::splat(2. * VIEW_PADDING)
    }

    pub fn tile_index(&self, pos: GridPos) -> Option<TileIndex> {
        self.tileset.as_ref()?.borrow().tile_index(pos)
    }

    pub fn tile_pos(&self, index: TileIndex) -> Option<GridPos> {
        self.tileset.as_ref()?.borrow().tile_pos(index)
    }

    /// Tile under a screen position. The spacing after a tile belongs to that tile.
    pub fn pick_tile_index_at(&self, pos: Pos2) -> Option<TileIndex> {
        let cell = OnScreen(pos).to_grid(OnScreen(self.grid_origin()), self.cell_pitch()).to_grid_pos()?;
        self.tile_index(cell)
    }

    /// Screen position of the top-left corner of a grid cell.
    pub fn cell_location(&self, pos: GridPos) -> Pos2 {
        OnGrid::from(pos).to_screen(OnScreen(self.grid_origin()), self.cell_pitch()).0
    }

    pub fn tile_index_location(&self, index: TileIndex) -> Option<Pos2> {
        self.tile_pos(index).map(|pos| self.cell_location(pos))
    }

    pub fn hovered_tile_index(&self) -> Option<TileIndex> {
        self.hovered_tile
    }

    pub fn set_hovered_tile_index(&mut self, index: Option<TileIndex>) {
        self.hovered_tile = index;
    }

    pub fn update_hover(&mut self, pointer_pos: Pos2) {
        self.hovered_tile = self.pick_tile_index_at(pointer_pos);
    }

    pub fn clear_hover(&mut self) {
        self.hovered_tile = None;
    }

    pub fn paint_tiles(&self, surface: &mut impl PaintSurface) {
        let Some(tileset) = &self.tileset else {
            return;
        };
        let tileset = tileset.borrow();
        let texture = tileset.texture_id();
        let tile_size = self.tile_size();
        for index in (0..tileset.tile_total()).map(TileIndex) {
            if let (Some(pos), Some(uv)) = (tileset.tile_pos(index), tileset.atlas_uv(index)) {
                surface.draw_tile(texture, Rect::from_min_size(self.cell_location(pos), tile_size), uv);
            }
        }
    }

    fn grid_origin(&self) -> Pos2 {
        self.origin + Vec2::splat(VIEW_PADDING)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use egui::{pos2, vec2};
    use tilepal_tileset::{Tileset, TilesetLayout};

    use super::*;
    use crate::recording::{DrawCommand, RecordingSurface};

    fn tileset(tile_total: Option<u32>) -> TilesetRef {
        let layout =
            TilesetLayout { columns: 4, rows: 3, tile_total, tile_size: vec2(16., 16.), spacing: vec2(2., 2.) };
        Rc::new(RefCell::new(Tileset::new("test", layout).unwrap()))
    }

    fn view() -> TilesetView {
        let mut view = TilesetView::new(Some(tileset(None)));
        view.set_origin(pos2(100., 50.));
        view
    }

    #[test]
    fn picking_maps_pointer_to_tile() {
        let view = view();
        let grid_origin = pos2(108., 58.);
        assert_eq!(view.pick_tile_index_at(grid_origin), Some(TileIndex(0)));
        assert_eq!(view.pick_tile_index_at(grid_origin + vec2(18. * 2. + 5., 18. + 17.)), Some(TileIndex(6)));
        assert_eq!(view.pick_tile_index_at(grid_origin - vec2(1., 0.)), None);
        assert_eq!(view.pick_tile_index_at(grid_origin + vec2(18. * 4. + 1., 0.)), None);
        assert_eq!(view.pick_tile_index_at(grid_origin + vec2(0., 18. * 3. + 1.)), None);
    }

    #[test]
    fn picking_without_tileset_finds_nothing() {
        let view = TilesetView::default();
        assert_eq!(view.pick_tile_index_at(pos2(10., 10.)), None);
        assert_eq!(view.tile_count(), GridSize::ZERO);
        assert_eq!(view.content_size(), Vec2::splat(2. * VIEW_PADDING));
    }

    #[test]
    fn location_and_picking_agree() {
        let view = view();
        for index in (0..12).map(TileIndex) {
            let location = view.tile_index_location(index).unwrap();
            assert_eq!(view.pick_tile_index_at(location + vec2(1., 1.)), Some(index));
        }
    }

    #[test]
    fn zoom_scales_cells() {
        let mut view = view();
        view.set_zoom(2.);
        assert_eq!(view.cell_pitch(), vec2(36., 36.));
        assert_eq!(view.content_size(), vec2(4. * 36. + 16., 3. * 36. + 16.));
        assert_eq!(view.cell_location(GridPos::new(1, 1)), pos2(108. + 36., 58. + 36.));
    }

    #[test]
    fn hover_follows_pointer() {
        let mut view = view();
        view.update_hover(pos2(108. + 20., 58.));
        assert_eq!(view.hovered_tile_index(), Some(TileIndex(1)));
        view.update_hover(pos2(0., 0.));
        assert_eq!(view.hovered_tile_index(), None);
    }

    #[test]
    fn changing_tileset_is_detected_by_identity() {
        let shared = tileset(None);
        let mut view = TilesetView::new(Some(Rc::clone(&shared)));
        view.set_hovered_tile_index(Some(TileIndex(3)));
        assert!(!view.set_tileset(Some(Rc::clone(&shared))));
        assert_eq!(view.hovered_tile_index(), Some(TileIndex(3)));
        assert!(view.set_tileset(Some(tileset(None))));
        assert_eq!(view.hovered_tile_index(), None);
        assert!(view.set_tileset(None));
        assert!(!view.set_tileset(None));
    }

    #[test]
    fn painting_draws_only_existing_tiles() {
        let mut view = TilesetView::new(Some(tileset(Some(10))));
        view.set_origin(Pos2::ZERO);
        let mut surface = RecordingSurface::new(Rect::EVERYTHING);
        view.paint_tiles(&mut surface);
        let tiles = surface.commands().filter(|cmd| matches!(cmd, DrawCommand::Tile { .. })).count();
        assert_eq!(tiles, 10);
        assert_eq!(
            surface.commands().last(),
            Some(&DrawCommand::Tile {
                texture: None,
                rect:    Rect::from_min_size(pos2(8. + 18., 8. + 36.), vec2(16., 16.)),
                uv:      Rect::from_min_size(pos2(0.25, 2. / 3.), vec2(0.25, 1. / 3.)),
            })
        );
    }
}
