use egui::{vec2, Color32, PointerButton, Pos2, Rect};
use serde::{Deserialize, Serialize};
use tilepal_math::{Grid, GridPos, GridRect};
use tilepal_tileset::{Tile, TileIndex, TilesetRef};

use crate::{
    paint::PaintSurface,
    tileset_view::TilesetView,
};

/// Notifications raised by [`SourcePaletteView`] for the host editor.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PaletteEvent {
    /// The stored selection rectangle has changed.
    SelectionChanged,
    /// The user finished editing the selection, or the tileset was replaced.
    SelectionEditingFinished,
}

/// Pointer input in screen coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerEvent {
    Pressed { pos: Pos2, button: PointerButton },
    Moved { pos: Pos2 },
    Released,
    Left,
}

#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PaletteColors {
    pub highlight:        Color32,
    pub highlight_border: Color32,
}

/// Tileset view that lets the user drag out a rectangular selection of tiles.
///
/// Notifications accumulate until the host takes them with [`SourcePaletteView::take_events`],
/// which it should do once per frame.
#[derive(Debug, Default)]
pub struct SourcePaletteView {
    base:              TilesetView,
    colors:            PaletteColors,
    selected_area:     GridRect,
    selected_tiles:    Grid<Option<Tile>>,
    drag_anchor:       Option<GridPos>,
    events:            Vec<PaletteEvent>,
    repaint_requested: bool,
}

// -------------------------------------------------------------------------------------------------

impl Default for PaletteColors {
    fn default() -> Self {
        Self { highlight: Color32::WHITE, highlight_border: Color32::BLACK }
    }
}

impl PaletteColors {
    fn border_with_alpha(&self, alpha: u8) -> Color32 {
        let [r, g, b, _] = self.highlight_border.to_srgba_unmultiplied();
        Color32::from_rgba_unmultiplied(r, g, b, alpha)
    }
}

// -------------------------------------------------------------------------------------------------

impl SourcePaletteView {
    pub fn new(tileset: Option<TilesetRef>) -> Self {
        Self { base: TilesetView::new(tileset), ..Default::default() }
    }

    pub fn base(&self) -> &TilesetView {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut TilesetView {
        &mut self.base
    }

    pub fn colors(&self) -> PaletteColors {
        self.colors
    }

    pub fn set_colors(&mut self, colors: PaletteColors) {
        if self.colors != colors {
            self.colors = colors;
            self.repaint_requested = true;
        }
    }

    pub fn selected_area(&self) -> GridRect {
        self.selected_area
    }

    /// Tiles covered by the selection, one cell per selected grid cell.
    /// Cells past the last tile of the tileset hold `None`.
    pub fn selected_tiles(&self) -> &Grid<Option<Tile>> {
        &self.selected_tiles
    }

    /// Stores `area` clamped to the tileset bounds.
    ///
    /// Raises [`PaletteEvent::SelectionChanged`] only if the stored rectangle actually changes.
    pub fn set_selected_area(&mut self, area: GridRect) {
        let area = area.clamped_to(self.base.tile_count());
        if area == self.selected_area {
            return;
        }
        self.selected_area = area;
        self.refresh_selected_tiles();
        log::trace!("Selected area changed to {area}");
        self.repaint_requested = true;
        self.events.push(PaletteEvent::SelectionChanged);
    }

    pub fn is_selecting(&self) -> bool {
        self.drag_anchor.is_some()
    }

    pub fn set_tileset(&mut self, tileset: Option<TilesetRef>) {
        if self.base.set_tileset(tileset) {
            self.on_tileset_changed();
        }
    }

    /// Has to be called after the current tileset was modified in place.
    pub fn tileset_modified(&mut self) {
        self.base.clear_hover();
        self.on_tileset_changed();
    }

    pub fn select_all(&mut self) {
        self.set_selected_area(GridRect::from_pos_size(GridPos::ZERO, self.base.tile_count()));
        self.events.push(PaletteEvent::SelectionEditingFinished);
    }

    pub fn clear_selection(&mut self) {
        self.set_selected_area(GridRect::EMPTY);
        self.events.push(PaletteEvent::SelectionEditingFinished);
    }

    /// Notifications raised since the last call, oldest first. Leaves the queue empty.
    pub fn take_events(&mut self) -> Vec<PaletteEvent> {
        std::mem::take(&mut self.events)
    }

    /// Notifications not taken yet, without draining them.
    pub fn pending_events(&self) -> &[PaletteEvent] {
        &self.events
    }

    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Pressed { pos, button } => self.on_pointer_pressed(pos, button),
            PointerEvent::Moved { pos } => self.on_pointer_moved(pos),
            PointerEvent::Released => self.on_pointer_released(),
            PointerEvent::Left => self.on_pointer_left(),
        }
    }

    fn on_pointer_pressed(&mut self, pos: Pos2, button: PointerButton) {
        if button != PointerButton::Primary {
            return;
        }
        let Some(anchor) = self.tile_pos_at(pos) else {
            return;
        };
        log::debug!("Started selecting tiles at ({}, {})", anchor.x, anchor.y);
        self.drag_anchor = Some(anchor);
        self.set_selected_area(GridRect::new(anchor.x, anchor.y, 1, 1));
        self.base.set_hovered_tile_index(None);
        self.repaint_requested = true;
    }

    fn on_pointer_moved(&mut self, pos: Pos2) {
        match self.drag_anchor {
            Some(anchor) => {
                if let Some(tile_pos) = self.tile_pos_at(pos) {
                    self.set_selected_area(GridRect::from_corners_inclusive(anchor, tile_pos));
                }
            }
            None => {
                let hovered = self.base.hovered_tile_index();
                self.base.update_hover(pos);
                if hovered != self.base.hovered_tile_index() {
                    self.repaint_requested = true;
                }
            }
        }
    }

    fn on_pointer_released(&mut self) {
        if self.drag_anchor.take().is_some() {
            log::debug!("Finished selecting tiles: {}", self.selected_area);
        } else {
            self.set_selected_area(GridRect::EMPTY);
        }
        self.events.push(PaletteEvent::SelectionEditingFinished);
    }

    fn on_pointer_left(&mut self) {
        if self.base.hovered_tile_index().is_some() {
            self.base.clear_hover();
            self.repaint_requested = true;
        }
    }

    fn on_tileset_changed(&mut self) {
        log::debug!(
            "Tileset changed to {:?}, clearing selection",
            self.base.tileset().map(|tileset| tileset.borrow().name().to_owned())
        );
        self.drag_anchor = None;
        self.set_selected_area(GridRect::EMPTY);
        self.refresh_selected_tiles();
        self.repaint_requested = true;
        self.events.push(PaletteEvent::SelectionEditingFinished);
    }

    fn tile_pos_at(&self, pos: Pos2) -> Option<GridPos> {
        self.base.pick_tile_index_at(pos).and_then(|index| self.base.tile_pos(index))
    }

    fn refresh_selected_tiles(&mut self) {
        let area = self.selected_area;
        self.selected_tiles.resize_clear(area.width.max(0) as usize, area.height.max(0) as usize);
        for cell in area.cells() {
            let (x, y) = ((cell.x - area.x) as usize, (cell.y - area.y) as usize);
            self.selected_tiles[(x, y)] = self.base.tile_index(cell).map(Tile::from);
        }
    }

    // ---------------------------------------------------------------------------------------------

    /// Screen rectangle around `tiles_w` by `tiles_h` cells starting at `start`.
    ///
    /// The rectangle begins one point before the cell and grows by `offset` on every side.
    pub fn drawing_area_rect(&self, start: GridPos, tiles_w: i32, tiles_h: i32, offset: f32) -> Rect {
        let pitch = self.base.cell_pitch();
        let location = self.base.cell_location(start);
        Rect::from_min_size(
            location - vec2(1. + offset, 1. + offset),
            vec2(tiles_w as f32 * pitch.x + offset * 2., tiles_h as f32 * pitch.y + offset * 2.),
        )
    }

    fn drawing_tile_rect(&self, index: TileIndex, offset: f32) -> Option<Rect> {
        self.base.tile_pos(index).map(|pos| self.drawing_area_rect(pos, 1, 1, offset))
    }

    /// Draws the tiles with the hover and selection overlays on top.
    ///
    /// Overlays are left out while the view is disabled.
    pub fn paint(&self, surface: &mut impl PaintSurface, enabled: bool) {
        let highlight = self.colors.highlight;
        let border = self.colors.highlight_border;
        let wash = self.colors.border_with_alpha(32);

        let regular_clip = surface.clip();
        let mut selection_clip = regular_clip.clone();
        let selection = (enabled && !self.selected_area.is_empty()).then_some(self.selected_area);
        let hovered_rect = enabled
            .then(|| self.base.hovered_tile_index())
            .flatten()
            .and_then(|index| self.drawing_tile_rect(index, -1.));

        if let Some(area) = selection {
            let rect = self.drawing_area_rect(area.pos(), area.width, area.height, -1.);
            surface.fill_rect(rect, wash);
            selection_clip.exclude(rect.expand(1.));
            surface.set_clip(selection_clip.clone());
        }

        if let Some(rect) = hovered_rect {
            surface.fill_rect(rect, wash);
        }

        surface.set_clip(regular_clip.clone());
        self.base.paint_tiles(surface);
        surface.set_clip(selection_clip);

        if let Some(mut rect) = hovered_rect {
            surface.fill_rect(rect, wash);
            for color in [border, highlight, border] {
                rect = rect.expand(1.);
                surface.stroke_rect(rect, color);
            }
        }

        if let Some(area) = selection {
            surface.set_clip(regular_clip);
            let mut rect = self.drawing_area_rect(area.pos(), area.width, area.height, 0.);
            let outlines = [border, highlight, highlight, border];
            let shadow = [128, 64, 32].map(|alpha| self.colors.border_with_alpha(alpha));
            for color in outlines.into_iter().chain(shadow) {
                surface.stroke_rect(rect, color);
                rect = rect.expand(1.);
            }
        }
    }
}
