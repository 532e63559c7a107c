use egui::{pos2, Color32, Painter, Pos2, Rect, Rounding, Stroke, TextureId};

/// A set of non-overlapping rectangles that drawing is restricted to.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipRegion {
    rects: Vec<Rect>,
}

/// Drawing target of the tileset views.
///
/// Every drawing call only touches the pixels inside the active [`ClipRegion`].
pub trait PaintSurface {
    fn clip(&self) -> ClipRegion;

    fn set_clip(&mut self, clip: ClipRegion);

    fn fill_rect(&mut self, rect: Rect, color: Color32);

    /// One point wide outline along the edges of `rect`.
    fn stroke_rect(&mut self, rect: Rect, color: Color32);

    /// Draws the part of the tileset atlas under `uv` into `rect`.
    /// Without a texture the surface draws a neutral placeholder instead.
    fn draw_tile(&mut self, texture: Option<TextureId>, rect: Rect, uv: Rect);
}

pub struct EguiSurface<'p> {
    painter: &'p Painter,
    clip:    ClipRegion,
}

// -------------------------------------------------------------------------------------------------

impl ClipRegion {
    pub fn from_rect(rect: Rect) -> Self {
        Self { rects: rect.is_positive().then_some(rect).into_iter().collect() }
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Removes `hole` from the region, splitting every rectangle it overlaps into up to four pieces.
    pub fn exclude(&mut self, hole: Rect) {
        self.rects = self.rects.iter().flat_map(|&rect| subtract(rect, hole)).collect();
    }

    pub fn contains(&self, pos: Pos2) -> bool {
        self.rects.iter().any(|rect| rect.contains(pos))
    }

    /// Whether any part of `rect` with a non-zero area lies inside the region.
    pub fn overlaps(&self, rect: Rect) -> bool {
        self.rects.iter().any(|clip| clip.intersect(rect).is_positive())
    }
}

fn subtract(rect: Rect, hole: Rect) -> Vec<Rect> {
    let overlap = rect.intersect(hole);
    if !overlap.is_positive() {
        return vec![rect];
    }
    let top = Rect::from_min_max(rect.min, pos2(rect.max.x, overlap.min.y));
    let bottom = Rect::from_min_max(pos2(rect.min.x, overlap.max.y), rect.max);
    let left = Rect::from_min_max(pos2(rect.min.x, overlap.min.y), pos2(overlap.min.x, overlap.max.y));
    let right = Rect::from_min_max(pos2(overlap.max.x, overlap.min.y), pos2(rect.max.x, overlap.max.y));
    [top, bottom, left, right].into_iter().filter(Rect::is_positive).collect()
}

// -------------------------------------------------------------------------------------------------

impl<'p> EguiSurface<'p> {
    pub fn new(painter: &'p Painter) -> Self {
        Self { painter, clip: ClipRegion::from_rect(painter.clip_rect()) }
    }

    fn clipped_painters(&self) -> impl Iterator<Item = Painter> + '_ {
        self.clip.rects().iter().map(|&rect| self.painter.with_clip_rect(rect))
    }
}

impl PaintSurface for EguiSurface<'_> {
    fn clip(&self) -> ClipRegion {
        self.clip.clone()
    }

    fn set_clip(&mut self, clip: ClipRegion) {
        self.clip = clip;
    }

    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        for painter in self.clipped_painters() {
            painter.rect_filled(rect, Rounding::ZERO, color);
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color32) {
        for painter in self.clipped_painters() {
            painter.rect_stroke(rect, Rounding::ZERO, Stroke::new(1., color));
        }
    }

    fn draw_tile(&mut self, texture: Option<TextureId>, rect: Rect, uv: Rect) {
        for painter in self.clipped_painters() {
            match texture {
                Some(texture) => {
                    painter.image(texture, rect, uv, Color32::WHITE);
                }
                None => {
                    painter.rect_filled(rect, Rounding::ZERO, Color32::from_gray(60));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use egui::vec2;

    use super::*;

    fn area(region: &ClipRegion) -> f32 {
        region.rects().iter().map(Rect::area).sum()
    }

    #[test]
    fn excluding_inner_hole_leaves_frame() {
        let mut region = ClipRegion::from_rect(Rect::from_min_size(Pos2::ZERO, vec2(100., 100.)));
        region.exclude(Rect::from_min_size(pos2(20., 30.), vec2(10., 10.)));
        assert_eq!(region.rects().len(), 4);
        assert_eq!(area(&region), 100. * 100. - 10. * 10.);
        assert!(!region.overlaps(Rect::from_min_size(pos2(22., 32.), vec2(2., 2.))));
        assert!(region.contains(pos2(5., 5.)));
    }

    #[test]
    fn excluding_hole_over_edge() {
        let mut region = ClipRegion::from_rect(Rect::from_min_size(Pos2::ZERO, vec2(50., 50.)));
        region.exclude(Rect::from_min_max(pos2(-10., 40.), pos2(60., 70.)));
        assert_eq!(region.rects(), &[Rect::from_min_max(Pos2::ZERO, pos2(50., 40.))]);
    }

    #[test]
    fn excluding_disjoint_hole_is_noop() {
        let rect = Rect::from_min_size(Pos2::ZERO, vec2(50., 50.));
        let mut region = ClipRegion::from_rect(rect);
        region.exclude(Rect::from_min_size(pos2(60., 0.), vec2(5., 5.)));
        assert_eq!(region, ClipRegion::from_rect(rect));
    }

    #[test]
    fn excluding_everything_empties_region() {
        let mut region = ClipRegion::from_rect(Rect::from_min_size(pos2(10., 10.), vec2(5., 5.)));
        region.exclude(Rect::EVERYTHING);
        assert!(region.is_empty());
    }

    #[test]
    fn repeated_exclusions_compose() {
        let mut region = ClipRegion::from_rect(Rect::from_min_size(Pos2::ZERO, vec2(100., 100.)));
        region.exclude(Rect::from_min_size(pos2(10., 10.), vec2(20., 20.)));
        region.exclude(Rect::from_min_size(pos2(20., 20.), vec2(20., 20.)));
        assert_eq!(area(&region), 100. * 100. - 2. * 400. + 100.);
        assert!(!region.contains(pos2(35., 35.)));
    }
}
