use egui::{ecolor::Hsva, Color32, ColorImage};
use tilepal_tileset::TilesetLayout;

/// Procedurally colored atlas for a tileset layout, one tinted tile per cell.
///
/// Cells past the last tile stay transparent.
pub fn generate_atlas(layout: &TilesetLayout, seed: u32) -> ColorImage {
    let tile_w = layout.tile_size.x.round().max(1.) as usize;
    let tile_h = layout.tile_size.y.round().max(1.) as usize;
    let columns = layout.columns as usize;
    let mut atlas = ColorImage::new([tile_w * columns, tile_h * layout.rows as usize], Color32::TRANSPARENT);

    for index in 0..layout.tile_total() as usize {
        let (left, top) = ((index % columns) * tile_w, (index / columns) * tile_h);
        let fill = tile_color(index as u32, seed);
        let [r, g, b, _] = fill.to_array();
        let edge = Color32::from_rgb(darken(r), darken(g), darken(b));
        for y in 0..tile_h {
            for x in 0..tile_w {
                let on_edge = x == 0 || y == 0 || x == tile_w - 1 || y == tile_h - 1;
                let on_stripe = (x + y + index) % 6 == 0;
                atlas[(left + x, top + y)] = if on_edge || on_stripe { edge } else { fill };
            }
        }
    }
    atlas
}

fn darken(channel: u8) -> u8 {
    (channel as u16 * 3 / 5) as u8
}

fn tile_color(index: u32, seed: u32) -> Color32 {
    let hash = (index ^ seed.rotate_left(16)).wrapping_mul(0x9E37_79B9);
    let hue = (hash >> 8) as f32 / (1 << 24) as f32;
    let value = 0.55 + ((hash & 0xFF) as f32 / 255.) * 0.4;
    Hsva::new(hue, 0.65, value, 1.).into()
}
