pub mod paint;
pub mod palette_widget;
pub mod recording;
pub mod source_palette;
pub mod tileset_view;
