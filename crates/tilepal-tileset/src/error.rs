use thiserror::Error;

#[derive(Copy, Clone, Debug, Error, PartialEq)]
pub enum TilesetError {
    #[error("Tileset grid must have at least one column and one row, got {columns}x{rows}")]
    InvalidGridSize { columns: u32, rows: u32 },
    #[error("Tileset grid of {columns}x{rows} cells is too large")]
    GridTooLarge { columns: u32, rows: u32 },
    #[error("Tile size must be positive, got {width}x{height}")]
    InvalidTileSize { width: f32, height: f32 },
    #[error("Tile spacing must not be negative, got {x}x{y}")]
    InvalidSpacing { x: f32, y: f32 },
    #[error("Tileset declares {tile_total} tiles, which does not fit into a {columns}x{rows} grid")]
    TileTotalOutOfRange { tile_total: u32, columns: u32, rows: u32 },
}
