use shrinkwraprs::Shrinkwrap;

#[derive(Shrinkwrap, Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct TileIndex(pub u32);

/// Reference to a single tile of a tileset.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Tile {
    pub index: TileIndex,
}

impl Tile {
    pub const fn new(index: TileIndex) -> Self {
        Self { index }
    }
}

impl From<TileIndex> for Tile {
    fn from(index: TileIndex) -> Self {
        Self::new(index)
    }
}
