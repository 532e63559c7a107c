mod error;
mod tile;
mod tileset;

use std::{cell::RefCell, rc::Rc};

pub use crate::{
    error::TilesetError,
    tile::{Tile, TileIndex},
    tileset::{Tileset, TilesetLayout},
};

pub type TilesetRef = Rc<RefCell<Tileset>>;
