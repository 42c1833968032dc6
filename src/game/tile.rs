use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a tile, kept across slides and by the survivor of a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A numbered piece occupying one board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    /// Set when the tile was produced by a merge during the move in progress.
    pub(crate) merged_this_move: bool,
}

impl Tile {
    pub fn new(id: TileId, value: u32) -> Self {
        Tile {
            id,
            value,
            merged_this_move: false,
        }
    }

    pub fn merged_this_move(&self) -> bool {
        self.merged_this_move
    }
}

/// Largest value a tile may hold; merging two of these would overflow `u32`.
pub const MAX_TILE_VALUE: u32 = 1 << 30;

/// Tile values are powers of two from 2 up to `MAX_TILE_VALUE`.
pub fn is_valid_tile_value(value: u32) -> bool {
    (2..=MAX_TILE_VALUE).contains(&value) && value.is_power_of_two()
}
