use crate::game::board::{Board, Position};
use crate::game::tile::{Tile, TileId};
use crate::game::tile_id::TileIdAllocator;
use crate::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A tile introduced into an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedTile {
    pub id: TileId,
    pub value: u32,
    pub position: Position,
}

/// Where and what to spawn: a uniformly random empty cell, a 2 or (rarely) a 4.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPolicy {
    pub four_probability: f64,
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        SpawnPolicy {
            four_probability: 0.1,
        }
    }
}

impl SpawnPolicy {
    pub fn new(four_probability: f64) -> Self {
        SpawnPolicy { four_probability }
    }

    fn draw_value<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if rng.random::<f64>() < self.four_probability {
            4
        } else {
            2
        }
    }

    /// Place a new tile on a random empty cell. Returns `None` when the board is full.
    ///
    /// With `force_two` the value is always 2 (used for the opening tiles).
    /// The id is only allocated once a cell was found.
    pub fn spawn<R: Rng + ?Sized>(
        &self,
        board: &mut Board,
        ids: &mut TileIdAllocator,
        rng: &mut R,
        force_two: bool,
    ) -> Result<Option<SpawnedTile>> {
        let empty: Vec<Position> = board.empty_cells().collect();
        if empty.is_empty() {
            return Ok(None);
        }
        let position = empty[rng.random_range(0..empty.len())];
        let value = if force_two { 2 } else { self.draw_value(rng) };

        let id = ids.allocate();
        board.place(position, Tile::new(id, value))?;
        log::debug!("spawned {} value={} at {}", id, value, position);
        Ok(Some(SpawnedTile {
            id,
            value,
            position,
        }))
    }
}
