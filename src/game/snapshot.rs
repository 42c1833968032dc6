use crate::game::board::{Board, Position};
use crate::game::tile::{is_valid_tile_value, Tile, TileId};
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One tile as persisted: identity, value and cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRecord {
    pub id: TileId,
    pub value: u32,
    pub row: usize,
    pub col: usize,
}

/// Immutable copy of a session: board contents, score, id high-water mark and win flag.
///
/// Used both for single-level undo and for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tiles: Vec<TileRecord>,
    pub score: u64,
    /// Next tile id to hand out.
    pub id_counter: u64,
    #[serde(default)]
    pub has_won: bool,
}

fn corrupt(msg: String) -> GameError {
    GameError::CorruptSnapshot(msg)
}

impl Snapshot {
    pub fn capture(board: &Board, score: u64, id_counter: u64, has_won: bool) -> Self {
        let tiles = board
            .tiles()
            .map(|(pos, tile)| TileRecord {
                id: tile.id,
                value: tile.value,
                row: pos.row,
                col: pos.col,
            })
            .collect();
        Snapshot {
            tiles,
            score,
            id_counter,
            has_won,
        }
    }

    /// Check that the records describe a board the engine could have produced.
    pub fn validate(&self) -> Result<()> {
        let mut cells = HashSet::new();
        let mut ids = HashSet::new();
        for record in &self.tiles {
            let pos = Position::new(record.row, record.col);
            if !pos.in_range() {
                return Err(corrupt(format!("tile {} out of range at {}", record.id, pos)));
            }
            if !cells.insert(pos) {
                return Err(corrupt(format!("two tiles share cell {}", pos)));
            }
            if !ids.insert(record.id) {
                return Err(corrupt(format!("duplicate tile id {}", record.id)));
            }
            if record.id.0 == 0 || record.id.0 >= self.id_counter {
                return Err(corrupt(format!(
                    "tile id {} outside allocated range (counter {})",
                    record.id, self.id_counter
                )));
            }
            if !is_valid_tile_value(record.value) {
                return Err(corrupt(format!(
                    "tile {} has invalid value {}",
                    record.id, record.value
                )));
            }
        }
        Ok(())
    }

    /// Rebuild the board described by this snapshot.
    pub fn to_board(&self) -> Result<Board> {
        self.validate()?;
        let mut board = Board::empty();
        for record in &self.tiles {
            board.place(
                Position::new(record.row, record.col),
                Tile::new(record.id, record.value),
            )?;
        }
        Ok(board)
    }
}
