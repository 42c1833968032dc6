use crate::game::tile::{is_valid_tile_value, Tile};
use crate::game::tile_id::TileIdAllocator;
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the board.
pub const SIZE: usize = 4;

/// A cell coordinate, row-major from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    pub fn in_range(self) -> bool {
        self.row < SIZE && self.col < SIZE
    }

    /// The neighbouring cell one step along `(dr, dc)`, if it is on the board.
    pub fn step(self, (dr, dc): (isize, isize)) -> Option<Position> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let next = Position { row, col };
        next.in_range().then_some(next)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 4x4 grid. Owns every tile placed on it.
///
/// Only the primitive mutations live here (`place`, `clear`, `move_tile`,
/// `merge_into`); the move algorithm is in [`crate::game::apply_move`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [[Option<Tile>; SIZE]; SIZE],
}

fn violation(pos: Position, reason: &'static str) -> GameError {
    GameError::InvariantViolation {
        row: pos.row,
        col: pos.col,
        reason,
    }
}

fn check_range(pos: Position) -> Result<()> {
    if pos.in_range() {
        Ok(())
    } else {
        Err(violation(pos, "coordinate out of range"))
    }
}

impl Board {
    pub fn empty() -> Self {
        Board::default()
    }

    /// Build a board from a grid of values (0 = empty), allocating ids row-major.
    pub fn from_rows(rows: [[u32; SIZE]; SIZE], ids: &mut TileIdAllocator) -> Result<Self> {
        let mut board = Board::empty();
        for pos in all_positions() {
            let value = rows[pos.row][pos.col];
            if value == 0 {
                continue;
            }
            if !is_valid_tile_value(value) {
                return Err(violation(pos, "tile value is not a power of two >= 2"));
            }
            board.place(pos, Tile::new(ids.allocate(), value))?;
        }
        Ok(board)
    }

    /// Grid of tile values, 0 for empty cells.
    pub fn values(&self) -> [[u32; SIZE]; SIZE] {
        let mut rows = [[0; SIZE]; SIZE];
        for (pos, tile) in self.tiles() {
            rows[pos.row][pos.col] = tile.value;
        }
        rows
    }

    pub fn get(&self, pos: Position) -> Option<&Tile> {
        if !pos.in_range() {
            return None;
        }
        self.cells[pos.row][pos.col].as_ref()
    }

    pub fn has_tile(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Unoccupied coordinates in row-major order, computed from the current cells.
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        all_positions().filter(move |pos| self.cells[pos.row][pos.col].is_none())
    }

    /// Occupied cells with their tiles, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        all_positions().filter_map(move |pos| {
            self.cells[pos.row][pos.col]
                .as_ref()
                .map(|tile| (pos, tile))
        })
    }

    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    pub fn is_full(&self) -> bool {
        self.empty_cells().next().is_none()
    }

    /// Sum of all tile values on the board.
    pub fn total_value(&self) -> u64 {
        self.tiles().map(|(_, tile)| u64::from(tile.value)).sum()
    }

    /// Put a tile into an empty cell.
    pub fn place(&mut self, pos: Position, tile: Tile) -> Result<()> {
        check_range(pos)?;
        let cell = &mut self.cells[pos.row][pos.col];
        if cell.is_some() {
            return Err(violation(pos, "cell already occupied"));
        }
        *cell = Some(tile);
        Ok(())
    }

    /// Remove and return whatever occupies the cell.
    pub fn clear(&mut self, pos: Position) -> Result<Option<Tile>> {
        check_range(pos)?;
        Ok(self.cells[pos.row][pos.col].take())
    }

    /// Slide the tile at `from` into the empty cell `to`.
    pub fn move_tile(&mut self, from: Position, to: Position) -> Result<()> {
        check_range(from)?;
        check_range(to)?;
        if self.cells[to.row][to.col].is_some() {
            return Err(violation(to, "slide destination occupied"));
        }
        let tile = self.cells[from.row][from.col]
            .take()
            .ok_or_else(|| violation(from, "no tile to move"))?;
        self.cells[to.row][to.col] = Some(tile);
        Ok(())
    }

    /// Merge the tile at `from` into the equal, not-yet-merged tile at `to`.
    ///
    /// The stationary tile is destroyed; the mover keeps its id, doubles its
    /// value and is flagged as merged for the rest of the move.
    pub fn merge_into(&mut self, from: Position, to: Position) -> Result<Tile> {
        check_range(from)?;
        check_range(to)?;
        let mover = self.cells[from.row][from.col]
            .ok_or_else(|| violation(from, "no tile to merge"))?;
        let target = self.cells[to.row][to.col]
            .ok_or_else(|| violation(to, "no tile to merge into"))?;
        if from == to || target.value != mover.value || target.merged_this_move {
            return Err(violation(to, "merge target is not an equal unmerged tile"));
        }

        let value = mover
            .value
            .checked_mul(2)
            .ok_or_else(|| violation(to, "merged value overflows"))?;
        let merged = Tile {
            id: mover.id,
            value,
            merged_this_move: true,
        };
        self.cells[from.row][from.col] = None;
        self.cells[to.row][to.col] = Some(merged);
        Ok(merged)
    }

    pub(crate) fn clear_merge_flags(&mut self) {
        for tile in self.cells.iter_mut().flatten().flatten() {
            tile.merged_this_move = false;
        }
    }
}

pub(crate) fn all_positions() -> impl Iterator<Item = Position> {
    (0..SIZE).flat_map(|row| (0..SIZE).map(move |col| Position { row, col }))
}

fn format_cell(tile: Option<&Tile>) -> String {
    match tile {
        None => format!("{:^7}", "."),
        Some(tile) => format!("{:^7}", tile.value),
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIZE {
            let line: Vec<String> = (0..SIZE)
                .map(|col| format_cell(self.get(Position::new(row, col))))
                .collect();
            writeln!(f, "{}", line.join("|"))?;
        }
        Ok(())
    }
}
