use crate::game::board::{Board, Position, SIZE};

pub const WIN_VALUE: u32 = 2048;

/// True if any tile has reached `target`.
pub fn has_tile_value(board: &Board, target: u32) -> bool {
    board.tiles().any(|(_, tile)| tile.value == target)
}

/// True if some horizontally or vertically adjacent pair shares a value.
///
/// Only right and down neighbours are scanned; adjacency is symmetric.
pub fn has_adjacent_pair(board: &Board) -> bool {
    board.tiles().any(|(pos, tile)| {
        let right = (pos.col + 1 < SIZE).then(|| Position::new(pos.row, pos.col + 1));
        let down = (pos.row + 1 < SIZE).then(|| Position::new(pos.row + 1, pos.col));
        [right, down]
            .into_iter()
            .flatten()
            .filter_map(|neighbour| board.get(neighbour))
            .any(|other| other.value == tile.value)
    })
}

/// No empty cell and no equal neighbours: no move can change the board.
pub fn is_lost(board: &Board) -> bool {
    board.is_full() && !has_adjacent_pair(board)
}

/// Fires `true` exactly once per session, the first time a tile reaches the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinTracker {
    target: u32,
    won: bool,
}

impl WinTracker {
    pub fn new(target: u32) -> Self {
        WinTracker { target, won: false }
    }

    pub fn with_state(target: u32, won: bool) -> Self {
        WinTracker { target, won }
    }

    pub fn has_won(&self) -> bool {
        self.won
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn reset(&mut self) {
        self.won = false;
    }

    pub fn check(&mut self, board: &Board) -> bool {
        if self.won {
            return false;
        }
        self.won = has_tile_value(board, self.target);
        self.won
    }
}

impl Default for WinTracker {
    fn default() -> Self {
        WinTracker::new(WIN_VALUE)
    }
}
