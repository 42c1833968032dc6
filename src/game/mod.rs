pub mod apply_move;
pub mod board;
pub mod direction;
pub mod session;
pub mod snapshot;
pub mod spawn;
pub mod terminal;
pub mod tile;
pub mod tile_id;

pub use apply_move::{apply_move, can_move_in, Merge, MoveOutcome, TileMotion};
pub use board::{Board, Position, SIZE};
pub use direction::Direction;
pub use session::{GameStatus, Rules, Session, TurnReport};
pub use snapshot::{Snapshot, TileRecord};
pub use spawn::{SpawnPolicy, SpawnedTile};
pub use terminal::{has_adjacent_pair, has_tile_value, is_lost, WinTracker, WIN_VALUE};
pub use tile::{is_valid_tile_value, Tile, TileId, MAX_TILE_VALUE};
pub use tile_id::TileIdAllocator;
