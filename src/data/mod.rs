pub mod best_score;
pub mod saved_game;
pub mod store;

pub use best_score::BestScore;
pub use saved_game::{clear_saved_session, load_or_new, load_snapshot, save_session, SavedGame};
pub use store::{FileStore, KeyValueStore, MemoryStore, BEST_KEY, STATE_KEY};
