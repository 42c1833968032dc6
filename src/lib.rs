//! # twenty48_engine
//!
//! The board engine of a 4x4 sliding-tile puzzle (merge-by-doubling, target 2048).
//!
//! ## Features
//!
//! - **Board**: 4x4 grid of tiles with stable ids and primitive mutations
//! - **Move Engine**: directional compaction, one merge per tile per move
//! - **Spawn Policy**: uniform empty cell, 2 (90%) or 4 (10%), seedable RNG
//! - **Terminal Detector**: win fires once, loss when the board is locked
//! - **Session**: score, single-level undo, snapshots
//! - **Persistence**: JSON saved game and best score behind a key-value store
//!
//! ## Usage
//!
//! ```rust
//! use twenty48_engine::game::{Direction, Session};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut session = Session::new();
//! session.new_game(&mut rng).unwrap();
//! let report = session.play(Direction::Left, &mut rng).unwrap();
//! assert!(report.outcome.score_delta <= 4);
//! ```
//!
//! Rendering, audio and input capture are left to the caller: they read the
//! board and the [`game::MoveOutcome`] of each move.

// ============================================================================
// PUBLIC API MODULES
// ============================================================================

/// Core game logic and rules
pub mod game;

/// Saved game and best score persistence
pub mod data;

/// Configuration loading
pub mod config;

/// Logger setup
pub mod logging;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use config::{GameConfig, LoggingConfig};
pub use game::{Board, Direction, MoveOutcome, Position, Session, Snapshot, Tile, TileId};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Main error type for the engine
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Invalid direction: {0:?}")]
    InvalidDirection(String),

    #[error("Invariant violation at ({row}, {col}): {reason}")]
    InvariantViolation {
        row: usize,
        col: usize,
        reason: &'static str,
    },

    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, GameError>;

// ============================================================================
// LIBRARY VERSION INFO
// ============================================================================

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
