use crate::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector `(dr, dc)` of the direction.
    pub fn vector(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    /// Accepts direction names, arrow key names and WASD.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "arrowup" | "w" => Ok(Direction::Up),
            "down" | "arrowdown" | "s" => Ok(Direction::Down),
            "left" | "arrowleft" | "a" => Ok(Direction::Left),
            "right" | "arrowright" | "d" => Ok(Direction::Right),
            _ => Err(GameError::InvalidDirection(s.to_string())),
        }
    }
}
