use crate::game::{Rules, SpawnPolicy};
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback level spec when `RUST_LOG` is unset
    pub level: String,
    /// Log to files in this directory instead of stderr
    pub log_dir: Option<PathBuf>,
    /// Rotate log files after this many bytes
    pub rotate_bytes: u64,
    /// Number of rotated files to keep
    pub keep_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
            rotate_bytes: 10 * 1024 * 1024,
            keep_files: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding the saved game and best score
    pub storage_dir: PathBuf,
    pub win_value: u32,
    /// Chance that a spawned tile is a 4 instead of a 2
    pub four_probability: f64,
    pub logging: LoggingConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".twenty48"),
            win_value: 2048,
            four_probability: 0.1,
            logging: LoggingConfig::default(),
        }
    }
}

impl GameConfig {
    /// Read a JSON config file; absent fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let config: GameConfig = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(GameError::Config(format!(
                "four_probability must be within [0, 1], got {}",
                self.four_probability
            )));
        }
        if self.win_value < 4 || !self.win_value.is_power_of_two() {
            return Err(GameError::Config(format!(
                "win_value must be a power of two >= 4, got {}",
                self.win_value
            )));
        }
        Ok(())
    }

    pub fn rules(&self) -> Rules {
        Rules {
            win_value: self.win_value,
            spawn: SpawnPolicy::new(self.four_probability),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.win_value, 2048);
        assert_eq!(config.four_probability, 0.1);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
        assert_eq!(config.rules(), Rules::default());
    }

    #[test]
    fn test_partial_file_keeps_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "win_value": 1024, "logging": { "level": "debug" } }"#)?;

        let config = GameConfig::from_json_file(&path)?;
        assert_eq!(config.win_value, 1024);
        assert_eq!(config.four_probability, 0.1);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.keep_files, 1);
        Ok(())
    }

    #[test]
    fn test_invalid_values_rejected() {
        let config = GameConfig {
            four_probability: 1.5,
            ..GameConfig::default()
        };
        assert_matches!(config.validate(), Err(GameError::Config(_)));

        let config = GameConfig {
            win_value: 1000,
            ..GameConfig::default()
        };
        assert_matches!(config.validate(), Err(GameError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        assert_matches!(
            GameConfig::from_json_file(dir.path().join("nope.json")),
            Err(GameError::Io(_))
        );
    }
}
