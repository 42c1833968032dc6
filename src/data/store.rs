use crate::Result;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key holding the saved game.
pub const STATE_KEY: &str = "state";
/// Key holding the best score.
pub const BEST_KEY: &str = "best";

/// Minimal string key-value persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // written beside the target, then renamed over it
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store, for tests and embedders without a filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let mut store = FileStore::new(dir.path().join("nested"))?;
        assert_eq!(store.get(BEST_KEY)?, None);

        store.set(BEST_KEY, "128")?;
        assert_eq!(store.get(BEST_KEY)?.as_deref(), Some("128"));
        store.set(BEST_KEY, "256")?;
        assert_eq!(store.get(BEST_KEY)?.as_deref(), Some("256"));

        store.remove(BEST_KEY)?;
        store.remove(BEST_KEY)?;
        assert_eq!(store.get(BEST_KEY)?, None);
        Ok(())
    }

    #[test]
    fn test_memory_store() -> Result<()> {
        let mut store = MemoryStore::new();
        store.set(STATE_KEY, "{}")?;
        assert_eq!(store.get(STATE_KEY)?.as_deref(), Some("{}"));
        store.remove(STATE_KEY)?;
        assert_eq!(store.get(STATE_KEY)?, None);
        Ok(())
    }
}
