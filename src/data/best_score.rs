use crate::data::store::{KeyValueStore, BEST_KEY};
use crate::Result;

/// Highest score seen across sessions. Never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BestScore {
    best: u64,
}

impl BestScore {
    /// Read the persisted best; an unreadable value counts as 0.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        let best = match store.get(BEST_KEY)? {
            Some(text) => text.trim().parse().unwrap_or_else(|_| {
                log::warn!("⚠️ ignoring unreadable best score {:?}", text);
                0
            }),
            None => 0,
        };
        Ok(Self { best })
    }

    pub fn get(&self) -> u64 {
        self.best
    }

    /// Raise and persist the best if `score` exceeds it. Returns whether it changed.
    pub fn record<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, score: u64) -> Result<bool> {
        if score <= self.best {
            return Ok(false);
        }
        store.set(BEST_KEY, &score.to_string())?;
        self.best = score;
        log::debug!("new best score {}", score);
        Ok(true)
    }
}
