use crate::data::store::{KeyValueStore, STATE_KEY};
use crate::game::{Rules, Session, Snapshot};
use crate::{GameError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const SAVE_FORMAT_VERSION: u32 = 1;

/// On-disk envelope of a saved session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub version: u32,
    /// Unix timestamp (seconds) of the save
    pub saved_at: i64,
    pub snapshot: Snapshot,
}

pub fn save_session<S: KeyValueStore + ?Sized>(store: &mut S, session: &Session) -> Result<()> {
    let saved = SavedGame {
        version: SAVE_FORMAT_VERSION,
        saved_at: chrono::Utc::now().timestamp(),
        snapshot: session.snapshot(),
    };
    let json = serde_json::to_string(&saved)?;
    store.set(STATE_KEY, &json)?;
    log::debug!(
        "saved game: score={} tiles={}",
        session.score(),
        saved.snapshot.tiles.len()
    );
    Ok(())
}

/// Parse and validate the saved snapshot, if any.
pub fn load_snapshot<S: KeyValueStore + ?Sized>(store: &S) -> Result<Option<Snapshot>> {
    let Some(json) = store.get(STATE_KEY)? else {
        return Ok(None);
    };
    let saved: SavedGame = serde_json::from_str(&json)
        .map_err(|e| GameError::CorruptSnapshot(format!("unreadable saved game: {}", e)))?;
    if saved.version != SAVE_FORMAT_VERSION {
        return Err(GameError::CorruptSnapshot(format!(
            "unsupported save version {}",
            saved.version
        )));
    }
    saved.snapshot.validate()?;
    Ok(Some(saved.snapshot))
}

/// Resume the saved session, or start a new game when there is none.
///
/// A corrupt save is discarded and replaced by a fresh game; it never
/// surfaces as an error. Undo is unavailable on the returned session.
pub fn load_or_new<S, R>(store: &mut S, rules: Rules, rng: &mut R) -> Result<Session>
where
    S: KeyValueStore + ?Sized,
    R: Rng + ?Sized,
{
    let restored = load_snapshot(store).and_then(|snapshot| {
        snapshot
            .map(|snapshot| Session::restore(&snapshot, rules))
            .transpose()
    });

    match restored {
        Ok(Some(session)) => {
            log::info!("✅ resumed saved game with score {}", session.score());
            Ok(session)
        }
        Ok(None) => fresh_session(rules, rng),
        Err(GameError::CorruptSnapshot(reason)) => {
            log::warn!("⚠️ discarding saved game: {}", reason);
            store.remove(STATE_KEY)?;
            fresh_session(rules, rng)
        }
        Err(e) => Err(e),
    }
}

fn fresh_session<R: Rng + ?Sized>(rules: Rules, rng: &mut R) -> Result<Session> {
    let mut session = Session::with_rules(rules);
    session.new_game(rng)?;
    Ok(session)
}

/// Forget the saved session (on a new game).
pub fn clear_saved_session<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<()> {
    store.remove(STATE_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::store::MemoryStore;
    use crate::game::Direction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_empty_store_starts_new_game() -> Result<()> {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(1);
        let session = load_or_new(&mut store, Rules::default(), &mut rng)?;
        assert_eq!(session.board().tile_count(), 2);
        assert_eq!(session.score(), 0);
        Ok(())
    }

    #[test]
    fn test_save_then_resume() -> Result<()> {
        let mut store = MemoryStore::new();
        let mut rng = StdRng::seed_from_u64(2);
        let mut session = Session::new();
        session.new_game(&mut rng)?;
        for direction in [Direction::Left, Direction::Up, Direction::Right] {
            session.play(direction, &mut rng)?;
        }
        save_session(&mut store, &session)?;

        let resumed = load_or_new(&mut store, Rules::default(), &mut rng)?;
        assert_eq!(resumed.snapshot(), session.snapshot());
        assert!(!resumed.can_undo());
        Ok(())
    }

    #[test]
    fn test_garbage_is_discarded() -> Result<()> {
        let mut store = MemoryStore::new();
        store.set(STATE_KEY, "{not json")?;
        let mut rng = StdRng::seed_from_u64(3);

        let session = load_or_new(&mut store, Rules::default(), &mut rng)?;
        assert_eq!(session.board().tile_count(), 2);
        assert_eq!(store.get(STATE_KEY)?, None);
        Ok(())
    }

    #[test]
    fn test_inconsistent_tiles_are_discarded() -> Result<()> {
        let mut store = MemoryStore::new();
        let json = r#"{
            "version": 1,
            "saved_at": 0,
            "snapshot": {
                "tiles": [
                    { "id": 1, "value": 2, "row": 0, "col": 0 },
                    { "id": 1, "value": 4, "row": 0, "col": 1 }
                ],
                "score": 40,
                "id_counter": 5,
                "has_won": false
            }
        }"#;
        store.set(STATE_KEY, json)?;
        assert!(matches!(
            load_snapshot(&store),
            Err(GameError::CorruptSnapshot(_))
        ));

        let mut rng = StdRng::seed_from_u64(4);
        let session = load_or_new(&mut store, Rules::default(), &mut rng)?;
        assert_eq!(session.score(), 0);
        Ok(())
    }

    #[test]
    fn test_oversized_tiles_are_discarded() -> Result<()> {
        let mut store = MemoryStore::new();
        let json = r#"{
            "version": 1,
            "saved_at": 0,
            "snapshot": {
                "tiles": [
                    { "id": 1, "value": 2147483648, "row": 0, "col": 0 },
                    { "id": 2, "value": 2147483648, "row": 0, "col": 1 }
                ],
                "score": 0,
                "id_counter": 3,
                "has_won": true
            }
        }"#;
        store.set(STATE_KEY, json)?;
        assert!(matches!(
            load_snapshot(&store),
            Err(GameError::CorruptSnapshot(_))
        ));

        let mut rng = StdRng::seed_from_u64(5);
        let mut session = load_or_new(&mut store, Rules::default(), &mut rng)?;
        assert_eq!(session.score(), 0);
        assert_eq!(session.board().tile_count(), 2);
        assert!(session.board().tiles().all(|(_, t)| t.value == 2));
        assert_eq!(store.get(STATE_KEY)?, None);
        session.play(Direction::Left, &mut rng)?;
        Ok(())
    }

    #[test]
    fn test_clear_saved_session() -> Result<()> {
        let mut store = MemoryStore::new();
        save_session(&mut store, &Session::new())?;
        assert!(load_snapshot(&store)?.is_some());
        clear_saved_session(&mut store)?;
        assert!(load_snapshot(&store)?.is_none());
        Ok(())
    }
}
