use crate::game::apply_move::{apply_move, MoveOutcome};
use crate::game::board::Board;
use crate::game::direction::Direction;
use crate::game::snapshot::Snapshot;
use crate::game::spawn::{SpawnPolicy, SpawnedTile};
use crate::game::terminal::{is_lost, WinTracker, WIN_VALUE};
use crate::game::tile_id::TileIdAllocator;
use crate::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Tunable rules of a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    pub win_value: u32,
    pub spawn: SpawnPolicy,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            win_value: WIN_VALUE,
            spawn: SpawnPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Idle,
    Playing,
    /// Target reached; moves still apply.
    Won,
    Lost,
}

/// Everything the caller needs after one full turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub outcome: MoveOutcome,
    pub spawned: Option<SpawnedTile>,
    /// True only on the turn that first reached the target.
    pub won: bool,
    pub lost: bool,
}

/// One game from reset to the next reset: board, score, id lineage, win flag
/// and the single undo snapshot. Owned by the caller; moves must be serialized.
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    score: u64,
    ids: TileIdAllocator,
    win: WinTracker,
    rules: Rules,
    undo: Option<Snapshot>,
}

impl Default for Session {
    fn default() -> Self {
        Session::with_rules(Rules::default())
    }
}

impl Session {
    /// An idle session with an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Rules) -> Self {
        Session {
            board: Board::empty(),
            score: 0,
            ids: TileIdAllocator::new(),
            win: WinTracker::new(rules.win_value),
            rules,
            undo: None,
        }
    }

    /// Rebuild a session from a snapshot. Undo is not available afterwards.
    pub fn restore(snapshot: &Snapshot, rules: Rules) -> Result<Self> {
        let board = snapshot.to_board()?;
        Ok(Session {
            board,
            score: snapshot.score,
            ids: TileIdAllocator::resume_from(snapshot.id_counter),
            win: WinTracker::with_state(rules.win_value, snapshot.has_won),
            rules,
            undo: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn has_won(&self) -> bool {
        self.win.has_won()
    }

    /// Next id the allocator will hand out.
    pub fn id_counter(&self) -> u64 {
        self.ids.high_water()
    }

    pub fn can_undo(&self) -> bool {
        self.undo.is_some()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.board, self.score, self.ids.high_water(), self.win.has_won())
    }

    /// Start over: empty board, zero score, ids from 1, two opening 2-tiles.
    pub fn new_game<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<()> {
        self.board = Board::empty();
        self.score = 0;
        self.ids = TileIdAllocator::new();
        self.win.reset();
        self.undo = None;
        self.spawn(rng, true)?;
        self.spawn(rng, true)?;
        log::info!("🎲 new game started");
        Ok(())
    }

    /// Slide/merge only: no spawn, no terminal checks. Adds the score delta.
    pub fn apply_move(&mut self, direction: Direction) -> Result<MoveOutcome> {
        let outcome = apply_move(&mut self.board, direction)?;
        self.score += outcome.score_delta;
        Ok(outcome)
    }

    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        force_two: bool,
    ) -> Result<Option<SpawnedTile>> {
        let policy = self.rules.spawn;
        policy.spawn(&mut self.board, &mut self.ids, rng, force_two)
    }

    /// True the first time the target tile is on the board, false afterwards.
    pub fn check_win(&mut self) -> bool {
        self.win.check(&self.board)
    }

    pub fn is_lost(&self) -> bool {
        is_lost(&self.board)
    }

    pub fn status(&self) -> GameStatus {
        if self.board.tile_count() == 0 {
            GameStatus::Idle
        } else if self.is_lost() {
            GameStatus::Lost
        } else if self.has_won() {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }

    /// A game worth confirming before it is discarded.
    pub fn has_progress(&self) -> bool {
        self.score > 0 || self.board.tile_count() > 2
    }

    /// One full turn: move, then on change spawn and run the terminal checks.
    ///
    /// A move that changes nothing spawns nothing and keeps the previous undo
    /// snapshot.
    pub fn play<R: Rng + ?Sized>(&mut self, direction: Direction, rng: &mut R) -> Result<TurnReport> {
        let before = self.snapshot();
        let outcome = self.apply_move(direction)?;
        if !outcome.changed {
            return Ok(TurnReport {
                outcome,
                spawned: None,
                won: false,
                lost: false,
            });
        }

        self.undo = Some(before);
        let spawned = self.spawn(rng, false)?;
        let won = self.check_win();
        let lost = self.is_lost();
        if won {
            log::info!("🏆 reached {} with score {}", self.rules.win_value, self.score);
        }
        if lost {
            log::info!("game over with score {}", self.score);
        }
        Ok(TurnReport {
            outcome,
            spawned,
            won,
            lost,
        })
    }

    /// Restore the state from before the last successful move. Single level.
    pub fn undo(&mut self) -> Result<bool> {
        let Some(snapshot) = self.undo.take() else {
            return Ok(false);
        };
        self.board = snapshot.to_board()?;
        self.score = snapshot.score;
        self.ids = TileIdAllocator::resume_from(snapshot.id_counter);
        self.win = WinTracker::with_state(self.rules.win_value, snapshot.has_won);
        log::info!("↩️ undid last move");
        Ok(true)
    }
}
