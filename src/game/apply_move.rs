use crate::game::board::{Board, Position, SIZE};
use crate::game::direction::Direction;
use crate::game::tile::TileId;
use crate::Result;
use serde::{Deserialize, Serialize};

/// A merge produced during a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merge {
    /// Id of the surviving tile (the one that moved).
    pub tile_id: TileId,
    pub result_value: u32,
    pub position: Position,
}

/// One tile changing cell during a move, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileMotion {
    pub id: TileId,
    pub from: Position,
    pub to: Position,
    pub merged: bool,
}

/// Result of a single [`apply_move`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub direction: Direction,
    pub changed: bool,
    /// Sum of the values created by merges.
    pub score_delta: u64,
    pub merges: Vec<Merge>,
    pub motions: Vec<TileMotion>,
}

impl MoveOutcome {
    fn unchanged(direction: Direction) -> Self {
        MoveOutcome {
            direction,
            changed: false,
            score_delta: 0,
            merges: Vec::new(),
            motions: Vec::new(),
        }
    }
}

// Lines are visited from the side the move points toward, so the leading
// tile settles before the ones behind it.
fn traversal(component: isize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..SIZE).collect();
    if component > 0 {
        order.reverse();
    }
    order
}

/// Furthest reachable cell from `from`, and whether it is a merge target.
fn find_destination(board: &Board, from: Position, vector: (isize, isize)) -> (Position, bool) {
    let Some(moving) = board.get(from) else {
        return (from, false);
    };
    let mut dest = from;
    while let Some(next) = dest.step(vector) {
        match board.get(next) {
            None => dest = next,
            Some(ahead) if !ahead.merged_this_move() && ahead.value == moving.value => {
                return (next, true);
            }
            Some(_) => break,
        }
    }
    (dest, false)
}

/// Slide and merge every tile on `board` toward `direction`.
///
/// Each tile merges at most once per move. The work happens on a copy that
/// replaces `board` only once the whole move succeeded, so an error leaves
/// the board untouched.
pub fn apply_move(board: &mut Board, direction: Direction) -> Result<MoveOutcome> {
    let vector = direction.vector();
    let mut next = board.clone();
    let mut outcome = MoveOutcome::unchanged(direction);

    for row in traversal(vector.0) {
        for col in traversal(vector.1) {
            let from = Position::new(row, col);
            let Some(&tile) = next.get(from) else {
                continue;
            };
            let (to, merges) = find_destination(&next, from, vector);
            if to == from {
                continue;
            }
            outcome.changed = true;

            if merges {
                let merged = next.merge_into(from, to)?;
                outcome.score_delta += u64::from(merged.value);
                outcome.merges.push(Merge {
                    tile_id: merged.id,
                    result_value: merged.value,
                    position: to,
                });
            } else {
                next.move_tile(from, to)?;
            }
            outcome.motions.push(TileMotion {
                id: tile.id,
                from,
                to,
                merged: merges,
            });
        }
    }

    next.clear_merge_flags();
    if outcome.changed {
        *board = next;
    }
    log::debug!(
        "move {}: changed={} merges={} score_delta={}",
        direction,
        outcome.changed,
        outcome.merges.len(),
        outcome.score_delta
    );
    Ok(outcome)
}

/// True if moving in `direction` would change the board.
pub fn can_move_in(board: &Board, direction: Direction) -> bool {
    let vector = direction.vector();
    board
        .tiles()
        .any(|(pos, _)| find_destination(board, pos, vector).0 != pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tile_id::TileIdAllocator;

    fn board(rows: [[u32; SIZE]; SIZE]) -> Board {
        Board::from_rows(rows, &mut TileIdAllocator::new()).unwrap()
    }

    fn moved(rows: [[u32; SIZE]; SIZE], direction: Direction) -> ([[u32; SIZE]; SIZE], MoveOutcome) {
        let mut b = board(rows);
        let outcome = apply_move(&mut b, direction).unwrap();
        (b.values(), outcome)
    }

    #[test]
    fn test_pair_merges_left() {
        let (values, outcome) = moved(
            [[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            Direction::Left,
        );
        assert_eq!(values[0], [4, 0, 0, 0]);
        assert_eq!(outcome.score_delta, 4);
        assert!(outcome.changed);
        assert_eq!(outcome.merges.len(), 1);
        assert_eq!(outcome.merges[0].position, Position::new(0, 0));
    }

    #[test]
    fn test_three_equal_merge_nearest_pair_only() {
        let (values, outcome) = moved(
            [[2, 2, 2, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            Direction::Left,
        );
        assert_eq!(values[0], [4, 2, 0, 0]);
        assert_eq!(outcome.score_delta, 4);

        let (values, _) = moved(
            [[0, 2, 2, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            Direction::Right,
        );
        assert_eq!(values[0], [0, 0, 2, 4]);
    }

    #[test]
    fn test_four_equal_make_two_pairs() {
        let (values, outcome) = moved(
            [[2, 2, 2, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            Direction::Left,
        );
        assert_eq!(values[0], [4, 4, 0, 0]);
        assert_eq!(outcome.score_delta, 8);
        assert_eq!(outcome.merges.len(), 2);
    }

    #[test]
    fn test_merged_tile_does_not_merge_again() {
        let (values, outcome) = moved(
            [[4, 2, 2, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
            Direction::Left,
        );
        assert_eq!(values[0], [4, 4, 0, 0]);
        assert_eq!(outcome.score_delta, 4);
    }

    #[test]
    fn test_fresh_merge_does_not_absorb_trailing_equal() {
        let (values, outcome) = moved([[2, 2, 4, 0], [0; 4], [0; 4], [0; 4]], Direction::Left);
        assert_eq!(values[0], [4, 4, 0, 0]);
        assert_eq!(outcome.score_delta, 4);
        assert_eq!(outcome.merges.len(), 1);
    }

    #[test]
    fn test_move_left_full_board() {
        let (values, _) = moved(
            [[2, 4, 8, 16], [2, 8, 8, 4], [4, 0, 0, 4], [2, 0, 0, 4]],
            Direction::Left,
        );
        assert_eq!(
            values,
            [[2, 4, 8, 16], [2, 16, 4, 0], [8, 0, 0, 0], [2, 4, 0, 0]]
        );
    }

    #[test]
    fn test_move_right_full_board() {
        let (values, _) = moved(
            [[2, 4, 8, 16], [2, 8, 8, 4], [4, 0, 0, 4], [2, 0, 0, 4]],
            Direction::Right,
        );
        assert_eq!(
            values,
            [[2, 4, 8, 16], [0, 2, 16, 4], [0, 0, 0, 8], [0, 0, 2, 4]]
        );
    }

    #[test]
    fn test_move_up() {
        let (values, _) = moved(
            [[2, 2, 4, 2], [4, 8, 0, 0], [8, 8, 0, 0], [16, 4, 4, 4]],
            Direction::Up,
        );
        assert_eq!(
            values,
            [[2, 2, 8, 2], [4, 16, 0, 4], [8, 4, 0, 0], [16, 0, 0, 0]]
        );
    }

    #[test]
    fn test_move_down() {
        let (values, _) = moved(
            [[2, 2, 4, 2], [4, 8, 0, 0], [8, 8, 0, 0], [16, 4, 4, 4]],
            Direction::Down,
        );
        assert_eq!(
            values,
            [[2, 0, 0, 0], [4, 2, 0, 0], [8, 16, 0, 2], [16, 4, 8, 4]]
        );
    }

    #[test]
    fn test_noop_move_leaves_board_identical() {
        let mut b = board([[2, 4, 0, 0], [8, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let before = b.clone();
        let outcome = apply_move(&mut b, Direction::Left).unwrap();
        assert!(!outcome.changed);
        assert_eq!(outcome.score_delta, 0);
        assert!(outcome.merges.is_empty());
        assert_eq!(b, before);
        assert!(!can_move_in(&b, Direction::Left));
        assert!(can_move_in(&b, Direction::Right));
    }

    #[test]
    fn test_ids_survive_slides_and_merges() {
        let mut b = board([[0, 0, 2, 2], [0, 0, 0, 8], [0, 0, 0, 0], [0, 0, 0, 0]]);
        // ids: (0,2)=1, (0,3)=2, (1,3)=3
        let outcome = apply_move(&mut b, Direction::Left).unwrap();
        // the mover (id 2) survives; the stationary id 1 is absorbed
        assert_eq!(b.get(Position::new(0, 0)).unwrap().id, TileId(2));
        assert_eq!(b.get(Position::new(1, 0)).unwrap().id, TileId(3));
        assert_eq!(outcome.merges[0].tile_id, TileId(2));
        assert!(!b.tiles().any(|(_, t)| t.id == TileId(1)));
        assert_eq!(outcome.motions.len(), 3);
        assert!(b.tiles().all(|(_, t)| !t.merged_this_move()));
    }

    #[test]
    fn test_conservation_of_value() {
        let rows = [[2, 2, 4, 4], [8, 8, 8, 0], [2, 0, 2, 2], [4, 4, 4, 4]];
        for direction in Direction::ALL {
            let mut b = board(rows);
            let before = b.total_value();
            let outcome = apply_move(&mut b, direction).unwrap();
            assert_eq!(b.total_value(), before, "{direction}");
            let merged_sum: u64 = outcome.merges.iter().map(|m| u64::from(m.result_value)).sum();
            assert_eq!(outcome.score_delta, merged_sum);
        }
    }
}
