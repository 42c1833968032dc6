use crate::game::tile::TileId;

/// Hands out tile identities in increasing order; an id is never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileIdAllocator {
    next: u64,
}

impl TileIdAllocator {
    pub const FIRST: u64 = 1;

    pub fn new() -> Self {
        TileIdAllocator { next: Self::FIRST }
    }

    /// Resume from a persisted high-water mark (the next id to hand out).
    pub fn resume_from(next: u64) -> Self {
        TileIdAllocator {
            next: next.max(Self::FIRST),
        }
    }

    pub fn allocate(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }

    /// The next id that will be allocated.
    pub fn high_water(&self) -> u64 {
        self.next
    }
}

impl Default for TileIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
