use std::collections::HashMap;

use chess_core::{Board, Color};
use log::debug;

use crate::evaluation::Score;

pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    board: String,
    side_to_move: Color,
    depth: u8,
    maximizing: bool,
    maximizer: Color,
}

impl CacheKey {
    pub fn new(board: &Board, depth: u8, maximizing: bool, maximizer: Color) -> Self {
        Self {
            board: board.serialize(),
            side_to_move: board.side_to_move(),
            depth,
            maximizing,
            maximizer,
        }
    }
}

/// Memo of exact search scores.
///
/// Once the map grows past its capacity, half of it is dropped in whatever
/// order the map iterates. This is deliberately not an LRU.
#[derive(Debug, Clone)]
pub struct PositionCache {
    entries: HashMap<CacheKey, Score>,
    capacity: usize,
}

impl PositionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Score> {
        self.entries.get(key).copied()
    }

    pub fn insert(&mut self, key: CacheKey, score: Score) {
        self.entries.insert(key, score);
        if self.entries.len() > self.capacity {
            self.evict_half();
        }
    }

    fn evict_half(&mut self) {
        let doomed: Vec<CacheKey> = self
            .entries
            .keys()
            .take(self.entries.len() / 2)
            .cloned()
            .collect();
        for key in &doomed {
            self.entries.remove(key);
        }
        debug!("position cache evicted {} entries, {} remain", doomed.len(), self.entries.len());
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for PositionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
