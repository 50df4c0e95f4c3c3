//! Result caches keyed by canonical position.
//!
//! Two separate tables with different trust levels:
//! - [`ExactTable`]: results of authoritative searches, returned as final answers
//! - [`HintTable`]: cheap one-ply or leaf estimates, only ever used to order moves
//!
//! Neither table evicts. They live as long as the engine that owns them, so a
//! later turn can reuse work from an earlier one that reached the same position.

use std::collections::HashMap;
use std::hash::Hash;

use super::evaluation::Score;

/// Best move and its value. `best_move` is `None` for leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult<M> {
    pub best_move: Option<M>,
    pub value: Score,
}

impl<M> SearchResult<M> {
    pub fn leaf(value: Score) -> Self {
        Self {
            best_move: None,
            value,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ExactEntry<M> {
    result: SearchResult<M>,
    /// Remaining depth when the entry was written
    depth: u8,
}

/// Results written only by authoritative searches.
pub struct ExactTable<K, M> {
    table: HashMap<K, ExactEntry<M>>,
    /// Statistics: number of successful probes
    pub hits: u64,
    /// Statistics: number of failed probes
    pub misses: u64,
}

impl<K: Eq + Hash, M: Copy> ExactTable<K, M> {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up a stored result.
    ///
    /// With `min_depth = None` any entry is returned regardless of the depth it
    /// was computed at. With `Some(d)` only entries computed with at least `d`
    /// plies remaining count.
    pub fn probe(&mut self, key: &K, min_depth: Option<u8>) -> Option<SearchResult<M>> {
        let found = self
            .table
            .get(key)
            .filter(|entry| min_depth.map_or(true, |d| entry.depth >= d))
            .map(|entry| entry.result);
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Store a result, replacing any previous entry for the key.
    pub fn store(&mut self, key: K, result: SearchResult<M>, depth: u8) {
        self.table.insert(key, ExactEntry { result, depth });
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<K: Eq + Hash, M: Copy> Default for ExactTable<K, M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Advisory values used to order moves.
pub struct HintTable<K> {
    table: HashMap<K, Score>,
    pub hits: u64,
    pub misses: u64,
}

impl<K: Eq + Hash> HintTable<K> {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn probe(&mut self, key: &K) -> Option<Score> {
        let found = self.table.get(key).copied();
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    pub fn store(&mut self, key: K, value: Score) {
        self.table.insert(key, value);
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<K: Eq + Hash> Default for HintTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Both tables of one engine.
pub struct SearchTables<K, M> {
    pub exact: ExactTable<K, M>,
    pub hints: HintTable<K>,
}

impl<K: Eq + Hash, M: Copy> SearchTables<K, M> {
    pub fn new() -> Self {
        Self {
            exact: ExactTable::new(),
            hints: HintTable::new(),
        }
    }
}

impl<K: Eq + Hash, M: Copy> Default for SearchTables<K, M> {
    fn default() -> Self {
        Self::new()
    }
}
