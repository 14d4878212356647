use std::mem::size_of;

use crate::game_repr::Move;

/// Node type for transposition table entries
///
/// - Exact: The exact score for this position
/// - LowerBound: Score is at least this value (beta cutoff)
/// - UpperBound: Score is at most this value (all moves failed low)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Exact,
    LowerBound,
    UpperBound,
}

/// Entry in the transposition table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranspositionTableEntry {
    /// Full Zobrist key, compared on probe to reject index collisions
    pub hash: u64,
    /// Remaining depth the score was searched to
    pub depth: i32,
    /// Score from the side to move's point of view
    pub score: i32,
    /// Best move found here, `Move::NULL` for fail-low nodes
    pub best_move: Move,
    pub node_type: NodeType,
}

/// Fixed-size, always-replace transposition table indexed by `hash % capacity`
pub struct TranspositionTable {
    entries: Vec<Option<TranspositionTableEntry>>,
    /// Number of occupied slots
    used: usize,
    /// Statistics: number of successful probes
    pub hits: u64,
    /// Statistics: number of failed probes
    pub misses: u64,
}

impl TranspositionTable {
    /// Table sized to a memory budget in megabytes
    pub fn with_size_mb(mb: usize) -> Self {
        let bytes = mb.max(1) * 1024 * 1024;
        Self::with_capacity(bytes / size_of::<Option<TranspositionTableEntry>>())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: vec![None; capacity.max(1)],
            used: 0,
            hits: 0,
            misses: 0,
        }
    }

    #[inline(always)]
    fn index(&self, hash: u64) -> usize {
        (hash % self.entries.len() as u64) as usize
    }

    /// Look up a position. Only an entry whose full key matches is a hit.
    pub fn probe(&mut self, hash: u64) -> Option<TranspositionTableEntry> {
        let idx = self.index(hash);
        match self.entries[idx] {
            Some(entry) if entry.hash == hash => {
                self.hits += 1;
                Some(entry)
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    /// Store an entry, overwriting whatever occupied its slot
    pub fn store(&mut self, entry: TranspositionTableEntry) {
        let idx = self.index(entry.hash);
        let slot = &mut self.entries[idx];
        if slot.is_none() {
            self.used += 1;
        }
        *slot = Some(entry);
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|e| *e = None);
        self.used = 0;
        self.hits = 0;
        self.misses = 0;
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Get current number of stored entries
    pub fn size(&self) -> usize {
        self.used
    }

    /// Occupancy in permille, as reported by UCI `hashfull`
    pub fn hashfull(&self) -> u64 {
        (self.used as u64 * 1000) / self.entries.len() as u64
    }

    /// Get hit rate (0.0 to 1.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Memory used by the slot array in bytes
    pub fn memory_usage(&self) -> usize {
        self.entries.len() * size_of::<Option<TranspositionTableEntry>>()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::with_size_mb(16)
    }
}
