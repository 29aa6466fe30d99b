//! Fixed-size transposition table keyed by Zobrist hash.
//!
//! Direct-indexed, always-replace. Entries are a best-effort cache: a
//! collision simply overwrites the slot and a probe verifies the full key.

use crate::moves::move_descriptions::ChessMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    /// Search failed high; the true score is at least `score`.
    Lower,
    /// Search failed low; the true score is at most `score`.
    Upper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<ChessMove>,
}

impl TTEntry {
    /// Whether the stored score settles a node searched with `(alpha, beta)`.
    #[inline]
    pub fn cuts_window(&self, alpha: i32, beta: i32) -> bool {
        match self.bound {
            Bound::Exact => true,
            Bound::Lower => self.score >= beta,
            Bound::Upper => self.score <= alpha,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TTStats {
    pub probes: u64,
    pub hits: u64,
    pub stores: u64,
}

#[derive(Debug, Clone)]
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    stats: TTStats,
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new_with_mb(Self::DEFAULT_SIZE_MB)
    }
}

impl TranspositionTable {
    pub const DEFAULT_SIZE_MB: usize = 8;

    pub fn new_with_mb(size_mb: usize) -> Self {
        let bytes = size_mb.max(1) * 1024 * 1024;
        let entry_size = std::mem::size_of::<Option<TTEntry>>().max(1);
        Self::with_capacity(bytes / entry_size)
    }

    pub fn with_capacity(slots: usize) -> Self {
        Self {
            entries: vec![None; slots.max(1)],
            stats: TTStats::default(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.stats = TTStats::default();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    #[inline]
    pub fn stats(&self) -> TTStats {
        self.stats
    }

    #[inline]
    fn idx(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    pub fn probe(&mut self, key: u64) -> Option<TTEntry> {
        self.stats.probes += 1;
        let hit = self.entries[self.idx(key)].filter(|e| e.key == key);
        if hit.is_some() {
            self.stats.hits += 1;
        }
        hit
    }

    pub fn store(&mut self, entry: TTEntry) {
        self.stats.stores += 1;
        let idx = self.idx(entry.key);
        self.entries[idx] = Some(entry);
    }
}
