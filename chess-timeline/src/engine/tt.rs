use cozy_chess::Move;

use super::eval::MATE_BOUND;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtBound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct TtEntry {
    pub best_move: Move,
    pub depth: u8,
    pub score: i16,
    pub bound: TtBound,
}

/// Mate scores are stored as distance from the stored node rather than from
/// the root, so they stay correct when probed at another ply.
pub fn score_to_tt(score: i16, ply: u16) -> i16 {
    match score {
        s if s >= MATE_BOUND => s + ply as i16,
        s if s <= -MATE_BOUND => s - ply as i16,
        s => s,
    }
}

pub fn score_from_tt(score: i16, ply: u16) -> i16 {
    match score {
        s if s >= MATE_BOUND => s - ply as i16,
        s if s <= -MATE_BOUND => s + ply as i16,
        s => s,
    }
}

type FullTtEntry = Option<(u64, TtEntry)>;

pub struct TranspositionTable {
    table: Vec<FullTtEntry>,
}

impl TranspositionTable {
    pub fn new(tt_bytes: usize) -> Self {
        let entries = (tt_bytes / std::mem::size_of::<FullTtEntry>()).max(1);
        Self {
            table: vec![None; entries],
        }
    }

    pub fn load(&self, hash: u64) -> Option<TtEntry> {
        let (entry_hash, entry) = self.table[self.index(hash)]?;
        (entry_hash == hash).then_some(entry)
    }

    pub fn store(&mut self, hash: u64, entry: TtEntry) {
        let index = self.index(hash);
        self.table[index] = Some((hash, entry));
    }

    pub fn clear(&mut self) {
        self.table.fill(None);
    }

    fn index(&self, hash: u64) -> usize {
        (hash as u128 * self.table.len() as u128 >> 64) as u64 as usize
    }
}
