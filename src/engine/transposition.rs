//! Transposition table (`spec.md` §4.10): 4-way bucketed, age+depth
//! replacement, grounded in the original's `trans_table.c` and the
//! teacher's TT sizing conventions (`EngineOptionDefaults`).

use crate::movegen::defs::Move;
use crate::search::defs::{HashFlag, CHECKMATE_THRESHOLD};

const BUCKET_SIZE: usize = 4;

#[derive(Clone, Copy)]
struct TTEntry {
    key: u64,
    mv: Move,
    score: i32,
    depth: i8,
    flag: HashFlag,
    age: u8,
    mate_threat: bool,
}

impl Default for TTEntry {
    fn default() -> Self {
        TTEntry {
            key: 0,
            mv: Move::NULL,
            score: 0,
            depth: -1,
            flag: HashFlag::Exact,
            age: 0,
            mate_threat: false,
        }
    }
}

pub struct TTProbe {
    pub score: i32,
    pub mv: Move,
    pub depth: i8,
    pub flag: HashFlag,
    pub mate_threat: bool,
}

pub struct TT {
    buckets: Box<[[TTEntry; BUCKET_SIZE]]>,
    mask: u64,
    age: u8,
}

impl TT {
    pub fn new(megabytes: usize) -> Self {
        let bytes = megabytes.max(1) * 1024 * 1024;
        let entry_size = std::mem::size_of::<TTEntry>() * BUCKET_SIZE;
        let mut buckets = 1usize;
        while buckets * entry_size * 2 <= bytes {
            buckets <<= 1;
        }
        TT {
            buckets: vec![[TTEntry::default(); BUCKET_SIZE]; buckets].into_boxed_slice(),
            mask: (buckets - 1) as u64,
            age: 0,
        }
    }

    pub fn resize(&mut self, megabytes: usize) {
        *self = TT::new(megabytes);
    }

    pub fn clear(&mut self) {
        for bucket in self.buckets.iter_mut() {
            for entry in bucket.iter_mut() {
                *entry = TTEntry::default();
            }
        }
        self.age = 0;
    }

    pub fn new_search(&mut self) {
        self.age = self.age.wrapping_add(1);
    }

    pub fn probe(&self, key: u64, ply: i32) -> Option<TTProbe> {
        let bucket = &self.buckets[(key & self.mask) as usize];
        for entry in bucket.iter() {
            if entry.key == key && entry.depth >= 0 {
                return Some(TTProbe {
                    score: score_from_tt(entry.score, ply),
                    mv: entry.mv,
                    depth: entry.depth,
                    flag: entry.flag,
                    mate_threat: entry.mate_threat,
                });
            }
        }
        None
    }

    #[allow(clippy::too_many_arguments)]
    pub fn store(
        &mut self,
        key: u64,
        mv: Move,
        score: i32,
        depth: i8,
        flag: HashFlag,
        ply: i32,
        mate_threat: bool,
    ) {
        let bucket = &mut self.buckets[(key & self.mask) as usize];

        let mut replace_index = 0usize;
        let mut replace_priority = i32::MAX;
        for (i, entry) in bucket.iter().enumerate() {
            if entry.key == key || entry.depth < 0 {
                replace_index = i;
                break;
            }
            let age_penalty = ((self.age.wrapping_sub(entry.age)) as i32 % 8) * 128;
            let priority = entry.depth as i32 - age_penalty;
            if priority < replace_priority {
                replace_priority = priority;
                replace_index = i;
            }
        }

        bucket[replace_index] = TTEntry {
            key,
            mv,
            score: score_to_tt(score, ply),
            depth,
            flag,
            age: self.age,
            mate_threat,
        };
    }

    pub fn hash_full_permille(&self) -> u32 {
        let sample = self.buckets.len().min(1000).max(1);
        let occupied: usize = self.buckets[..sample]
            .iter()
            .flat_map(|b| b.iter())
            .filter(|e| e.depth >= 0)
            .count();
        ((occupied as u64 * 1000) / (sample as u64 * BUCKET_SIZE as u64)) as u32
    }
}

/// Mate scores are stored root-relative in the table (distance-to-mate from
/// the *current* ply), but must be converted to be relative to the node
/// being stored from, since a mate found deep in one search may be probed
/// at a different ply in another.
fn score_to_tt(score: i32, ply: i32) -> i32 {
    if score > CHECKMATE_THRESHOLD {
        score + ply
    } else if score < -CHECKMATE_THRESHOLD {
        score - ply
    } else {
        score
    }
}

fn score_from_tt(score: i32, ply: i32) -> i32 {
    if score > CHECKMATE_THRESHOLD {
        score - ply
    } else if score < -CHECKMATE_THRESHOLD {
        score + ply
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_after_store_returns_same_entry() {
        let mut tt = TT::new(1);
        tt.store(12345, Move::NULL, 100, 4, HashFlag::Exact, 2, false);
        let probe = tt.probe(12345, 2).unwrap();
        assert_eq!(probe.score, 100);
        assert_eq!(probe.depth, 4);
        assert!(!probe.mate_threat);
    }

    #[test]
    fn mate_scores_are_ply_adjusted() {
        let mut tt = TT::new(1);
        tt.store(1, Move::NULL, CHECKMATE_THRESHOLD + 50, 4, HashFlag::Exact, 3, true);
        let probe = tt.probe(1, 5).unwrap();
        // Stored at ply 3, probed at ply 5: mate distance shrinks by 2.
        assert_eq!(probe.score, CHECKMATE_THRESHOLD + 48);
        assert!(probe.mate_threat);
    }
}
