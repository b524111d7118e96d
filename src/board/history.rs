//! Undo history, following the teacher's boxed-slice-with-count design
//! (`board/history.rs`) rather than a reallocating `Vec`: make/unmake is the
//! hottest path in the engine, and a fixed-capacity slice avoids bounds
//! churn and reallocation on every ply.

use crate::defs::{Piece, Square};
use crate::movegen::defs::Move;

/// Everything needed to undo one ply, captured before the move is applied.
#[derive(Clone, Copy)]
pub struct UndoInfo {
    pub mv: Move,
    pub captured: Piece,
    pub ep_square: Option<Square>,
    pub castling: u8,
    pub halfmove_clock: u16,
    pub zobrist_key: u64,
    pub pawn_hash: u64,
    pub material_hash: u64,
    pub material_eval: [i32; 2],
    pub psqt_eval: [i32; 2],
}

impl Default for UndoInfo {
    fn default() -> Self {
        UndoInfo {
            mv: Move::NULL,
            captured: 0,
            ep_square: None,
            castling: 0,
            halfmove_clock: 0,
            zobrist_key: 0,
            pawn_hash: 0,
            material_hash: 0,
            material_eval: [0, 0],
            psqt_eval: [0, 0],
        }
    }
}

pub struct History {
    list: Box<[UndoInfo]>,
    count: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        History {
            list: vec![UndoInfo::default(); capacity].into_boxed_slice(),
            count: 0,
        }
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    #[inline(always)]
    pub fn push(&mut self, info: UndoInfo) {
        if self.count < self.list.len() {
            self.list[self.count] = info;
        }
        self.count += 1;
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<UndoInfo> {
        if self.count == 0 {
            return None;
        }
        self.count -= 1;
        Some(self.list[self.count])
    }

    #[inline(always)]
    pub fn peek(&self) -> Option<&UndoInfo> {
        if self.count == 0 {
            None
        } else {
            Some(&self.list[self.count - 1])
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Zobrist keys of the last `n` plies, most recent last, for
    /// threefold-repetition detection.
    pub fn recent_keys(&self, n: usize) -> impl Iterator<Item = u64> + '_ {
        let start = self.count.saturating_sub(n);
        self.list[start..self.count].iter().map(|u| u.zobrist_key)
    }
}

impl Clone for History {
    fn clone(&self) -> Self {
        History {
            list: self.list.clone(),
            count: self.count,
        }
    }
}
