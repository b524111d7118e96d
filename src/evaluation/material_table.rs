//! Material-signature cache.
//!
//! Grounded directly in the original engine's `eval_material.c`
//! (`init_material_table` / `get_material_data` / `compute_material_data`):
//! a power-of-two, direct-mapped table keyed by the position's material
//! hash, recomputed on key mismatch. This is *not* a literal dense
//! 419,904-entry array — see `DESIGN.md` for why that reading of `spec.md`
//! §4.5b was rejected in favor of what the original actually does.

use crate::board::Board;
use crate::defs::{make_piece, Color, PieceType};
use crate::evaluation::endgame::{self, EndgameKind};

#[derive(Clone, Copy)]
struct MaterialEntry {
    key: u64,
    mg_adjust: i32,
    eg_adjust: i32,
    eg_kind: EndgameKind,
    strong_side: Color,
    scale: [u8; 2],
}

impl Default for MaterialEntry {
    fn default() -> Self {
        MaterialEntry {
            key: 0,
            mg_adjust: 0,
            eg_adjust: 0,
            eg_kind: EndgameKind::None,
            strong_side: Color::White,
            scale: [16, 16],
        }
    }
}

pub struct MaterialTable {
    entries: Box<[MaterialEntry]>,
    mask: u64,
}

/// Default table size: 1 MB, comfortably holding tens of thousands of
/// distinct material signatures without meaningful collision pressure.
const DEFAULT_BYTES: usize = 1 << 20;

impl MaterialTable {
    pub fn new() -> Self {
        Self::with_size_bytes(DEFAULT_BYTES)
    }

    pub fn with_size_bytes(max_bytes: usize) -> Self {
        let entry_size = std::mem::size_of::<MaterialEntry>().max(1);
        let mut buckets = 1usize;
        while buckets * entry_size * 2 <= max_bytes {
            buckets <<= 1;
        }
        MaterialTable {
            entries: vec![MaterialEntry::default(); buckets].into_boxed_slice(),
            mask: (buckets - 1) as u64,
        }
    }

    pub fn clear(&mut self) {
        for e in self.entries.iter_mut() {
            *e = MaterialEntry::default();
        }
    }

    /// `(midgame, endgame)` material adjustment plus the endgame scale
    /// factor for `color`, recomputing on a cache miss or collision.
    pub fn probe(&mut self, board: &Board) -> ((i32, i32), u8) {
        let index = (board.material_hash & self.mask) as usize;
        let entry = &mut self.entries[index];
        if entry.key != board.material_hash {
            *entry = compute(board);
            entry.key = board.material_hash;
        }
        (
            (entry.mg_adjust, entry.eg_adjust),
            entry.scale[board.us().as_index()],
        )
    }
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::new()
    }
}

fn compute(board: &Board) -> MaterialEntry {
    let count = |color: Color, pt: PieceType| board.piece_count(make_piece(color, pt)) as i32;

    let wp = count(Color::White, PieceType::Pawn);
    let bp = count(Color::Black, PieceType::Pawn);
    let wn = count(Color::White, PieceType::Knight);
    let bn = count(Color::Black, PieceType::Knight);
    let wb = count(Color::White, PieceType::Bishop);
    let bb = count(Color::Black, PieceType::Bishop);
    let wr = count(Color::White, PieceType::Rook);
    let br = count(Color::Black, PieceType::Rook);
    let wq = count(Color::White, PieceType::Queen);
    let bq = count(Color::Black, PieceType::Queen);

    let mut mg = 0i32;
    let mut eg = 0i32;

    // Bishop/rook/queen pair bonuses, straight from eval_material.c.
    if wb > 1 {
        mg += 30;
        eg += 45;
    }
    if bb > 1 {
        mg -= 30;
        eg -= 45;
    }
    if wr > 1 {
        mg -= 12;
        eg -= 17;
    }
    if br > 1 {
        mg += 12;
        eg += 17;
    }
    if wq > 1 {
        mg -= 8;
        eg -= 12;
    }
    if bq > 1 {
        mg += 8;
        eg += 12;
    }

    // Knights gain with more pawns on the board, rooks lose, bishops
    // gain slightly; again straight from the original.
    let mut adjust = 0i32;
    adjust += wn * 3 * (wp - 4);
    adjust -= bn * 3 * (bp - 4);
    adjust += wb * 2 * (wp - 4);
    adjust -= bb * 2 * (bp - 4);
    adjust += wr * -3 * (wp - 4);
    adjust -= br * -3 * (bp - 4);
    mg += adjust;
    eg += adjust;

    let (eg_kind, strong_side) = endgame::classify(board);
    let (sc_mg, sc_eg) = endgame::score_adjustment(board, eg_kind, strong_side);
    mg += sc_mg;
    eg += sc_eg;

    let scale = [
        endgame::scale_factor(board, eg_kind, Color::White),
        endgame::scale_factor(board, eg_kind, Color::Black),
    ];

    MaterialEntry {
        key: 0,
        mg_adjust: mg,
        eg_adjust: eg,
        eg_kind,
        strong_side,
        scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::FEN_START_POSITION;

    #[test]
    fn cache_hit_matches_recompute() {
        let mut board = Board::new();
        board.set_from_fen(FEN_START_POSITION).unwrap();
        let mut table = MaterialTable::new();
        let first = table.probe(&board);
        let second = table.probe(&board);
        assert_eq!(first.0, second.0);
    }
}
