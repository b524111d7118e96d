//! Static evaluation (`spec.md` §4.5): material + piece-square tables,
//! pawn structure, mobility, king safety, and material-signature/endgame
//! adjustments, tapered between midgame and endgame by remaining
//! non-pawn material.

pub mod endgame;
pub mod kingsafety;
pub mod material_table;
pub mod mobility;
pub mod pawn;
pub mod psqt;

use crate::board::Board;
use crate::defs::{Color, PieceType};

/// Total non-pawn-material phase weight at the start of the game; used as
/// the denominator when tapering midgame/endgame scores.
const PHASE_MAX: i32 = 24;
const PHASE_WEIGHT: [i32; 6] = [0, 1, 1, 2, 4, 0];

pub struct Evaluator {
    material_table: material_table::MaterialTable,
    pawn_table: pawn::PawnHashTable,
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator {
            material_table: material_table::MaterialTable::new(),
            pawn_table: pawn::PawnHashTable::new(),
        }
    }

    pub fn clear_caches(&mut self) {
        self.material_table.clear();
        self.pawn_table.clear();
    }

    /// Static evaluation from the side-to-move's perspective, in
    /// centipawns. Positive means the side to move stands better.
    pub fn evaluate(&mut self, board: &Board) -> i32 {
        let phase = game_phase(board);

        let (mat_mg, mat_eg) = (board.material_eval[0], board.material_eval[1]);
        let (psqt_mg, psqt_eg) = (board.psqt_eval[0], board.psqt_eval[1]);

        let (mtbl_adjust, scale) = self.material_table.probe(board);
        let (pawn_mg, pawn_eg) = self.pawn_table.probe(board);
        let (mob_mg, mob_eg) = mobility::evaluate_mobility(board);
        let (ks_mg, ks_eg) = kingsafety::evaluate_king_safety(board);

        let mg = mat_mg + psqt_mg + mtbl_adjust.0 + pawn_mg + mob_mg + ks_mg;
        let mut eg = mat_eg + psqt_eg + mtbl_adjust.1 + pawn_eg + mob_eg + ks_eg;
        eg = eg * scale as i32 / 16;

        let tapered = (mg * phase + eg * (PHASE_MAX - phase)) / PHASE_MAX;
        let white_relative = tapered + tempo_bonus(board);

        if board.us() == Color::White {
            white_relative
        } else {
            -white_relative
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// `0` = pure endgame (no non-pawn material left), `PHASE_MAX` = full
/// midgame material on the board.
fn game_phase(board: &Board) -> i32 {
    use crate::defs::make_piece;
    let mut phase = 0i32;
    for &color in &[Color::White, Color::Black] {
        for pt in [
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Rook,
            PieceType::Queen,
        ] {
            phase += PHASE_WEIGHT[pt.as_index()] * board.piece_count(make_piece(color, pt)) as i32;
        }
    }
    phase.min(PHASE_MAX)
}

/// A small bonus for having the move, mirroring the conventional "tempo"
/// term most engines carry.
const TEMPO_BONUS: i32 = 10;

fn tempo_bonus(_board: &Board) -> i32 {
    TEMPO_BONUS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::FEN_START_POSITION;

    #[test]
    fn starting_position_is_roughly_balanced() {
        let mut board = Board::new();
        board.set_from_fen(FEN_START_POSITION).unwrap();
        let mut eval = Evaluator::new();
        let score = eval.evaluate(&board);
        assert!(score.abs() < 50, "expected near-zero eval, got {score}");
    }

    #[test]
    fn evaluation_is_symmetric_under_color_flip() {
        let mut white_board = Board::new();
        white_board
            .set_from_fen("8/8/8/4k3/8/3P4/4K3/8 w - - 0 1")
            .unwrap();
        let mut black_board = Board::new();
        black_board
            .set_from_fen("8/4k3/3p4/8/4K3/8/8/8 b - - 0 1")
            .unwrap();
        let mut eval = Evaluator::new();
        let w = eval.evaluate(&white_board);
        let b = eval.evaluate(&black_board);
        assert_eq!(w, b);
    }
}
