//! Position setup and move execution helpers, following the teacher's
//! `engine::utils` shape, trimmed to a single owned `Board` rather than a
//! `Mutex<Board>` shared across search threads.

use super::Engine;
use crate::defs::{EngineRunResult, FEN_KIWIPETE_POSITION};
use crate::misc::parse;
use crate::misc::parse::PotentialMove;
use crate::movegen::defs::{Move, MoveList, MoveType};

impl Engine {
    pub fn setup_position(&mut self) -> EngineRunResult {
        let fen = if self.cmdline.has_kiwipete() {
            FEN_KIWIPETE_POSITION
        } else {
            self.cmdline.fen().unwrap_or(crate::defs::FEN_START_POSITION)
        };
        self.board.set_from_fen(fen).map_err(|_| ())
    }

    /// Executes an algebraic move string on the internal board if it is
    /// legal in the current position.
    pub fn execute_move(&mut self, m: &str) -> bool {
        let Some(potential) = parse::algebraic_move_to_potential(m) else {
            return false;
        };
        match self.pseudo_legal(potential) {
            Some(mv) => self.board.make(mv),
            None => false,
        }
    }

    /// Matches an incoming (from, to, promotion) triple against the
    /// pseudo-legal move list. `Board::make` resolves final legality.
    pub fn pseudo_legal(&self, m: PotentialMove) -> Option<Move> {
        let mut ml = MoveList::new();
        self.mg.generate_moves(&self.board, &mut ml, MoveType::All);

        for i in 0..ml.len() {
            let current = ml.get_move(i);
            if m.from == current.from() && m.to == current.to() && m.promotion == promotion_of(current) {
                return Some(current);
            }
        }
        None
    }
}

fn promotion_of(mv: Move) -> Option<crate::defs::PieceType> {
    if mv.is_promotion() {
        Some(crate::defs::piece_type(mv.promotion()))
    } else {
        None
    }
}
