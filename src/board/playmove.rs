//! Make / unmake a move, including castling, en passant, and promotion
//! (`spec.md` §4.1). Unmake restores piece placement with the same
//! `put_piece`/`remove_piece` primitives used to make the move, then
//! overwrites the incremental scalars from the snapshot taken before the
//! move was applied — simpler and less error-prone than threading the
//! exact inverse XOR sequence through every special case.

use crate::board::attacks::is_square_attacked;
use crate::board::history::UndoInfo;
use crate::defs::{file_of, make_square, piece_type, rank_of, Color, PieceType, Square, EMPTY};
use crate::movegen::defs::{Move, FLAG_DOUBLE_PUSH};

use super::Board;

impl Board {
    /// Apply `mv`, which must be pseudo-legal. Returns `false` (and leaves
    /// the board exactly as it was) if the move leaves the mover's own king
    /// in check.
    pub fn make(&mut self, mv: Move) -> bool {
        let undo = UndoInfo {
            mv,
            captured: mv.captured(),
            ep_square: self.ep_square,
            castling: self.castling_rights,
            halfmove_clock: self.halfmove_clock,
            zobrist_key: self.zobrist_key,
            pawn_hash: self.pawn_hash,
            material_hash: self.material_hash,
            material_eval: self.material_eval,
            psqt_eval: self.psqt_eval,
        };

        let mover = self.side_to_move;
        let from = mv.from();
        let to = mv.to();

        let is_pawn_move = piece_type(mv.piece()) == PieceType::Pawn;
        let is_capture = mv.is_capture();

        if mv.is_en_passant() {
            let capture_sq = make_square(file_of(to), rank_of(from));
            self.remove_piece(capture_sq);
            self.move_piece(from, to);
        } else if mv.is_castle() {
            self.move_piece(from, to);
            let (rook_from, rook_to) = castle_rook_squares(self, mover, from, to);
            self.move_piece(rook_from, rook_to);
        } else if mv.is_promotion() {
            if is_capture {
                self.remove_piece(to);
            }
            self.remove_piece(from);
            self.put_piece(mv.promotion(), to);
        } else {
            if is_capture {
                self.remove_piece(to);
            }
            self.move_piece(from, to);
        }

        let lost_rights = self.castling_rights_lost_by_leaving(from)
            | self.castling_rights_lost_by_leaving(to);
        if lost_rights != 0 {
            self.set_castling_rights(self.castling_rights & !lost_rights);
        }

        self.set_ep_square(None);
        if mv.is_double_push() {
            let mid_rank = (rank_of(from) + rank_of(to)) / 2;
            self.set_ep_square(Some(make_square(file_of(from), mid_rank)));
        }

        self.halfmove_clock = if is_capture || is_pawn_move {
            0
        } else {
            self.halfmove_clock + 1
        };

        self.swap_side();
        if self.side_to_move == Color::White {
            self.fullmove_number += 1;
        }

        self.history.push(undo);
        self.ply_from_root += 1;

        if is_square_attacked(self, self.king_square(mover), self.side_to_move) {
            self.unmake();
            return false;
        }
        true
    }

    pub fn unmake(&mut self) {
        let undo = self.history.pop().expect("unmake called with empty history");
        let mv = undo.mv;
        let from = mv.from();
        let to = mv.to();
        let mover = self.side_to_move.opposite();

        if mv.is_en_passant() {
            self.move_piece(to, from);
            let capture_sq = make_square(file_of(to), rank_of(from));
            self.put_piece(undo.captured, capture_sq);
        } else if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(self, mover, from, to);
            self.move_piece(rook_to, rook_from);
            self.move_piece(to, from);
        } else if mv.is_promotion() {
            self.remove_piece(to);
            if undo.captured != EMPTY {
                self.put_piece(undo.captured, to);
            }
            self.put_piece(mv.piece(), from);
        } else {
            self.move_piece(to, from);
            if undo.captured != EMPTY {
                self.put_piece(undo.captured, to);
            }
        }

        if self.side_to_move == Color::White {
            self.fullmove_number -= 1;
        }
        self.side_to_move = mover;

        self.ep_square = undo.ep_square;
        self.castling_rights = undo.castling;
        self.halfmove_clock = undo.halfmove_clock;
        self.zobrist_key = undo.zobrist_key;
        self.pawn_hash = undo.pawn_hash;
        self.material_hash = undo.material_hash;
        self.material_eval = undo.material_eval;
        self.psqt_eval = undo.psqt_eval;
        self.ply_from_root -= 1;
    }

    /// Apply a null move: flip the side to move only, clearing any en
    /// passant square. Used by null-move pruning (`spec.md` §4.7).
    pub fn make_null(&mut self) -> Option<Square> {
        let ep = self.ep_square;
        self.set_ep_square(None);
        self.swap_side();
        ep
    }

    pub fn unmake_null(&mut self, ep: Option<Square>) {
        self.swap_side();
        self.set_ep_square(ep);
    }
}

fn castle_rook_squares(board: &Board, color: Color, king_from: Square, king_to: Square) -> (Square, Square) {
    let rank = rank_of(king_from);
    let king_side = file_of(king_to) > file_of(king_from);
    let rook_file = if king_side {
        board.rook_home[color.as_index()][1]
    } else {
        board.rook_home[color.as_index()][0]
    };
    let rook_to_file = if king_side { 5 } else { 3 };
    (make_square(rook_file, rank), make_square(rook_to_file, rank))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::FEN_START_POSITION;

    #[test]
    fn make_unmake_restores_state() {
        let mut board = Board::new();
        board.set_from_fen(FEN_START_POSITION).unwrap();
        let before_fen = board.to_fen();
        let before_key = board.zobrist_key;

        let mv = Move::new(
            crate::defs::make_square(4, 1),
            crate::defs::make_square(4, 3),
            crate::defs::WP,
            EMPTY,
            EMPTY,
            FLAG_DOUBLE_PUSH,
        );
        assert!(board.make(mv));
        assert_ne!(board.zobrist_key, before_key);
        board.unmake();
        assert_eq!(board.to_fen(), before_fen);
        assert_eq!(board.zobrist_key, before_key);
        board.assert_consistent();
    }
}
