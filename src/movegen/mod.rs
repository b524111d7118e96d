//! Pseudo-legal move generation (`spec.md` §4.3). Legality (not leaving
//! one's own king in check) is resolved by `Board::make`, which returns
//! `false` and rolls back if a generated move turns out illegal — the same
//! split the teacher's board/movegen pair uses.

pub mod defs;
pub mod see;
pub mod select;

use crate::board::Board;
use crate::defs::{make_piece, make_square, piece_color, rank_of, Color, PieceType, Square, EMPTY};
use crate::misc::bits::{
    pawn_promotion_rank, pawn_push_delta, pawn_start_rank, step, BISHOP_DELTAS, KING_DELTAS,
    KNIGHT_DELTAS, ROOK_DELTAS,
};
use defs::{Move, MoveList, MoveType, FLAG_CASTLE, FLAG_DOUBLE_PUSH, FLAG_EN_PASSANT, FLAG_NONE};

/// Stateless move generator. Kept as a named type (rather than free
/// functions) to match the teacher's `MoveGenerator` API shape, since
/// search and eval code both take `&MoveGenerator` around.
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        MoveGenerator
    }

    pub fn generate_moves(&self, board: &Board, list: &mut MoveList, kind: MoveType) {
        let us = board.us();
        generate_pawn_moves(board, us, list, kind);
        generate_piece_moves(board, us, PieceType::Knight, &KNIGHT_DELTAS, false, list, kind);
        generate_piece_moves(board, us, PieceType::Bishop, &BISHOP_DELTAS, true, list, kind);
        generate_piece_moves(board, us, PieceType::Rook, &ROOK_DELTAS, true, list, kind);
        generate_queen_moves(board, us, list, kind);
        generate_king_moves(board, us, list, kind);
        if kind != MoveType::Captures {
            generate_castle_moves(board, us, list);
        }
    }

    /// Generate moves and filter out any that leave the mover's own king in
    /// check, using a scratch board. Convenience for callers (perft,
    /// `pseudo_legal` checks) that want a fully legal list; the search's
    /// hot path instead calls `generate_moves` and relies on `Board::make`.
    pub fn generate_legal_moves(&self, board: &Board, kind: MoveType) -> MoveList {
        let mut pseudo = MoveList::new();
        self.generate_moves(board, &mut pseudo, kind);
        let mut legal = MoveList::new();
        let mut scratch = board.clone_for_search();
        for mv in pseudo.iter() {
            if scratch.make(mv) {
                scratch.unmake();
                legal.push(mv);
            }
        }
        legal
    }
}

impl Default for MoveGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_pawn_moves(board: &Board, us: Color, list: &mut MoveList, kind: MoveType) {
    let pawn = make_piece(us, PieceType::Pawn);
    let push = pawn_push_delta(us);
    let start_rank = pawn_start_rank(us);
    let promo_rank = pawn_promotion_rank(us);

    for &from in board.pieces_of(pawn) {
        if kind != MoveType::Captures {
            if let Some(to) = step(from, push) {
                if board.piece_at(to) == EMPTY {
                    add_pawn_moves(list, from, to, pawn, EMPTY, us, promo_rank, FLAG_NONE);
                    if rank_of(from) == start_rank {
                        if let Some(to2) = step(to, push) {
                            if board.piece_at(to2) == EMPTY {
                                list.push(Move::new(from, to2, pawn, EMPTY, EMPTY, FLAG_DOUBLE_PUSH));
                            }
                        }
                    }
                }
            }
        }

        if kind != MoveType::Quiet {
            for cap_delta in capture_deltas(us) {
                if let Some(to) = step(from, cap_delta) {
                    let target = board.piece_at(to);
                    if target != EMPTY && piece_color(target) != us {
                        add_pawn_moves(list, from, to, pawn, target, us, promo_rank, FLAG_NONE);
                    } else if Some(to) == board.ep_square {
                        list.push(Move::new(
                            from,
                            to,
                            pawn,
                            make_piece(us.opposite(), PieceType::Pawn),
                            EMPTY,
                            FLAG_EN_PASSANT,
                        ));
                    }
                }
            }
        }
    }
}

fn capture_deltas(color: Color) -> [i16; 2] {
    match color {
        Color::White => [15, 17],
        Color::Black => [-15, -17],
    }
}

#[allow(clippy::too_many_arguments)]
fn add_pawn_moves(
    list: &mut MoveList,
    from: Square,
    to: Square,
    pawn: crate::defs::Piece,
    captured: crate::defs::Piece,
    us: Color,
    promo_rank: u8,
    flag: u32,
) {
    if rank_of(to) == promo_rank {
        for pt in [PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight] {
            list.push(Move::new(from, to, pawn, captured, make_piece(us, pt), flag));
        }
    } else {
        list.push(Move::new(from, to, pawn, captured, EMPTY, flag));
    }
}

fn generate_piece_moves(
    board: &Board,
    us: Color,
    pt: PieceType,
    deltas: &[i16],
    sliding: bool,
    list: &mut MoveList,
    kind: MoveType,
) {
    let piece = make_piece(us, pt);
    for &from in board.pieces_of(piece) {
        for &d in deltas {
            let mut cur = from;
            loop {
                let Some(to) = step(cur, d) else { break };
                let target = board.piece_at(to);
                if target == EMPTY {
                    if kind != MoveType::Captures {
                        list.push(Move::new(from, to, piece, EMPTY, EMPTY, FLAG_NONE));
                    }
                    if !sliding {
                        break;
                    }
                    cur = to;
                    continue;
                }
                if piece_color(target) != us && kind != MoveType::Quiet {
                    list.push(Move::new(from, to, piece, target, EMPTY, FLAG_NONE));
                }
                break;
            }
        }
    }
}

fn generate_queen_moves(board: &Board, us: Color, list: &mut MoveList, kind: MoveType) {
    let piece = make_piece(us, PieceType::Queen);
    for &from in board.pieces_of(piece) {
        for &d in BISHOP_DELTAS.iter().chain(ROOK_DELTAS.iter()) {
            let mut cur = from;
            loop {
                let Some(to) = step(cur, d) else { break };
                let target = board.piece_at(to);
                if target == EMPTY {
                    if kind != MoveType::Captures {
                        list.push(Move::new(from, to, piece, EMPTY, EMPTY, FLAG_NONE));
                    }
                    cur = to;
                    continue;
                }
                if piece_color(target) != us && kind != MoveType::Quiet {
                    list.push(Move::new(from, to, piece, target, EMPTY, FLAG_NONE));
                }
                break;
            }
        }
    }
}

fn generate_king_moves(board: &Board, us: Color, list: &mut MoveList, kind: MoveType) {
    let piece = make_piece(us, PieceType::King);
    let from = board.king_square(us);
    for &d in KING_DELTAS.iter() {
        let Some(to) = step(from, d) else { continue };
        let target = board.piece_at(to);
        if target == EMPTY {
            if kind != MoveType::Captures {
                list.push(Move::new(from, to, piece, EMPTY, EMPTY, FLAG_NONE));
            }
        } else if piece_color(target) != us && kind != MoveType::Quiet {
            list.push(Move::new(from, to, piece, target, EMPTY, FLAG_NONE));
        }
    }
}

fn generate_castle_moves(board: &Board, us: Color, list: &mut MoveList) {
    use crate::defs::{CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ};
    use crate::board::attacks::is_square_attacked;

    let rank = match us {
        Color::White => 0,
        Color::Black => 7,
    };
    let king_from = board.king_square(us);
    if board.in_check() {
        return;
    }
    let (king_side_right, queen_side_right) = match us {
        Color::White => (CASTLE_WK, CASTLE_WQ),
        Color::Black => (CASTLE_BK, CASTLE_BQ),
    };
    let piece = make_piece(us, PieceType::King);
    let opponent = us.opposite();

    if board.castling_rights & king_side_right != 0 {
        let f = make_square(5, rank);
        let g = make_square(6, rank);
        if board.piece_at(f) == EMPTY
            && board.piece_at(g) == EMPTY
            && !is_square_attacked(board, king_from, opponent)
            && !is_square_attacked(board, f, opponent)
            && !is_square_attacked(board, g, opponent)
        {
            list.push(Move::new(king_from, g, piece, EMPTY, EMPTY, FLAG_CASTLE));
        }
    }
    if board.castling_rights & queen_side_right != 0 {
        let d = make_square(3, rank);
        let c = make_square(2, rank);
        let b = make_square(1, rank);
        if board.piece_at(d) == EMPTY
            && board.piece_at(c) == EMPTY
            && board.piece_at(b) == EMPTY
            && !is_square_attacked(board, king_from, opponent)
            && !is_square_attacked(board, d, opponent)
            && !is_square_attacked(board, c, opponent)
        {
            list.push(Move::new(king_from, c, piece, EMPTY, EMPTY, FLAG_CASTLE));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::FEN_START_POSITION;

    #[test]
    fn start_position_has_twenty_moves() {
        let mut board = Board::new();
        board.set_from_fen(FEN_START_POSITION).unwrap();
        let mg = MoveGenerator::new();
        let moves = mg.generate_legal_moves(&board, MoveType::All);
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn kiwipete_has_forty_eight_moves() {
        let mut board = Board::new();
        board.set_from_fen(crate::defs::FEN_KIWIPETE_POSITION).unwrap();
        let mg = MoveGenerator::new();
        let moves = mg.generate_legal_moves(&board, MoveType::All);
        assert_eq!(moves.len(), 48);
    }

    fn perft(board: &mut Board, mg: &MoveGenerator, depth: u8) -> u64 {
        if depth == 0 {
            return 1;
        }
        let mut list = MoveList::new();
        mg.generate_moves(board, &mut list, MoveType::All);
        let mut nodes = 0;
        for mv in list.iter() {
            if board.make(mv) {
                nodes += perft(board, mg, depth - 1);
                board.unmake();
            }
        }
        nodes
    }

    // Published node counts, https://www.chessprogramming.org/Perft_Results.
    #[test]
    fn start_position_perft_counts() {
        let mut board = Board::new();
        board.set_from_fen(FEN_START_POSITION).unwrap();
        let mg = MoveGenerator::new();
        assert_eq!(perft(&mut board, &mg, 1), 20);
        assert_eq!(perft(&mut board, &mg, 2), 400);
        assert_eq!(perft(&mut board, &mg, 3), 8_902);
        assert_eq!(perft(&mut board, &mg, 4), 197_281);
    }

    #[test]
    fn kiwipete_perft_counts() {
        let mut board = Board::new();
        board.set_from_fen(crate::defs::FEN_KIWIPETE_POSITION).unwrap();
        let mg = MoveGenerator::new();
        assert_eq!(perft(&mut board, &mg, 1), 48);
        assert_eq!(perft(&mut board, &mg, 2), 2_039);
        assert_eq!(perft(&mut board, &mg, 3), 97_862);
    }
}
