//! Static Exchange Evaluator (`spec.md` §4.6): the net material gain/loss of
//! a capture sequence on one square, used to order captures and to prune
//! obviously-losing ones in quiescence search.

use crate::board::attacks::attackers_to;
use crate::board::Board;
use crate::defs::{file_of, make_square, piece_type, rank_of, PieceType, EMPTY};
use crate::evaluation::psqt::piece_value;
use crate::movegen::defs::Move;

fn cp_value(piece: crate::defs::Piece) -> i32 {
    if piece == EMPTY {
        return 0;
    }
    if piece_type(piece) == PieceType::King {
        return 20000;
    }
    piece_value(piece_type(piece)).0
}

/// Evaluate the exchange sequence on `mv.to()` starting with `mv`. Returns
/// the net centipawn gain for the side making `mv`; a non-capturing move
/// always scores 0.
pub fn see(board: &Board, mv: Move) -> i32 {
    if !mv.is_capture() && !mv.is_en_passant() {
        return 0;
    }

    let to = mv.to();
    let mut scratch = board.clone_for_search();

    if mv.is_en_passant() {
        let cap_sq = make_square(file_of(to), rank_of(mv.from()));
        scratch.remove_piece(cap_sq);
    }

    let mut gain = [0i32; 32];
    let mut depth = 0usize;
    gain[0] = cp_value(mv.captured());

    let mut side = board.opponent();
    let mut attacker_from = mv.from();
    let mut attacker_piece = mv.piece();

    loop {
        if scratch.piece_at(to) != EMPTY {
            scratch.remove_piece(to);
        }
        scratch.remove_piece(attacker_from);
        scratch.put_piece(attacker_piece, to);

        depth += 1;
        gain[depth] = cp_value(attacker_piece) - gain[depth - 1];

        let attackers = attackers_to(&scratch, to, side);
        let Some(&next_from) = attackers
            .iter()
            .min_by_key(|&&sq| cp_value(scratch.piece_at(sq)))
        else {
            break;
        };

        attacker_from = next_from;
        attacker_piece = scratch.piece_at(next_from);
        side = side.opposite();

        if depth >= 31 {
            break;
        }
    }

    while depth > 0 {
        depth -= 1;
        gain[depth] = -(-gain[depth]).max(gain[depth + 1]);
    }

    gain[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::defs::{EMPTY, WP};
    use crate::movegen::defs::FLAG_NONE;

    #[test]
    fn pawn_takes_undefended_knight_wins_material() {
        let mut board = Board::new();
        board
            .set_from_fen("4k3/8/8/3n4/4P3/8/8/4K3 w - - 0 1")
            .unwrap();
        let mv = Move::new(
            crate::defs::make_square(4, 3),
            crate::defs::make_square(3, 4),
            WP,
            crate::defs::BN,
            EMPTY,
            FLAG_NONE,
        );
        assert!(see(&board, mv) > 0);
    }

    #[test]
    fn non_capture_scores_zero() {
        let mut board = Board::new();
        board.set_from_fen(crate::defs::FEN_START_POSITION).unwrap();
        let mv = Move::new(
            crate::defs::make_square(4, 1),
            crate::defs::make_square(4, 2),
            WP,
            EMPTY,
            EMPTY,
            FLAG_NONE,
        );
        assert_eq!(see(&board, mv), 0);
    }
}
