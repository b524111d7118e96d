//! Mobility scoring: bonus by legal-destination count per minor/major piece,
//! following the teacher's `evaluation::mobility` bonus-table shape, adapted
//! from bitboard attack counts to 0x88 ray walks.

use crate::board::Board;
use crate::defs::{make_piece, piece_color, Color, PieceType};
use crate::misc::bits::{step, BISHOP_DELTAS, KNIGHT_DELTAS, ROOK_DELTAS};

#[rustfmt::skip]
const KNIGHT_MOBILITY: [i32; 9]  = [-20, -10, 0, 4, 8, 12, 16, 18, 20];
#[rustfmt::skip]
const BISHOP_MOBILITY: [i32; 14] = [-20, -10, 0, 4, 8, 12, 16, 18, 20, 22, 23, 24, 25, 26];
#[rustfmt::skip]
const ROOK_MOBILITY: [i32; 15]   = [-15, -8, 0, 3, 6, 9, 12, 14, 16, 17, 18, 19, 20, 21, 22];
#[rustfmt::skip]
const QUEEN_MOBILITY: [i32; 28]  = [
    -10, -6, -2, 1, 3, 5, 7, 9, 11, 12, 13, 14, 15, 16,
     17, 17, 18, 18, 19, 19, 20, 20, 21, 21, 22, 22, 23, 23,
];

pub fn evaluate_mobility(board: &Board) -> (i32, i32) {
    let w = evaluate_side(board, Color::White);
    let b = evaluate_side(board, Color::Black);
    (w.0 - b.0, w.1 - b.1)
}

fn evaluate_side(board: &Board, color: Color) -> (i32, i32) {
    let mut score = 0i32;

    let knight = make_piece(color, PieceType::Knight);
    for &sq in board.pieces_of(knight) {
        let mut n = 0usize;
        for d in KNIGHT_DELTAS {
            if let Some(to) = step(sq, d) {
                if piece_color_is_not(board, to, color) {
                    n += 1;
                }
            }
        }
        score += KNIGHT_MOBILITY[n.min(8)];
    }

    let bishop = make_piece(color, PieceType::Bishop);
    for &sq in board.pieces_of(bishop) {
        let n = slide_count(board, sq, &BISHOP_DELTAS, color);
        score += BISHOP_MOBILITY[n.min(13)];
    }

    let rook = make_piece(color, PieceType::Rook);
    for &sq in board.pieces_of(rook) {
        let n = slide_count(board, sq, &ROOK_DELTAS, color);
        score += ROOK_MOBILITY[n.min(14)];
    }

    let queen = make_piece(color, PieceType::Queen);
    for &sq in board.pieces_of(queen) {
        let mut n = slide_count(board, sq, &BISHOP_DELTAS, color);
        n += slide_count(board, sq, &ROOK_DELTAS, color);
        score += QUEEN_MOBILITY[n.min(27)];
    }

    // Mobility matters more in the endgame for minors/majors once the
    // position opens up; a simple 1.0/1.2 split captures that cheaply.
    (score, score + score / 5)
}

fn slide_count(board: &Board, sq: crate::defs::Square, deltas: &[i16], color: Color) -> usize {
    let mut n = 0usize;
    for &d in deltas {
        let mut cur = sq;
        while let Some(to) = step(cur, d) {
            let p = board.piece_at(to);
            if p == 0 {
                n += 1;
                cur = to;
                continue;
            }
            if piece_color(p) != color {
                n += 1;
            }
            break;
        }
    }
    n
}

fn piece_color_is_not(board: &Board, sq: crate::defs::Square, color: Color) -> bool {
    let p = board.piece_at(sq);
    p == 0 || piece_color(p) != color
}
