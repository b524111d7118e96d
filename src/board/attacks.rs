//! Attack queries: "is this square attacked", "what attacks this square",
//! used by check detection, move legality, and SEE (`spec.md` §4.2).

use crate::defs::{piece_color, piece_type, Color, PieceType, Square};
use crate::misc::bits::{step, BISHOP_DELTAS, KING_DELTAS, KNIGHT_DELTAS, ROOK_DELTAS};

use super::Board;

/// True if any piece of `by_color` attacks `sq`.
pub fn is_square_attacked(board: &Board, sq: Square, by_color: Color) -> bool {
    // Pawns: look from sq backwards along the attacker's pawn-capture
    // direction to find an enemy pawn that would capture onto sq.
    let pawn_delta: [i16; 2] = match by_color {
        Color::White => [15, 17],
        Color::Black => [-15, -17],
    };
    for d in pawn_delta {
        if let Some(from) = step(sq, d) {
            let p = board.piece_at(from);
            if p != 0 && piece_color(p) == by_color && piece_type(p) == PieceType::Pawn {
                return true;
            }
        }
    }

    for d in KNIGHT_DELTAS {
        if let Some(from) = step(sq, d) {
            let p = board.piece_at(from);
            if p != 0 && piece_color(p) == by_color && piece_type(p) == PieceType::Knight {
                return true;
            }
        }
    }

    for d in KING_DELTAS {
        if let Some(from) = step(sq, d) {
            let p = board.piece_at(from);
            if p != 0 && piece_color(p) == by_color && piece_type(p) == PieceType::King {
                return true;
            }
        }
    }

    for d in BISHOP_DELTAS {
        let mut cur = sq;
        while let Some(next) = step(cur, d) {
            let p = board.piece_at(next);
            if p == 0 {
                cur = next;
                continue;
            }
            if piece_color(p) == by_color {
                let pt = piece_type(p);
                if pt == PieceType::Bishop || pt == PieceType::Queen {
                    return true;
                }
            }
            break;
        }
    }

    for d in ROOK_DELTAS {
        let mut cur = sq;
        while let Some(next) = step(cur, d) {
            let p = board.piece_at(next);
            if p == 0 {
                cur = next;
                continue;
            }
            if piece_color(p) == by_color {
                let pt = piece_type(p);
                if pt == PieceType::Rook || pt == PieceType::Queen {
                    return true;
                }
            }
            break;
        }
    }

    false
}

/// Every square from which `by_color` attacks `sq`, used by the Static
/// Exchange Evaluator to walk the exchange sequence.
pub fn attackers_to(board: &Board, sq: Square, by_color: Color) -> Vec<Square> {
    let mut attackers = Vec::with_capacity(4);

    let pawn_delta: [i16; 2] = match by_color {
        Color::White => [15, 17],
        Color::Black => [-15, -17],
    };
    for d in pawn_delta {
        if let Some(from) = step(sq, d) {
            let p = board.piece_at(from);
            if p != 0 && piece_color(p) == by_color && piece_type(p) == PieceType::Pawn {
                attackers.push(from);
            }
        }
    }

    for d in KNIGHT_DELTAS {
        if let Some(from) = step(sq, d) {
            let p = board.piece_at(from);
            if p != 0 && piece_color(p) == by_color && piece_type(p) == PieceType::Knight {
                attackers.push(from);
            }
        }
    }

    for d in KING_DELTAS {
        if let Some(from) = step(sq, d) {
            let p = board.piece_at(from);
            if p != 0 && piece_color(p) == by_color && piece_type(p) == PieceType::King {
                attackers.push(from);
            }
        }
    }

    for d in BISHOP_DELTAS {
        let mut cur = sq;
        while let Some(next) = step(cur, d) {
            let p = board.piece_at(next);
            if p == 0 {
                cur = next;
                continue;
            }
            if piece_color(p) == by_color {
                let pt = piece_type(p);
                if pt == PieceType::Bishop || pt == PieceType::Queen {
                    attackers.push(next);
                }
            }
            break;
        }
    }

    for d in ROOK_DELTAS {
        let mut cur = sq;
        while let Some(next) = step(cur, d) {
            let p = board.piece_at(next);
            if p == 0 {
                cur = next;
                continue;
            }
            if piece_color(p) == by_color {
                let pt = piece_type(p);
                if pt == PieceType::Rook || pt == PieceType::Queen {
                    attackers.push(next);
                }
            }
            break;
        }
    }

    attackers
}

/// True if the piece on `sq` is pinned against its own king along the line
/// from `sq` through the king, i.e. moving off that line would expose the
/// king to check. Used by legal move generation.
pub fn pin_direction(board: &Board, sq: Square, color: Color) -> Option<i16> {
    let king_sq = board.king_square(color);
    if king_sq == sq {
        return None;
    }
    let direction = ray_direction(sq, king_sq)?;
    // Walk from sq towards the king; must be empty until the king.
    let mut cur = sq;
    loop {
        match step(cur, direction) {
            Some(next) if next == king_sq => break,
            Some(next) if board.piece_at(next) == 0 => cur = next,
            _ => return None,
        }
    }
    // Walk from sq away from the king looking for an enemy slider.
    let away = -direction;
    let mut cur = sq;
    while let Some(next) = step(cur, away) {
        let p = board.piece_at(next);
        if p == 0 {
            cur = next;
            continue;
        }
        if piece_color(p) != color {
            let pt = piece_type(p);
            let is_diagonal = matches!(direction, 17 | 15 | -17 | -15);
            let slides_that_way = match pt {
                PieceType::Queen => true,
                PieceType::Bishop => is_diagonal,
                PieceType::Rook => !is_diagonal,
                _ => false,
            };
            if slides_that_way {
                return Some(direction);
            }
        }
        return None;
    }
    None
}

fn ray_direction(from: Square, to: Square) -> Option<i16> {
    use crate::defs::{file_of, rank_of};
    let ff = file_of(from) as i16;
    let fr = rank_of(from) as i16;
    let tf = file_of(to) as i16;
    let tr = rank_of(to) as i16;
    let df = tf - ff;
    let dr = tr - fr;
    if df == 0 && dr == 0 {
        return None;
    }
    if df == 0 {
        return Some(if dr > 0 { 16 } else { -16 });
    }
    if dr == 0 {
        return Some(if df > 0 { 1 } else { -1 });
    }
    if df.abs() == dr.abs() {
        return Some(match (df > 0, dr > 0) {
            (true, true) => 17,
            (false, true) => 15,
            (true, false) => -15,
            (false, false) => -17,
        });
    }
    None
}
