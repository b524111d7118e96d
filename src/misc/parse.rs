//! Parsing helpers shared by the UCI layer and the engine, mirroring the
//! teacher's `engine::utils::execute_move` / `parse_algebraic_move` split.

use crate::defs::{file_of, make_square, on_board, rank_of, PieceType, Square};

/// A move as written on the wire (UCI long algebraic notation), before it is
/// matched against the pseudo-legal move list to recover capture/castle/ep
/// flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PotentialMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

/// Parse a square in algebraic notation (`"e4"`) into a 0x88 square.
pub fn square_from_str(s: &str) -> Option<Square> {
    let mut chars = s.chars();
    let file_ch = chars.next()?;
    let rank_ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if !('a'..='h').contains(&file_ch) || !('1'..='8').contains(&rank_ch) {
        return None;
    }
    let file = file_ch as u8 - b'a';
    let rank = rank_ch as u8 - b'1';
    let sq = make_square(file, rank);
    on_board(sq).then_some(sq)
}

/// Render a 0x88 square in algebraic notation.
pub fn square_to_str(sq: Square) -> String {
    let file = (b'a' + file_of(sq)) as char;
    let rank = (b'1' + rank_of(sq)) as char;
    format!("{file}{rank}")
}

/// Parse a UCI long-algebraic move string (`"e2e4"`, `"e7e8q"`) into its
/// constituent squares and optional promotion piece. Does not validate
/// legality; that is left to the caller matching against generated moves.
pub fn algebraic_move_to_potential(s: &str) -> Option<PotentialMove> {
    if s.len() < 4 || s.len() > 5 {
        return None;
    }
    let from = square_from_str(&s[0..2])?;
    let to = square_from_str(&s[2..4])?;
    let promotion = if s.len() == 5 {
        Some(match s.as_bytes()[4] {
            b'n' => PieceType::Knight,
            b'b' => PieceType::Bishop,
            b'r' => PieceType::Rook,
            b'q' => PieceType::Queen,
            _ => return None,
        })
    } else {
        None
    };
    Some(PotentialMove { from, to, promotion })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_corner_squares() {
        assert_eq!(square_to_str(square_from_str("a1").unwrap()), "a1");
        assert_eq!(square_to_str(square_from_str("h8").unwrap()), "h8");
    }

    #[test]
    fn rejects_out_of_range_square() {
        assert_eq!(square_from_str("i1"), None);
        assert_eq!(square_from_str("a9"), None);
        assert_eq!(square_from_str("a"), None);
    }

    #[test]
    fn parses_promotion_suffix() {
        let pm = algebraic_move_to_potential("e7e8q").unwrap();
        assert_eq!(pm.promotion, Some(PieceType::Queen));
        let pm2 = algebraic_move_to_potential("e2e4").unwrap();
        assert_eq!(pm2.promotion, None);
    }
}
