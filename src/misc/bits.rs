//! Small square/file/rank helpers for the 0x88 board.
//!
//! The teacher's `misc::bits` works over bitboards; this is its 0x88
//! equivalent, providing the same kind of direction/span helpers the
//! evaluation and move-generation code lean on.

use crate::defs::{file_of, make_square, on_board, rank_of, Color, Square};

/// Knight-move deltas, valid regardless of board edge (checked with
/// [`on_board`] after adding).
pub const KNIGHT_DELTAS: [i16; 8] = [33, 31, 18, 14, -33, -31, -18, -14];

/// King / queen deltas (all eight compass directions).
pub const KING_DELTAS: [i16; 8] = [1, -1, 16, -16, 17, 15, -17, -15];

/// Bishop slide directions.
pub const BISHOP_DELTAS: [i16; 4] = [17, 15, -17, -15];

/// Rook slide directions.
pub const ROOK_DELTAS: [i16; 4] = [1, -1, 16, -16];

#[inline(always)]
pub fn step(sq: Square, delta: i16) -> Option<Square> {
    let target = sq as i16 + delta;
    if !(0..128).contains(&target) {
        return None;
    }
    let target = target as Square;
    on_board(target).then_some(target)
}

/// Pawn single-push direction for `color`, as a 0x88 delta.
#[inline(always)]
pub fn pawn_push_delta(color: Color) -> i16 {
    match color {
        Color::White => 16,
        Color::Black => -16,
    }
}

#[inline(always)]
pub fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

#[inline(always)]
pub fn pawn_promotion_rank(color: Color) -> u8 {
    match color {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// True if `sq` is on the file adjacent to or equal to `file`.
#[inline(always)]
pub fn is_adjacent_file(sq: Square, file: u8) -> bool {
    let f = file_of(sq) as i8 - file as i8;
    f.abs() <= 1
}

/// The square directly in front of `sq` from `color`'s perspective, if on
/// the board.
#[inline(always)]
pub fn square_in_front(sq: Square, color: Color) -> Option<Square> {
    step(sq, pawn_push_delta(color))
}

/// Iterate every square on `file` (0-7), rank by rank.
pub fn squares_on_file(file: u8) -> impl Iterator<Item = Square> {
    (0..8).map(move |rank| make_square(file, rank))
}

/// Distance between two squares in king-moves (Chebyshev distance).
#[inline(always)]
pub fn king_distance(a: Square, b: Square) -> u8 {
    let df = (file_of(a) as i8 - file_of(b) as i8).unsigned_abs();
    let dr = (rank_of(a) as i8 - rank_of(b) as i8).unsigned_abs();
    df.max(dr)
}
