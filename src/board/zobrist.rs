//! Zobrist random tables, seeded deterministically so two engine instances
//! (and two test runs) produce identical keys, per `SPEC_FULL.md` §2.

use rand_chacha::ChaCha8Rng;
use rand_core::{RngCore, SeedableRng};

use crate::defs::{BOARD_SIZE, PIECE_TYPES};

/// Fixed seed: Zobrist keys only need to be internally consistent, not
/// cryptographically unpredictable, and a fixed seed makes perft/TT tests
/// reproducible across runs and machines.
const ZOBRIST_SEED: u64 = 0xDA7D_9EA3_EC0D_E001;

pub struct ZobristRandoms {
    /// Indexed `[color][piece_type][square]`.
    pub piece_square: [[[u64; BOARD_SIZE]; PIECE_TYPES]; 2],
    pub castling: [u64; 16],
    pub en_passant_file: [u64; 8],
    pub side_to_move: u64,
}

impl ZobristRandoms {
    pub fn new() -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(ZOBRIST_SEED);

        let mut piece_square = [[[0u64; BOARD_SIZE]; PIECE_TYPES]; 2];
        for color in piece_square.iter_mut() {
            for piece_type in color.iter_mut() {
                for square in piece_type.iter_mut() {
                    *square = rng.next_u64();
                }
            }
        }

        let mut castling = [0u64; 16];
        for v in castling.iter_mut() {
            *v = rng.next_u64();
        }

        let mut en_passant_file = [0u64; 8];
        for v in en_passant_file.iter_mut() {
            *v = rng.next_u64();
        }

        let side_to_move = rng.next_u64();

        ZobristRandoms {
            piece_square,
            castling,
            en_passant_file,
            side_to_move,
        }
    }
}

impl Default for ZobristRandoms {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zobrist_tables_are_deterministic() {
        let a = ZobristRandoms::new();
        let b = ZobristRandoms::new();
        assert_eq!(a.side_to_move, b.side_to_move);
        assert_eq!(a.castling, b.castling);
        assert_eq!(a.piece_square[0][0][0], b.piece_square[0][0][0]);
    }
}
