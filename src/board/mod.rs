//! The position: a 0x88 board, piece lists with an O(1)-removal index, and
//! the incrementally maintained scalars (`spec.md` §3/§4.1) that make
//! evaluation and hashing cheap to keep current across make/unmake.

pub mod attacks;
pub mod fen;
pub mod history;
pub mod playmove;
pub mod zobrist;

use std::sync::Arc;

use crate::defs::{
    file_of, make_square, piece_color, piece_type, Color, Piece, PieceType, Square, BOARD_SIZE,
    CASTLE_ALL, EMPTY, FEN_START_POSITION, MAX_GAME_MOVES,
};
use crate::evaluation::psqt;
use history::{History, UndoInfo};
use zobrist::ZobristRandoms;

/// Maximum number of pieces of a single (color, type) ever on the list at
/// once. Eight pawns can each under-promote, so a generous cap is kept for
/// queens/rooks/bishops/knights; pawns themselves never exceed eight.
pub const PIECE_LIST_CAPACITY: usize = 10;
/// Number of distinct piece codes, including the unused 0 (empty) and the
/// 7/8/15 gaps left by the color-in-bit-3 encoding.
pub const PIECE_CODES: usize = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastleSide {
    King,
    Queen,
}

#[derive(Clone)]
pub struct Board {
    pub squares: [Piece; BOARD_SIZE],
    pub(crate) piece_list: [[Square; PIECE_LIST_CAPACITY]; PIECE_CODES],
    pub(crate) piece_list_len: [u8; PIECE_CODES],
    pub(crate) piece_index: [u8; BOARD_SIZE],
    pub side_to_move: Color,
    pub castling_rights: u8,
    pub ep_square: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
    pub king_square: [Square; 2],
    /// Incremental material score, `[midgame, endgame]`, white-relative.
    pub material_eval: [i32; 2],
    /// Incremental piece-square score, `[midgame, endgame]`, white-relative.
    pub psqt_eval: [i32; 2],
    pub zobrist_key: u64,
    pub pawn_hash: u64,
    pub material_hash: u64,
    pub ply_from_root: usize,
    pub history: History,
    pub zr: Arc<ZobristRandoms>,
    /// Chess960 home files, defaulting to standard E1/A1/H1 (mirrored).
    pub king_home: [u8; 2],
    pub rook_home: [[u8; 2]; 2],
}

impl Board {
    pub fn new() -> Self {
        let zr = Arc::new(ZobristRandoms::new());
        let mut board = Board {
            squares: [EMPTY; BOARD_SIZE],
            piece_list: [[0; PIECE_LIST_CAPACITY]; PIECE_CODES],
            piece_list_len: [0; PIECE_CODES],
            piece_index: [0; BOARD_SIZE],
            side_to_move: Color::White,
            castling_rights: CASTLE_ALL,
            ep_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            king_square: [0, 0],
            material_eval: [0, 0],
            psqt_eval: [0, 0],
            zobrist_key: 0,
            pawn_hash: 0,
            material_hash: 0,
            ply_from_root: 0,
            history: History::new(MAX_GAME_MOVES),
            zr,
            king_home: [4, 4],
            rook_home: [[0, 7], [0, 7]],
        };
        board
            .set_from_fen(FEN_START_POSITION)
            .expect("built-in start FEN must parse");
        board
    }

    /// A lightweight clone for search/SEE scratch work: shares the Zobrist
    /// table (no recomputation) but uses a small history capacity, since
    /// scratch boards never need the full game-length undo stack.
    pub fn clone_for_search(&self) -> Self {
        let mut clone = self.clone();
        clone.history = History::new(crate::defs::MAX_PLY + 8);
        clone
    }

    #[inline(always)]
    pub fn us(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    pub fn opponent(&self) -> Color {
        self.side_to_move.opposite()
    }

    #[inline(always)]
    pub fn piece_at(&self, sq: Square) -> Piece {
        self.squares[sq as usize]
    }

    #[inline(always)]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_square[color.as_index()]
    }

    pub fn piece_count(&self, piece: Piece) -> u8 {
        self.piece_list_len[piece as usize]
    }

    pub fn pieces_of(&self, piece: Piece) -> &[Square] {
        &self.piece_list[piece as usize][..self.piece_list_len[piece as usize] as usize]
    }

    pub fn total_piece_count(&self) -> u32 {
        self.piece_list_len.iter().map(|&c| c as u32).sum()
    }

    /// Place `piece` on `sq`, updating piece list/index, incremental eval,
    /// and Zobrist key. `sq` must currently be empty.
    pub(crate) fn put_piece(&mut self, piece: Piece, sq: Square) {
        debug_assert_eq!(self.squares[sq as usize], EMPTY);
        self.squares[sq as usize] = piece;

        let len = self.piece_list_len[piece as usize] as usize;
        self.piece_list[piece as usize][len] = sq;
        self.piece_index[sq as usize] = len as u8;
        self.piece_list_len[piece as usize] += 1;

        if piece_type(piece) == PieceType::King {
            self.king_square[piece_color(piece).as_index()] = sq;
        }

        let color = piece_color(piece);
        let pt = piece_type(piece);
        let (mg, eg) = psqt::piece_value(pt);
        let (pmg, peg) = psqt::psqt_value(color, pt, sq);
        let sign = if color == Color::White { 1 } else { -1 };
        self.material_eval[0] += sign * mg;
        self.material_eval[1] += sign * eg;
        self.psqt_eval[0] += sign * pmg;
        self.psqt_eval[1] += sign * peg;

        self.zobrist_key ^= self.zr.piece_square[color.as_index()][pt.as_index()][sq as usize];
        if pt == PieceType::Pawn {
            self.pawn_hash ^= self.zr.piece_square[color.as_index()][pt.as_index()][sq as usize];
        }
        self.material_hash ^= material_hash_term(piece, self.piece_list_len[piece as usize]);
    }

    /// Remove the piece on `sq` (which must be occupied), updating piece
    /// list/index via swap-with-last, incremental eval, and Zobrist key.
    pub(crate) fn remove_piece(&mut self, sq: Square) -> Piece {
        let piece = self.squares[sq as usize];
        debug_assert_ne!(piece, EMPTY);
        self.squares[sq as usize] = EMPTY;

        self.material_hash ^= material_hash_term(piece, self.piece_list_len[piece as usize]);

        let idx = self.piece_index[sq as usize] as usize;
        let last = self.piece_list_len[piece as usize] as usize - 1;
        let moved_sq = self.piece_list[piece as usize][last];
        self.piece_list[piece as usize][idx] = moved_sq;
        self.piece_index[moved_sq as usize] = idx as u8;
        self.piece_list_len[piece as usize] -= 1;

        let color = piece_color(piece);
        let pt = piece_type(piece);
        let (mg, eg) = psqt::piece_value(pt);
        let (pmg, peg) = psqt::psqt_value(color, pt, sq);
        let sign = if color == Color::White { 1 } else { -1 };
        self.material_eval[0] -= sign * mg;
        self.material_eval[1] -= sign * eg;
        self.psqt_eval[0] -= sign * pmg;
        self.psqt_eval[1] -= sign * peg;

        self.zobrist_key ^= self.zr.piece_square[color.as_index()][pt.as_index()][sq as usize];
        if pt == PieceType::Pawn {
            self.pawn_hash ^= self.zr.piece_square[color.as_index()][pt.as_index()][sq as usize];
        }
        piece
    }

    /// Move the piece on `from` to `to` (which must be empty). A thin
    /// convenience over remove+put used by quiet moves.
    pub(crate) fn move_piece(&mut self, from: Square, to: Square) {
        let piece = self.remove_piece(from);
        self.put_piece(piece, to);
    }

    pub(crate) fn set_ep_square(&mut self, sq: Option<Square>) {
        if let Some(old) = self.ep_square {
            self.zobrist_key ^= self.zr.en_passant_file[file_of(old) as usize];
        }
        self.ep_square = sq;
        if let Some(new) = sq {
            self.zobrist_key ^= self.zr.en_passant_file[file_of(new) as usize];
        }
    }

    pub(crate) fn set_castling_rights(&mut self, rights: u8) {
        self.zobrist_key ^= self.zr.castling[self.castling_rights as usize];
        self.castling_rights = rights;
        self.zobrist_key ^= self.zr.castling[self.castling_rights as usize];
    }

    pub(crate) fn swap_side(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
        self.zobrist_key ^= self.zr.side_to_move;
    }

    /// Castling rights lost because a piece left `sq` (king or rook moving,
    /// or a rook being captured on its home square).
    pub(crate) fn castling_rights_lost_by_leaving(&self, sq: Square) -> u8 {
        let mut lost = 0u8;
        if sq == make_square(self.king_home[Color::White.as_index()], 0) {
            lost |= crate::defs::CASTLE_WK | crate::defs::CASTLE_WQ;
        }
        if sq == make_square(self.king_home[Color::Black.as_index()], 7) {
            lost |= crate::defs::CASTLE_BK | crate::defs::CASTLE_BQ;
        }
        if sq == make_square(self.rook_home[Color::White.as_index()][1], 0) {
            lost |= crate::defs::CASTLE_WK;
        }
        if sq == make_square(self.rook_home[Color::White.as_index()][0], 0) {
            lost |= crate::defs::CASTLE_WQ;
        }
        if sq == make_square(self.rook_home[Color::Black.as_index()][1], 7) {
            lost |= crate::defs::CASTLE_BK;
        }
        if sq == make_square(self.rook_home[Color::Black.as_index()][0], 7) {
            lost |= crate::defs::CASTLE_BQ;
        }
        lost
    }

    /// Recompute every incremental scalar from scratch and compare against
    /// the maintained value. `spec.md` §4.1/§8 property 2: the board must
    /// never silently drift.
    #[cfg(debug_assertions)]
    pub fn assert_consistent(&self) {
        let mut material = [0i32, 0i32];
        let mut psqt_eval = [0i32, 0i32];
        let mut zobrist = 0u64;
        let mut pawn_hash = 0u64;
        let mut material_hash = 0u64;

        for code in 1..PIECE_CODES {
            if code == 7 || code == 8 {
                continue;
            }
            let piece = code as Piece;
            let count = self.piece_list_len[code];
            if count == 0 {
                continue;
            }
            material_hash ^= material_hash_term(piece, count);
            let color = piece_color(piece);
            let pt = piece_type(piece);
            let sign = if color == Color::White { 1 } else { -1 };
            let (mg, eg) = psqt::piece_value(pt);
            for i in 0..count as usize {
                let sq = self.piece_list[code][i];
                material[0] += sign * mg;
                material[1] += sign * eg;
                let (pmg, peg) = psqt::psqt_value(color, pt, sq);
                psqt_eval[0] += sign * pmg;
                psqt_eval[1] += sign * peg;
                zobrist ^= self.zr.piece_square[color.as_index()][pt.as_index()][sq as usize];
                if pt == PieceType::Pawn {
                    pawn_hash ^=
                        self.zr.piece_square[color.as_index()][pt.as_index()][sq as usize];
                }
            }
        }
        zobrist ^= self.zr.castling[self.castling_rights as usize];
        if let Some(ep) = self.ep_square {
            zobrist ^= self.zr.en_passant_file[file_of(ep) as usize];
        }
        if self.side_to_move == Color::Black {
            zobrist ^= self.zr.side_to_move;
        }

        debug_assert_eq!(material, self.material_eval, "material eval drifted");
        debug_assert_eq!(psqt_eval, self.psqt_eval, "psqt eval drifted");
        debug_assert_eq!(zobrist, self.zobrist_key, "zobrist key drifted");
        debug_assert_eq!(pawn_hash, self.pawn_hash, "pawn hash drifted");
        debug_assert_eq!(material_hash, self.material_hash, "material hash drifted");
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    pub fn assert_consistent(&self) {}

    /// True if the current side's king is attacked.
    pub fn in_check(&self) -> bool {
        attacks::is_square_attacked(self, self.king_square(self.us()), self.opponent())
    }

    /// True if moving side has insufficient mating material (used by
    /// null-move pruning and draw detection).
    pub fn has_non_pawn_material(&self, color: Color) -> bool {
        use crate::defs::{make_piece as mp, PieceType::*};
        [Knight, Bishop, Rook, Queen]
            .iter()
            .any(|&pt| self.piece_count(mp(color, pt)) > 0)
    }

    /// Threefold-repetition check over the reversible-move window.
    pub fn is_repetition(&self) -> bool {
        let window = self.halfmove_clock as usize;
        let mut count = 0;
        for key in self.history.recent_keys(window) {
            if key == self.zobrist_key {
                count += 1;
                if count >= 2 {
                    return true;
                }
            }
        }
        false
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// A cheap, order-sensitive-but-collision-tolerant contribution to the
/// material hash: XOR the piece code (shifted so pawns/knights/etc. occupy
/// distinct bit ranges) combined with the post-update count. This mirrors
/// the original engine's reliance on a single rolling `material_hash` field
/// (`position.h`/`hash.c`) without requiring a full Zobrist sub-table.
#[inline(always)]
fn material_hash_term(piece: Piece, count_after: u8) -> u64 {
    let shift = (piece as u64 % 16) * 4;
    ((count_after as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)) << shift
        ^ ((piece as u64).wrapping_mul(0xC2B2_AE3D_27D4_EB4F))
}
