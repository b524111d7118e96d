//! FEN reading and writing (`spec.md` §3).

use crate::defs::{
    file_of, make_piece, make_square, piece_color, piece_type, Color, PieceType, BOARD_SIZE,
    CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, EMPTY,
};
use crate::misc::parse::square_from_str;

use super::Board;

impl Board {
    pub fn set_from_fen(&mut self, fen: &str) -> Result<(), String> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(format!("FEN has too few fields: '{fen}'"));
        }

        self.reset();

        let mut rank = 7i8;
        let mut file = 0u8;
        for ch in fields[0].chars() {
            match ch {
                '/' => {
                    if file != 8 {
                        return Err(format!("FEN rank too short: '{fen}'"));
                    }
                    rank -= 1;
                    file = 0;
                }
                '1'..='8' => {
                    file += ch as u8 - b'0';
                }
                _ => {
                    let piece = char_to_piece(ch).ok_or_else(|| format!("bad piece char '{ch}'"))?;
                    if rank < 0 || file >= 8 {
                        return Err(format!("FEN board overflow: '{fen}'"));
                    }
                    let sq = make_square(file, rank as u8);
                    self.put_piece(piece, sq);
                    file += 1;
                }
            }
        }

        self.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(format!("bad side-to-move '{other}'")),
        };
        if self.side_to_move == Color::Black {
            self.zobrist_key ^= self.zr.side_to_move;
        }

        let mut rights = 0u8;
        if fields[2] != "-" {
            for ch in fields[2].chars() {
                rights |= match ch {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    _ => 0,
                };
            }
        }
        self.castling_rights = rights;
        self.zobrist_key ^= self.zr.castling[self.castling_rights as usize];

        if fields[3] != "-" {
            let sq = square_from_str(fields[3]).ok_or_else(|| format!("bad ep square '{}'", fields[3]))?;
            self.ep_square = Some(sq);
            self.zobrist_key ^= self.zr.en_passant_file[file_of(sq) as usize];
        }

        self.halfmove_clock = fields.get(4).and_then(|s| s.parse().ok()).unwrap_or(0);
        self.fullmove_number = fields.get(5).and_then(|s| s.parse().ok()).unwrap_or(1);

        Ok(())
    }

    fn reset(&mut self) {
        self.squares = [EMPTY; BOARD_SIZE];
        self.piece_list = [[0; super::PIECE_LIST_CAPACITY]; super::PIECE_CODES];
        self.piece_list_len = [0; super::PIECE_CODES];
        self.piece_index = [0; BOARD_SIZE];
        self.side_to_move = Color::White;
        self.castling_rights = 0;
        self.ep_square = None;
        self.halfmove_clock = 0;
        self.fullmove_number = 1;
        self.king_square = [0, 0];
        self.material_eval = [0, 0];
        self.psqt_eval = [0, 0];
        self.zobrist_key = 0;
        self.pawn_hash = 0;
        self.material_hash = 0;
        self.ply_from_root = 0;
        self.history.clear();
    }

    pub fn to_fen(&self) -> String {
        let mut s = String::new();
        for rank in (0..8).rev() {
            let mut empty_run = 0u8;
            for file in 0..8 {
                let sq = make_square(file, rank);
                let p = self.piece_at(sq);
                if p == EMPTY {
                    empty_run += 1;
                } else {
                    if empty_run > 0 {
                        s.push((b'0' + empty_run) as char);
                        empty_run = 0;
                    }
                    s.push(piece_to_char(p));
                }
            }
            if empty_run > 0 {
                s.push((b'0' + empty_run) as char);
            }
            if rank != 0 {
                s.push('/');
            }
        }

        s.push(' ');
        s.push(if self.side_to_move == Color::White { 'w' } else { 'b' });

        s.push(' ');
        let mut any = false;
        if self.castling_rights & CASTLE_WK != 0 {
            s.push('K');
            any = true;
        }
        if self.castling_rights & CASTLE_WQ != 0 {
            s.push('Q');
            any = true;
        }
        if self.castling_rights & CASTLE_BK != 0 {
            s.push('k');
            any = true;
        }
        if self.castling_rights & CASTLE_BQ != 0 {
            s.push('q');
            any = true;
        }
        if !any {
            s.push('-');
        }

        s.push(' ');
        match self.ep_square {
            Some(sq) => s.push_str(&crate::misc::parse::square_to_str(sq)),
            None => s.push('-'),
        }

        s.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        s
    }
}

fn char_to_piece(ch: char) -> Option<crate::defs::Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let pt = match ch.to_ascii_lowercase() {
        'p' => PieceType::Pawn,
        'n' => PieceType::Knight,
        'b' => PieceType::Bishop,
        'r' => PieceType::Rook,
        'q' => PieceType::Queen,
        'k' => PieceType::King,
        _ => return None,
    };
    Some(make_piece(color, pt))
}

fn piece_to_char(p: crate::defs::Piece) -> char {
    let ch = match piece_type(p) {
        PieceType::Pawn => 'p',
        PieceType::Knight => 'n',
        PieceType::Bishop => 'b',
        PieceType::Rook => 'r',
        PieceType::Queen => 'q',
        PieceType::King => 'k',
    };
    if piece_color(p) == Color::White {
        ch.to_ascii_uppercase()
    } else {
        ch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::FEN_START_POSITION;

    #[test]
    fn start_position_round_trips() {
        let mut board = Board::new();
        board.set_from_fen(FEN_START_POSITION).unwrap();
        assert_eq!(board.to_fen(), FEN_START_POSITION);
        board.assert_consistent();
    }

    #[test]
    fn kiwipete_round_trips() {
        let mut board = Board::new();
        board.set_from_fen(crate::defs::FEN_KIWIPETE_POSITION).unwrap();
        assert_eq!(board.to_fen(), crate::defs::FEN_KIWIPETE_POSITION);
        board.assert_consistent();
    }
}
