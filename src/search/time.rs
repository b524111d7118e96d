//! Time management (`spec.md` §4.9). Grounded in the teacher's game-phase
//! aware `search::time`, trimmed to a single allocation computed once at the
//! start of a search rather than re-estimated by a pool of worker threads:
//! there is only one search loop to budget for.

use crate::board::Board;
use crate::defs::Color;
use crate::search::defs::GameTime;

/// Reserved against GUI/OS scheduling lag so the engine never returns a move
/// later than the time control actually allows.
const OVERHEAD_MS: u128 = 50;
/// Never plan to use the entire computed slice; leaves room for the position
/// turning out to need another iteration of search.
const SAFETY_BUFFER: f64 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Opening,
    Middlegame,
    Endgame,
}

/// A coarse phase estimate from remaining piece count, used only to scale
/// the time slice (fewer pieces left on the board means positions tend to
/// resolve with less calculation per move).
pub fn game_phase(board: &Board) -> GamePhase {
    let pieces = board.total_piece_count();
    if board.fullmove_number <= 10 && pieces >= 28 {
        GamePhase::Opening
    } else if pieces <= 14 {
        GamePhase::Endgame
    } else {
        GamePhase::Middlegame
    }
}

fn estimate_moves_to_go(board: &Board) -> u32 {
    match game_phase(board) {
        GamePhase::Opening => 40,
        GamePhase::Middlegame => 30,
        GamePhase::Endgame => 20,
    }
}

fn phase_scale(phase: GamePhase) -> f64 {
    match phase {
        GamePhase::Opening => 0.9,
        GamePhase::Middlegame => 1.15,
        GamePhase::Endgame => 1.0,
    }
}

/// Milliseconds to allocate for the upcoming search, given the GUI's
/// `go wtime/btime/winc/binc/movestogo` and the board to move in.
pub fn calculate_time_slice(gt: &GameTime, board: &Board) -> u128 {
    let (time_left, increment) = match board.us() {
        Color::White => (gt.wtime, gt.winc),
        Color::Black => (gt.btime, gt.binc),
    };

    let moves_to_go = gt.moves_to_go.unwrap_or_else(|| estimate_moves_to_go(board)).max(1) as u128;
    let base = time_left / moves_to_go + increment;
    let scaled = (base as f64 * phase_scale(game_phase(board)) * SAFETY_BUFFER) as u128;

    scaled.saturating_sub(OVERHEAD_MS).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::FEN_START_POSITION;

    #[test]
    fn allocates_less_time_when_low_on_the_clock() {
        let mut board = Board::new();
        board.set_from_fen(FEN_START_POSITION).unwrap();
        let generous = GameTime { wtime: 300_000, btime: 300_000, winc: 0, binc: 0, moves_to_go: None };
        let tight = GameTime { wtime: 5_000, btime: 5_000, winc: 0, binc: 0, moves_to_go: None };
        assert!(calculate_time_slice(&generous, &board) > calculate_time_slice(&tight, &board));
    }

    #[test]
    fn endgame_phase_detected_with_few_pieces() {
        let mut board = Board::new();
        board.set_from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(game_phase(&board), GamePhase::Endgame);
    }
}
