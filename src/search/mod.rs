//! Iterative deepening search driver (`spec.md` §4.7-4.9). Ties together
//! `alpha_beta`, `quiescence` and `time` the way the teacher's
//! `SearchManager` does, collapsed onto a single call rather than a thread
//! spawned per `go`: this engine commits to single-threaded search, so
//! `think` just runs on whichever thread the engine's command loop calls it
//! from.

pub mod alpha_beta;
pub mod defs;
pub mod quiescence;
pub mod time;

use crate::movegen::defs::Move;
use defs::{
    SearchControl, SearchMode, SearchParams, SearchRefs, SearchReport, SearchSummary,
    SearchTerminate, ASPIRATION_WINDOW, CHECKMATE, CHECKMATE_THRESHOLD, CHECK_TERMINATION, INF,
};

/// Polled every `CHECK_TERMINATION` nodes: drains any `stop`/`quit` that
/// arrived on `control_rx` and enforces the allocated time budget.
pub(crate) fn check_up(refs: &mut SearchRefs) {
    if refs.search_info.nodes & CHECK_TERMINATION != 0 {
        return;
    }

    if let Some(rx) = refs.control_rx {
        while let Ok(ctrl) = rx.try_recv() {
            match ctrl {
                SearchControl::Stop => refs.search_info.terminate = SearchTerminate::Stop,
                SearchControl::Quit => refs.search_info.terminate = SearchTerminate::Quit,
                SearchControl::Start(_) | SearchControl::Nothing => {}
            }
        }
    }

    if refs.search_params.search_mode == SearchMode::Nodes
        && refs.search_info.nodes >= refs.search_params.nodes
    {
        refs.search_info.terminate = SearchTerminate::Stop;
    }

    if refs.search_info.allocated_time > 0
        && refs.search_info.timer_elapsed() >= refs.search_info.allocated_time
    {
        refs.search_info.terminate = SearchTerminate::Stop;
    }
}

/// Runs iterative deepening from depth 1 until the search is interrupted or
/// `search_params` caps it, widening an aspiration window around each
/// iteration's score. Returns the best move found at the last completed
/// depth.
pub fn think(refs: &mut SearchRefs) -> Move {
    refs.search_info.timer_start();
    refs.search_info.allocated_time = allocated_time_for(refs.search_params, refs.board);
    refs.tt.new_search();

    let max_depth = match refs.search_params.search_mode {
        SearchMode::Depth => refs.search_params.depth,
        _ => crate::defs::MAX_PLY as i32 - 1,
    };

    let mut best_move = Move::NULL;
    let mut best_score = 0;
    let mut pv: Vec<Move> = Vec::new();
    let mut depth = 1;

    while depth <= max_depth.max(1) {
        let (mut alpha, mut beta) = if depth <= 4 {
            (-INF, INF)
        } else {
            (best_score - ASPIRATION_WINDOW, best_score + ASPIRATION_WINDOW)
        };
        let mut fail_low_margin = ASPIRATION_WINDOW;
        let mut fail_high_margin = ASPIRATION_WINDOW;

        let score = loop {
            pv.clear();
            let s = alpha_beta::alpha_beta(refs, depth, 0, alpha, beta, 0, &mut pv);
            if refs.search_info.interrupted() {
                break s;
            }
            if s <= alpha && alpha > -INF {
                fail_low_margin *= 2;
                alpha = (alpha - fail_low_margin).max(-INF);
            } else if s >= beta && beta < INF {
                fail_high_margin *= 2;
                beta = (beta + fail_high_margin).min(INF);
            } else {
                break s;
            }
        };

        // An iteration cut short by `stop`/time-up returns a score rooted in
        // whichever subtree happened to be live when the cutoff landed, not
        // a real bound on the position: keep the previous depth's move.
        if refs.search_info.interrupted() {
            if depth == 1 && best_move.is_null() {
                if let Some(&mv) = pv.first() {
                    best_move = mv;
                }
            }
            break;
        }

        best_score = score;
        if let Some(&mv) = pv.first() {
            best_move = mv;
        }

        report_summary(refs, depth, best_score, &pv);

        if best_score.abs() > CHECKMATE_THRESHOLD {
            break;
        }
        depth += 1;
    }

    if let Some(tx) = refs.report_tx {
        let _ = tx.send(SearchReport::Finished(best_move));
    }
    best_move
}

fn allocated_time_for(sp: &SearchParams, board: &crate::board::Board) -> u128 {
    match sp.search_mode {
        SearchMode::MoveTime => sp.move_time,
        SearchMode::GameTime => time::calculate_time_slice(&sp.game_time, board),
        SearchMode::Depth | SearchMode::Nodes | SearchMode::Infinite | SearchMode::Nothing => 0,
    }
}

fn report_summary(refs: &mut SearchRefs, depth: i32, score: i32, pv: &[Move]) {
    let Some(tx) = refs.report_tx else { return };

    let elapsed = refs.search_info.timer_elapsed().max(1);
    let nodes = refs.search_info.nodes;
    let nps = (nodes as u128 * 1000 / elapsed) as u64;
    let mate = if score > CHECKMATE_THRESHOLD {
        Some((CHECKMATE - score + 1) / 2)
    } else if score < -CHECKMATE_THRESHOLD {
        Some(-((CHECKMATE + score + 1) / 2))
    } else {
        None
    };

    let summary = SearchSummary {
        depth,
        seldepth: refs.search_info.seldepth,
        time: elapsed,
        cp: score,
        mate,
        nodes,
        nps,
        hash_full: refs.tt.hash_full_permille(),
        pv: pv.to_vec(),
    };
    let _ = tx.send(SearchReport::SearchSummary(summary));
}
