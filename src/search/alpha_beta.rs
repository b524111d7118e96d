//! Principal-variation search (`spec.md` §4.7): negamax with alpha-beta
//! pruning, null-move pruning (with verification and a mate-threat flag),
//! razoring, internal iterative deepening, search extensions, futility
//! pruning, late-move reductions, and a transposition table. Follows the
//! shape of the teacher's `search::alpha_beta` minus everything that exists
//! only to coordinate multiple search threads (thread-local TT batching,
//! Multi-Cut, sharp-sequence root reporting).

use crate::movegen::defs::{Move, MoveList, MoveType};
use crate::movegen::select;
use crate::search::defs::{
    HashFlag, SearchRefs, CHECKMATE, CHECKMATE_THRESHOLD, DRAW, FUTILITY_MARGIN, FUTILITY_MAX_DEPTH,
    IID_MIN_DEPTH, IID_REDUCTION, LMR_MIN_DEPTH, LMR_MOVE_THRESHOLD, LMR_REDUCTION, MAX_EXTENSION_PLY,
    NULL_MOVE_REDUCTION, NULL_MOVE_VERIFICATION_REDUCTION, RAZOR_MARGIN, RAZOR_MAX_DEPTH, STALEMATE,
};

use super::check_up;
use super::quiescence::quiescence;

#[allow(clippy::too_many_arguments)]
pub fn alpha_beta(
    refs: &mut SearchRefs,
    mut depth: i32,
    ply: i32,
    mut alpha: i32,
    beta: i32,
    ext: i32,
    pv: &mut Vec<Move>,
) -> i32 {
    pv.clear();
    refs.search_info.nodes += 1;
    refs.search_info.seldepth = refs.search_info.seldepth.max(ply);

    check_up(refs);
    if refs.search_info.interrupted() {
        return 0;
    }

    if ply > 0 && (refs.board.is_repetition() || refs.board.is_fifty_move_draw()) {
        return DRAW;
    }
    if ply >= crate::defs::MAX_PLY as i32 {
        return refs.evaluator.evaluate(refs.board);
    }

    let is_pv = beta - alpha > 1;
    let in_check = refs.board.in_check();

    // Check extension: a line spent forced in check is extended a ply, up
    // to the cumulative cap so a chain of checks cannot make the search
    // effectively unbounded in depth.
    let mut line_ext = ext;
    if in_check && line_ext < MAX_EXTENSION_PLY {
        depth += 1;
        line_ext += 1;
    }

    if depth <= 0 {
        return quiescence(refs, alpha, beta, ply);
    }

    let tt_key = refs.board.zobrist_key;
    let alpha_orig = alpha;
    let mut tt_move = Move::NULL;
    let mut mate_threat = false;

    if let Some(probe) = refs.tt.probe(tt_key, ply) {
        tt_move = probe.mv;
        mate_threat = probe.mate_threat;
        if ply > 0 && probe.depth as i32 >= depth {
            match probe.flag {
                HashFlag::Exact => return probe.score,
                HashFlag::Alpha if probe.score <= alpha => return alpha,
                HashFlag::Beta if probe.score >= beta => return beta,
                _ => {}
            }
        }
    }

    if !in_check
        && ply > 0
        && depth > NULL_MOVE_REDUCTION
        && beta < CHECKMATE_THRESHOLD
        && refs.board.has_non_pawn_material(refs.board.us())
    {
        let ep = refs.board.make_null();
        let mut child_pv = Vec::new();
        let score = -alpha_beta(
            refs,
            depth - 1 - NULL_MOVE_REDUCTION,
            ply + 1,
            -beta,
            -beta + 1,
            line_ext,
            &mut child_pv,
        );
        refs.board.unmake_null(ep);

        if refs.search_info.interrupted() {
            return 0;
        }

        if score >= beta {
            // Null-move cutoffs are confirmed with an ordinary reduced-depth
            // re-search of the real position before being trusted, since a
            // null move can hide zugzwang-style positions where passing is
            // illegally "too good".
            let verify_depth = depth - NULL_MOVE_VERIFICATION_REDUCTION;
            let mut verify_pv = Vec::new();
            let verify_score = if verify_depth <= 0 {
                quiescence(refs, beta - 1, beta, ply)
            } else {
                alpha_beta(refs, verify_depth, ply, beta - 1, beta, line_ext, &mut verify_pv)
            };
            if refs.search_info.interrupted() {
                return 0;
            }
            if verify_score >= beta {
                return beta;
            }
        } else if score <= -CHECKMATE_THRESHOLD {
            // The null move failed low on a mate score: the opponent has a
            // mating attack even after a free move, so this node is under a
            // genuine mate threat and pruning ahead should back off.
            mate_threat = true;
        }
    }

    let static_eval = if !in_check && depth <= FUTILITY_MAX_DEPTH {
        Some(refs.evaluator.evaluate(refs.board))
    } else {
        None
    };

    if !is_pv && !in_check && tt_move.is_null() && depth <= RAZOR_MAX_DEPTH {
        if let Some(eval) = static_eval {
            if eval + RAZOR_MARGIN * depth < beta {
                return quiescence(refs, alpha, beta, ply);
            }
        }
    }

    if tt_move.is_null() && depth >= IID_MIN_DEPTH {
        let mut iid_pv = Vec::new();
        alpha_beta(refs, depth - IID_REDUCTION, ply, alpha, beta, line_ext, &mut iid_pv);
        if refs.search_info.interrupted() {
            return 0;
        }
        if let Some(&mv) = iid_pv.first() {
            tt_move = mv;
        }
    }

    let mut list = MoveList::new();
    refs.mg.generate_moves(refs.board, &mut list, MoveType::All);
    let mut killers = [Move::NULL; 4];
    killers[0] = refs.search_info.killer_moves[ply as usize][0];
    killers[1] = refs.search_info.killer_moves[ply as usize][1];
    if ply >= 2 {
        let below = refs.search_info.killer_moves[(ply - 2) as usize];
        killers[2] = below[0];
        killers[3] = below[1];
    }
    let mate_killer = refs.search_info.mate_killers[ply as usize];
    let tt_move_opt = if tt_move.is_null() { None } else { Some(tt_move) };
    select::score_moves(&mut list, refs.board, tt_move_opt, killers, mate_killer, &refs.search_info.history);

    let mover_color_index = refs.board.us().as_index();
    let mut best_score = -crate::search::defs::INF;
    let mut best_move = Move::NULL;
    let mut moves_searched = 0usize;

    for i in 0..list.len() {
        let mv = list.pick_best(i);
        if !refs.board.make(mv) {
            continue;
        }
        moves_searched += 1;

        let gives_check = refs.board.in_check();
        let is_quiet = !mv.is_tactical();

        // Futility / history pruning: a late, quiet, non-checking move at
        // shallow depth that the history table rates as a loser and that
        // static eval plus a depth-scaled margin can't possibly lift to
        // alpha is dropped without a recursive search.
        if !is_pv
            && !in_check
            && !mate_threat
            && is_quiet
            && !gives_check
            && depth <= FUTILITY_MAX_DEPTH
            && moves_searched > LMR_MOVE_THRESHOLD
        {
            let pt = crate::defs::piece_type(mv.piece()).as_index();
            let to = mv.to() as usize;
            let history_score = refs.search_info.history[mover_color_index][pt][to];
            let futile_by_eval = static_eval.is_some_and(|eval| eval + FUTILITY_MARGIN * depth <= alpha);
            if history_score <= 0 || futile_by_eval {
                refs.board.unmake();
                continue;
            }
        }

        let mut extension = 0;
        if line_ext < MAX_EXTENSION_PLY {
            if is_pawn_push_to_seventh(mv) {
                extension = 1;
            } else if gives_check && has_single_reply(refs) {
                extension = 1;
            }
        }
        let new_depth = depth - 1 + extension;
        let child_ext = (line_ext + extension).min(MAX_EXTENSION_PLY);

        let mut child_pv = Vec::new();
        let score = if moves_searched == 1 {
            -alpha_beta(refs, new_depth, ply + 1, -beta, -alpha, child_ext, &mut child_pv)
        } else {
            let reduction = if is_quiet
                && !gives_check
                && !in_check
                && extension == 0
                && !mate_threat
                && depth >= LMR_MIN_DEPTH
                && moves_searched > LMR_MOVE_THRESHOLD
            {
                LMR_REDUCTION
            } else {
                0
            };

            let mut score = -alpha_beta(
                refs,
                new_depth - reduction,
                ply + 1,
                -alpha - 1,
                -alpha,
                child_ext,
                &mut child_pv,
            );
            if score > alpha && (reduction > 0 || score < beta) {
                score = -alpha_beta(refs, new_depth, ply + 1, -beta, -alpha, child_ext, &mut child_pv);
            }
            score
        };

        refs.board.unmake();

        if refs.search_info.interrupted() {
            return 0;
        }

        if score > best_score {
            best_score = score;
            best_move = mv;
            if score > alpha {
                alpha = score;
                pv.clear();
                pv.push(mv);
                pv.extend(child_pv.iter().copied());
            }
        }

        if alpha >= beta {
            if score >= CHECKMATE_THRESHOLD {
                refs.search_info.mate_killers[ply as usize] = mv;
            }
            if is_quiet {
                record_killer(refs, ply, mv);
                select::record_history_cutoff(&mut refs.search_info.history, mv, mover_color_index, depth);
            }
            break;
        }
    }

    if moves_searched == 0 {
        return if in_check { -CHECKMATE + ply } else { STALEMATE };
    }

    let flag = if best_score <= alpha_orig {
        HashFlag::Alpha
    } else if best_score >= beta {
        HashFlag::Beta
    } else {
        HashFlag::Exact
    };
    refs.tt.store(
        tt_key,
        best_move,
        best_score,
        depth.min(i8::MAX as i32) as i8,
        flag,
        ply,
        mate_threat,
    );

    best_score
}

fn record_killer(refs: &mut SearchRefs, ply: i32, mv: Move) {
    let slot = &mut refs.search_info.killer_moves[ply as usize];
    if slot[0] != mv {
        slot[1] = slot[0];
        slot[0] = mv;
    }
}

/// True if `mv` pushes a pawn to the rank just short of promotion, one of
/// the forcing patterns `spec.md` §4.7 calls out for a search extension.
fn is_pawn_push_to_seventh(mv: Move) -> bool {
    use crate::defs::{piece_color, piece_type, rank_of, Color, PieceType};

    if piece_type(mv.piece()) != PieceType::Pawn {
        return false;
    }
    match piece_color(mv.piece()) {
        Color::White => rank_of(mv.to()) == 6,
        Color::Black => rank_of(mv.to()) == 1,
    }
}

/// True if, in the position left by the move just made, the side to move
/// has exactly one legal reply. Only called when that move also gives
/// check, since a full legal-move count is too expensive to run on every
/// quiet move in the tree.
fn has_single_reply(refs: &mut SearchRefs) -> bool {
    refs.mg.generate_legal_moves(refs.board, MoveType::All).len() == 1
}
