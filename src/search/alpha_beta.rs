/*
 * Limpet, a UCI-compatible chess engine
 * Copyright (C) 2025 the Limpet authors
 *
 * Limpet is free software: you can redistribute it and/or modify it under the
 * terms of the GNU General Public License as published by the Free Software
 * Foundation, either version 3 of the License, or (at your option) any later
 * version.
 *
 * Limpet is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
 * FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
 * details.
 *
 * You should have received a copy of the GNU General Public License along with
 * Limpet. If not, see <https://www.gnu.org/licenses/>.
 */

use super::{ordering::ScoredMoves, Depth, SearchReferences, SearchStatus, MAX_PLY};
use crate::{
    board::Board,
    evaluation::{evaluate, mated_in, Eval, DRAW, INF_EVAL},
    movegen::{generate_moves, AllMoves, CapturesOnly, Moves},
    transposition_table::{Bound, TranspositionHit},
};

/// Performs a negamax alpha-beta search on `board`.
///
/// Returns the evaluation of the position after searching to `depth`; at the
/// horizon the quiescence search takes over. `height` is the distance from
/// the root: the root itself searches with `height == 0` and additionally
/// records its best move in
/// [`iteration_best`](SearchReferences::iteration_best).
pub fn search(
    search_refs: &mut SearchReferences<'_>,
    board: &mut Board,
    mut alpha: Eval,
    mut beta: Eval,
    depth: Depth,
    height: u8,
) -> Eval {
    if depth == 0 {
        return quiescence_search(search_refs, board, alpha, beta, height);
    }

    search_refs.nodes += 1;
    search_refs.seldepth = search_refs.seldepth.max(height);
    let is_root = height == 0;

    if !is_root {
        if search_refs.check_status() != SearchStatus::Continue {
            return 0;
        }

        // draw by repetition or the fifty-move rule
        if board.is_draw() {
            return DRAW;
        }

        if height as usize >= MAX_PLY - 1 {
            return evaluate(board);
        }
    }

    // probe the transposition table. An entry searched at least as deep as
    // we're about to narrows the window or answers outright; the root never
    // takes the shortcut because it must end the iteration holding a move.
    let tt_hit = search_refs.tt.load(board.key(), height);
    if tt_hit.is_some() {
        search_refs.tt_hits += 1;
    }
    if !is_root {
        if let Some(hit) = tt_hit {
            if hit.depth() >= depth {
                match hit.bound() {
                    Bound::Exact => return hit.score(),
                    Bound::Lower => alpha = alpha.max(hit.score()),
                    Bound::Upper => beta = beta.min(hit.score()),
                }
                if alpha >= beta {
                    return hit.score();
                }
            }
        }
    }
    let tt_move = tt_hit.and_then(TranspositionHit::mv);

    let mut moves = Moves::new();
    generate_moves::<AllMoves>(board, &mut moves);
    let mut picker = ScoredMoves::score(
        &moves,
        tt_move,
        search_refs.killers_at(height),
        search_refs,
    );

    let mut best_score = -INF_EVAL;
    let mut best_move = None;
    let mut raised_alpha = false;
    let mut legal_moves = 0_u32;

    while let Some(mv) = picker.next_best() {
        if !board.make_move(mv) {
            continue;
        }
        legal_moves += 1;

        let score = -search(search_refs, board, -beta, -alpha, depth - 1, height + 1);
        board.unmake_move();

        // if the search was stopped early, we can't trust its results
        if search_refs.status != SearchStatus::Continue {
            return 0;
        }

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }

        if score > alpha {
            alpha = score;
            raised_alpha = true;
            if is_root {
                search_refs.iteration_best = Some(mv);
            }

            // the move is too good: the opponent will never allow this node,
            // so the rest of the list doesn't matter
            if alpha >= beta {
                search_refs.cutoffs += 1;
                if mv.is_quiet() {
                    search_refs.insert_killer(height, mv);
                    search_refs.bump_history(mv, depth);
                }
                break;
            }
        }
    }

    // no legal moves at all: mate or stalemate
    if legal_moves == 0 {
        return if board.is_in_check() {
            mated_in(height)
        } else {
            DRAW
        };
    }

    let bound = if best_score >= beta {
        Bound::Lower
    } else if raised_alpha {
        Bound::Exact
    } else {
        Bound::Upper
    };
    search_refs
        .tt
        .store(board.key(), best_score, best_move, depth, bound, height);

    best_score
}

/// Performs a search that only considers captures and promotions, with the
/// static evaluation as a stand-pat floor.
///
/// This runs at the leaf nodes of the main search so that the engine never
/// evaluates a position in the middle of an exchange. There is no fixed ply
/// ceiling: the recursion terminates because every capture strictly shrinks
/// the board.
fn quiescence_search(
    search_refs: &mut SearchReferences<'_>,
    board: &mut Board,
    mut alpha: Eval,
    beta: Eval,
    height: u8,
) -> Eval {
    search_refs.nodes += 1;
    search_refs.qnodes += 1;
    search_refs.seldepth = search_refs.seldepth.max(height);

    if search_refs.check_status() != SearchStatus::Continue {
        return 0;
    }

    let stand_pat = evaluate(board);
    if height as usize >= MAX_PLY - 1 {
        return stand_pat;
    }

    if stand_pat >= beta {
        return beta;
    }
    alpha = alpha.max(stand_pat);

    let mut moves = Moves::new();
    generate_moves::<CapturesOnly>(board, &mut moves);
    let mut picker = ScoredMoves::score_noisy(&moves);

    while let Some(mv) = picker.next_best() {
        if !board.make_move(mv) {
            continue;
        }

        let score = -quiescence_search(search_refs, board, -beta, -alpha, height + 1);
        board.unmake_move();

        if search_refs.status != SearchStatus::Continue {
            return 0;
        }

        if score > alpha {
            alpha = score;
            if alpha >= beta {
                search_refs.cutoffs += 1;
                return beta;
            }
        }
    }

    alpha
}
