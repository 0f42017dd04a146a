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

use super::{alpha_beta::search, SearchReferences, SearchStatus, MAX_DEPTH};
use crate::{
    board::Board,
    evaluation::{Eval, INF_EVAL},
    movegen::Move,
};

/// Searches `board` at increasing depths until a limit says stop.
///
/// Returns the best move of the deepest *completed* iteration and its score;
/// an iteration cut short by time or a stop command is discarded whole, so a
/// half-explored move list can never displace a finished answer. The move is
/// [`None`] only when the position has no legal moves at all.
pub fn iterative_deepening(
    search_refs: &mut SearchReferences<'_>,
    board: &mut Board,
) -> (Option<Move>, Eval) {
    search_refs.tt.new_search();

    let mut best_move = None;
    let mut best_score = 0;

    for depth in 1..=MAX_DEPTH {
        search_refs.iteration_best = None;
        search_refs.seldepth = 0;

        let score = search(search_refs, board, -INF_EVAL, INF_EVAL, depth, 0);

        if search_refs.status != SearchStatus::Continue {
            break;
        }

        if let Some(mv) = search_refs.iteration_best {
            best_move = Some(mv);
        }
        best_score = score;

        search_refs.print_report(board, score, depth);

        if search_refs.should_stop(depth) {
            break;
        }
    }

    // a stop before depth 1 completed leaves no answer; any legal move beats
    // forfeiting on time
    let best_move = best_move
        .or(search_refs.iteration_best)
        .or_else(|| board.legal_moves().first().copied());

    (best_move, best_score)
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{mpsc::channel, Mutex},
        time::Duration,
    };

    use super::iterative_deepening;
    use crate::{
        board::Board,
        evaluation::{Eval, MATE},
        movegen::Move,
        search::{Depth, Limits, SearchReferences},
        transposition_table::TranspositionTable,
    };

    /// Runs a fixed-depth search on `fen` and returns the chosen move and
    /// score.
    fn run(fen: &str, depth: Depth) -> (Option<Move>, Eval) {
        let mut board: Board = fen.parse().expect("test FEN is valid");
        let (_tx, rx) = channel();
        let rx = Mutex::new(rx);
        let mut tt = TranspositionTable::with_capacity(16);
        let mut search_refs =
            SearchReferences::new(Limits::Depth(depth), Duration::ZERO, &rx, &mut tt);

        iterative_deepening(&mut search_refs, &mut board)
    }

    #[test]
    fn the_only_legal_move_is_returned() {
        // Black's king has exactly one square to go to
        let fen = "k7/8/1R6/8/8/8/8/K6R b - - 0 1";
        for depth in [1, 3, 5] {
            let (mv, _) = run(fen, depth);
            let mv = mv.expect("a legal move exists");
            assert_eq!(mv.to_string(), "a8a7", "depth {depth} chose {mv}");
        }
    }

    #[test]
    fn mate_in_one_is_found() {
        let (mv, score) = run("k7/3Q4/1K6/8/8/8/8/8 w - - 0 1", 2);
        let mv = mv.expect("a legal move exists");

        assert!(score >= MATE - 2, "mate missed, score {score}");
        // several queen moves mate on the spot; d7d8 is the canonical one
        let mating = ["d7d8", "d7b7", "d7a7"];
        assert!(mating.contains(&mv.to_string().as_str()), "{mv} does not mate");
    }

    #[test]
    fn stalemate_scores_zero_with_no_move() {
        let (mv, score) = run("k7/8/1Q6/8/8/8/8/K7 b - - 0 1", 3);
        assert!(mv.is_none());
        assert_eq!(score, 0);
    }

    #[test]
    fn startpos_opening_is_plausible() {
        let (mv, _) = run(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            4,
        );
        let mv = mv.expect("the starting position has moves").to_string();

        let plausible = ["e2e4", "d2d4", "g1f3", "c2c4"];
        assert!(plausible.contains(&mv.as_str()), "opened with {mv}");
    }

    #[test]
    fn fixed_depth_search_is_deterministic() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let (first_mv, first_score) = run(fen, 4);
        let (second_mv, second_score) = run(fen, 4);

        assert_eq!(first_mv, second_mv);
        assert_eq!(first_score, second_score);
    }

    #[test]
    fn an_unstoppable_passer_searches_as_winning() {
        // the pawn is past its own fourth rank with the defending king
        // behind it, so every line the search looks at ends in the oracle's
        // won ending
        let (mv, score) = run("8/8/8/4P3/8/4k3/8/4K3 w - - 0 1", 4);
        assert!(mv.is_some());
        assert!(score > 4000, "winning pawn ending scored {score}");
    }
}
