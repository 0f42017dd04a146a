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

use std::time::Instant;

use crate::{
    board::Board,
    movegen::{generate_moves, AllMoves, Moves},
};

/// Outputs and returns the number of leaf nodes `depth` moves in the future.
///
/// If `IS_TIMED`, it will also output the time taken and the average NPS.
pub fn perft<const SHOULD_PRINT: bool, const IS_TIMED: bool>(board: &mut Board, depth: u8) -> u64 {
    if IS_TIMED {
        let time = Instant::now();
        let result = perft::<SHOULD_PRINT, false>(board, depth);
        // microseconds for more precision
        let elapsed_us = time.elapsed().as_micros().max(1) as u64;
        let nps = 1_000_000 * result / elapsed_us;
        println!("Time taken: {} ms; NPS: {nps}", elapsed_us / 1_000);
        return result;
    }

    if depth == 0 {
        if SHOULD_PRINT {
            println!("1");
        }
        return 1;
    }

    let mut moves = Moves::new();
    generate_moves::<AllMoves>(board, &mut moves);

    let mut total = 0;
    for &mv in moves.iter() {
        if !board.make_move(mv) {
            continue;
        }

        let subtotal = if depth == 1 {
            1
        } else {
            perft::<false, false>(board, depth - 1)
        };
        board.unmake_move();
        total += subtotal;

        if SHOULD_PRINT {
            println!("{mv}: {subtotal}");
        }
    }
    if SHOULD_PRINT {
        println!("Total: {total}");
    }

    total
}
