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

//! Limpet, a UCI-compatible chess engine written in Rust.
//!
//! Accepted commands:
//! - `go` with the options `wtime`, `btime`, `winc`, `binc`, `movestogo`,
//!   `depth`, `nodes`, `movetime` and `infinite`. There's also a special
//!   option `perft <depth>`, which overrides the regular search to run perft
//!   to `<depth>`.
//! - `isready`
//! - `p`: pretty-print the current board
//! - `perft <depth>`: same as `go perft <depth>`
//! - `position`
//! - `setoption`: see output of `uci` command for more detail
//! - `stop`
//! - `uci`
//! - `ucinewgame`
//! - `quit`

use std::sync::mpsc::RecvError;

use engine::Engine;

/// Unit testing.
mod bench;
/// Items associated with [`Board`](board::Board).
mod board;
/// Definitions and enumerations.
mod defs;
/// The trivial endgame oracle.
mod endgame;
/// Items associated with [`Engine`].
mod engine;
/// Error variants.
mod error;
/// Items related to evaluation.
mod evaluation;
/// Items related to move generation.
mod movegen;
/// Perft: see <https://www.chessprogramming.org/Perft>.
mod perft;
/// Items related to searching.
mod search;
/// A transposition table.
mod transposition_table;

fn main() -> Result<(), RecvError> {
    Engine::new().main_loop()
}
