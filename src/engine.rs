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

use std::{
    io::stdin,
    process::exit,
    sync::{
        mpsc::{channel, Receiver, RecvError},
        Mutex,
    },
    thread::spawn,
};

use crate::{
    board::Board,
    defs::{PieceType, Side, Square},
    movegen::Move,
    perft::perft,
    search::{iterative_deepening::iterative_deepening, Limits, SearchReferences, SearchStatus},
    transposition_table::TranspositionTable,
};
use uci::{parse_into_nonzero_option, parse_option, parse_time, UciOptions};

/// UCI options and token parsing.
pub mod uci;

/// Master object that contains all the other major objects.
pub struct Engine {
    /// The internal board.
    ///
    /// See [`Board`].
    board: Board,
    /// The current set options.
    options: UciOptions,
    /// A receiver to receive UCI commands from.
    ///
    /// The search borrows this too, to poll for "stop" between nodes.
    uci_rx: Mutex<Receiver<String>>,
    /// A hash table of previously-encountered positions.
    tt: TranspositionTable,
}

impl Engine {
    /// Creates a new [`Engine`] and spawns a thread to receive UCI input
    /// from.
    ///
    /// The board starts at the starting position.
    pub fn new() -> Self {
        let (tx, rx) = channel();

        spawn(move || {
            let stdin = stdin();

            for command in stdin.lines() {
                let Ok(command) = command else {
                    break;
                };
                if tx.send(command).is_err() {
                    break;
                }
            }
        });

        let options = UciOptions::new();
        Self {
            board: Board::default(),
            options,
            uci_rx: Mutex::new(rx),
            tt: TranspositionTable::with_capacity(options.hash()),
        }
    }

    /// Repeatedly waits for a command and executes it according to the UCI
    /// protocol.
    ///
    /// Malformed commands get a diagnostic line and are otherwise ignored;
    /// only `quit` (or the command channel closing) ends the loop.
    pub fn main_loop(&mut self) -> Result<(), RecvError> {
        loop {
            let command = self.uci_rx.lock().map_err(|_| RecvError)?.recv()?;
            let mut tokens = command.split_whitespace();

            match tokens.next() {
                Some("go") => self.go(tokens),
                Some("isready") => println!("readyok"),
                Some("p") => self.board.pretty_print(),
                Some("perft") => {
                    if let Some(depth) = parse_into_nonzero_option(tokens.next()) {
                        let _ = perft::<true, true>(&mut self.board, depth);
                    }
                }
                Some("position") => self.position(tokens),
                Some("setoption") => self.set_option(tokens),
                // a stop with no search running is a no-op
                Some("stop") => (),
                Some("uci") => {
                    UciOptions::print();
                    println!("uciok");
                }
                Some("ucinewgame") => self.new_game(),
                Some("quit") => break Ok(()),
                Some(other) => {
                    println!("info string Unrecognised command \"{other}\".");
                }
                _ => (),
            }
        }
    }

    /// Clears everything the previous game left behind.
    fn new_game(&mut self) {
        self.board.set_startpos();
        self.tt.clear();
    }

    /// Interprets and executes the `go` command, ending with a `bestmove`
    /// line.
    fn go<'a, T>(&mut self, mut tokens: T)
    where
        T: Iterator<Item = &'a str>,
    {
        let mut limits = Limits::default();

        while let Some(token) = tokens.next() {
            let next = tokens.next();

            match token {
                "wtime" if self.board.side_to_move() == Side::WHITE => {
                    if let Some(time) = parse_time(next) {
                        limits = Limits::new_timed(time);
                    }
                }
                "btime" if self.board.side_to_move() == Side::BLACK => {
                    if let Some(time) = parse_time(next) {
                        limits = Limits::new_timed(time);
                    }
                }
                "winc" if self.board.side_to_move() == Side::WHITE => {
                    if let Some(time) = parse_time(next) {
                        limits.set_inc(time);
                    }
                }
                "binc" if self.board.side_to_move() == Side::BLACK => {
                    if let Some(time) = parse_time(next) {
                        limits.set_inc(time);
                    }
                }
                "movestogo" => {
                    if let Some(moves) = parse_into_nonzero_option(next) {
                        limits.set_moves_to_go(moves);
                    }
                }
                "depth" => {
                    if let Some(depth) = parse_into_nonzero_option(next) {
                        limits = Limits::Depth(depth);
                    }
                }
                "nodes" => {
                    if let Some(nodes) = parse_into_nonzero_option(next) {
                        limits = Limits::Nodes(nodes);
                    }
                }
                "movetime" => {
                    if let Some(movetime) = parse_time(next) {
                        limits = Limits::Movetime(movetime);
                    }
                }
                "infinite" => limits = Limits::Infinite,
                "perft" => {
                    if let Some(depth) = parse_into_nonzero_option(next) {
                        let _ = perft::<true, true>(&mut self.board, depth);
                    }
                    return;
                }
                _ => (),
            }
        }

        let mut search_refs = SearchReferences::new(
            limits,
            self.options.move_overhead(),
            &self.uci_rx,
            &mut self.tt,
        );
        let (best_move, _score) = iterative_deepening(&mut search_refs, &mut self.board);
        let should_quit = search_refs.status == SearchStatus::Quit;

        match best_move {
            Some(mv) => println!("bestmove {mv}"),
            None => println!("bestmove 0000"),
        }

        if should_quit {
            exit(0);
        }
    }

    /// Sets the board to a position specified by the `position` command.
    ///
    /// The command is applied to a scratch board first: if any part of it
    /// fails to parse, or a move in the list is illegal, the existing
    /// position is left untouched.
    fn position<'a, T>(&mut self, mut tokens: T)
    where
        T: Iterator<Item = &'a str>,
    {
        let board = match tokens.next() {
            Some("startpos") => Board::default(),
            Some("fen") => {
                let mut fen = String::with_capacity(128);
                let mut moves_keyword = false;

                for token in tokens.by_ref() {
                    if token == "moves" {
                        moves_keyword = true;
                        break;
                    }
                    fen.push_str(token);
                    fen.push(' ');
                }

                match fen.parse::<Board>() {
                    Ok(board) => {
                        if moves_keyword {
                            return self.apply_moves(board, tokens);
                        }
                        board
                    }
                    Err(error) => {
                        println!("info string Invalid FEN: {error}.");
                        return;
                    }
                }
            }
            _ => {
                println!("info string Expected \"startpos\" or \"fen\".");
                return;
            }
        };

        if tokens.next() == Some("moves") {
            return self.apply_moves(board, tokens);
        }

        self.board = board;
    }

    /// Applies a list of long-algebraic moves to `board`, then commits it.
    fn apply_moves<'a, T>(&mut self, mut board: Board, tokens: T)
    where
        T: Iterator<Item = &'a str>,
    {
        for text in tokens {
            let Some(mv) = parse_move(&mut board, text) else {
                println!("info string Invalid or illegal move \"{text}\".");
                return;
            };
            if !board.make_move(mv) {
                println!("info string Invalid or illegal move \"{text}\".");
                return;
            }
        }

        self.board = board;
    }

    /// Sets a UCI option from a `setoption` command.
    ///
    /// Unknown option names are ignored without complaint, as the protocol
    /// asks.
    fn set_option<'a, T>(&mut self, mut tokens: T)
    where
        T: Iterator<Item = &'a str>,
    {
        if tokens.next() != Some("name") {
            return;
        }

        match tokens.next() {
            Some("Move") => {
                if tokens.next() != Some("Overhead") {
                    return;
                }
                if tokens.next() != Some("value") {
                    return;
                }

                if let Some(overhead) = parse_option(tokens.next()) {
                    self.options.set_move_overhead(overhead);
                }
            }
            Some("Hash") => {
                if tokens.next() != Some("value") {
                    return;
                }

                if let Some(hash) = parse_option(tokens.next()) {
                    self.options.set_hash(hash);
                    self.tt.resize(self.options.hash());
                }
            }
            Some("Clear") => {
                if tokens.next() != Some("Hash") {
                    return;
                }
                self.tt.clear();
            }
            _ => (),
        }
    }
}

/// Parses a move in long algebraic notation against the legal moves of
/// `board`.
///
/// Returns [`None`] if the text cannot be parsed or names no legal move:
/// matching against the generated legal move list is both the parse and the
/// legality check.
fn parse_move(board: &mut Board, text: &str) -> Option<Move> {
    let start: Square = text.get(0..2)?.parse().ok()?;
    let end: Square = text.get(2..4)?.parse().ok()?;
    let promotion = match text.len() {
        4 => None,
        5 => Some(PieceType::try_from(text.chars().next_back()?).ok()?),
        _ => return None,
    };

    board
        .legal_moves()
        .iter()
        .find(|mv| {
            mv.start() == start
                && mv.end() == end
                && promotion.map_or(!mv.is_promotion(), |p| mv.promotion_piece() == p)
        })
        .copied()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::parse_move;
    use crate::board::Board;

    #[test]
    fn moves_parse_against_the_legal_list() {
        let mut board = Board::default();

        let mv = parse_move(&mut board, "e2e4").expect("e2e4 is legal");
        assert_eq!(mv.to_string(), "e2e4");
        assert!(mv.is_double_pawn_push());

        // illegal, malformed and junk moves all fail cleanly
        assert!(parse_move(&mut board, "e2e5").is_none());
        assert!(parse_move(&mut board, "e9e4").is_none());
        assert!(parse_move(&mut board, "castles").is_none());

        // promotions need their piece letter
        let mut board: Board = "8/5P1k/8/8/8/8/8/K7 w - - 0 1"
            .parse()
            .expect("test FEN is valid");
        let promo = parse_move(&mut board, "f7f8q").expect("promotion is legal");
        assert!(promo.is_promotion());
        assert!(parse_move(&mut board, "f7f8").is_none());
    }

    #[test]
    fn castling_parses_as_the_king_step() {
        let mut board: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"
            .parse()
            .expect("test FEN is valid");

        let castle = parse_move(&mut board, "e1g1").expect("castling is legal");
        assert!(castle.is_castling());
    }
}
