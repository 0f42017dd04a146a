#![cfg(test)]

use lazy_static::lazy_static;

use crate::{board::Board, perft::perft};

/// A position with a known perft result.
#[derive(Clone, Copy)]
struct TestPosition<'a> {
    /// The FEN of the position.
    position: &'a str,
    /// The depth to run perft to.
    perft_depth: u8,
    /// The expected node count.
    perft_result: u64,
}

lazy_static! {
    /// Test positions used to check the correctness of movegen/make/unmake.
    ///
    /// The counts are the well-known reference values; between them these
    /// positions exercise en passant (including the pinned kind), castling,
    /// promotion, checks, double checks and checkmates.
    static ref TEST_POSITIONS: Vec<TestPosition<'static>> = vec![
        // startpos, every depth the spec pins down
        TestPosition::new("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -", 1, 20),
        TestPosition::new("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -", 2, 400),
        TestPosition::new("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -", 3, 8_902),
        TestPosition::new("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -", 4, 197_281),
        TestPosition::new(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
            5,
            4_865_609,
        ),
        // kiwipete
        TestPosition::new(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
            1,
            48,
        ),
        TestPosition::new(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
            2,
            2_039,
        ),
        TestPosition::new(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
            3,
            97_862,
        ),
        // tests ep which would be a discovered attack on own king
        TestPosition::new("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -", 5, 674_624),
        // promotion-heavy
        TestPosition::new(
            "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -",
            4,
            422_333,
        ),
        // tests enemy knight taking own rook, disallowing castling
        TestPosition::new(
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ -",
            3,
            62_379,
        ),
        // a quiet symmetrical middlegame
        TestPosition::new(
            "r4rk1/1pp1qppp/p1np1n2/2b1p1b1/2B1P1B1/P1NP1N2/1PP1QPPP/R4RK1 w - -",
            3,
            89_890,
        ),
    ];
}

impl<'a> TestPosition<'a> {
    const fn new(position: &'a str, perft_depth: u8, perft_result: u64) -> Self {
        Self {
            position,
            perft_depth,
            perft_result,
        }
    }
}

impl TestPosition<'_> {
    fn run_test(&self) {
        let mut board: Board = self.position.parse().expect("test FEN is valid");
        println!("Position: {}", self.position);
        assert_eq!(
            perft::<false, false>(&mut board, self.perft_depth),
            self.perft_result,
        );
    }
}

#[test]
fn perft_suite() {
    for test_position in TEST_POSITIONS.iter() {
        test_position.run_test();
    }
}
