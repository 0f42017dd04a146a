use lazy_static::lazy_static;
use oorandom::Rand64;

use super::{Board, CastlingRights};
use crate::defs::{File, Piece, Side, Square};

/// The size of a position fingerprint.
pub type Key = u64;

/// A container for the fingerprint keys.
///
/// A position's fingerprint is the XOR of one key per piece-on-square, one
/// key per active castling right, one key for the en passant file (only when
/// an ep target exists) and one key if Black is to move. Incremental updates
/// toggle exactly the keys of the components that changed.
struct ZobristKeys {
    /// The keys for each of the pieces on each of the squares.
    pieces: [[Key; Piece::TOTAL]; Square::TOTAL],
    /// The castling rights keys. One for each combination for fast lookup.
    castling_rights: [Key; 16],
    /// The en passant keys, one per file.
    ep_files: [Key; File::TOTAL],
    /// The key for Black to move.
    side: Key,
}

lazy_static! {
    /// The program's fingerprint keys, generated once at engine construction.
    static ref ZOBRIST_KEYS: ZobristKeys = ZobristKeys::new();
}

impl ZobristKeys {
    /// The seed of the key generator.
    ///
    /// Fixed so that runs and tests are reproducible; arbitrary 8 bytes from
    /// /dev/random.
    const SEED: u128 = 0x7ae4_a52d_9c03_11b6_c815_1848_573b_e077;

    /// Generates new pseudo-random fingerprint keys.
    fn new() -> Self {
        let mut rng = Rand64::new(Self::SEED);
        let mut pieces = [[0; Piece::TOTAL]; Square::TOTAL];
        let mut castling_rights = [0; 16];
        let mut ep_files = [0; File::TOTAL];

        for square_keys in &mut pieces {
            for key in square_keys.iter_mut() {
                *key = rng.rand_u64();
            }
        }

        // index 0 is "no rights", which must contribute nothing
        for key in castling_rights.iter_mut().skip(1) {
            *key = rng.rand_u64();
        }

        for key in &mut ep_files {
            *key = rng.rand_u64();
        }

        Self {
            pieces,
            castling_rights,
            ep_files,
            side: rng.rand_u64(),
        }
    }

    /// Calculates the key of the given piece on the given square.
    fn piece_key(&self, square: Square, piece: Piece) -> Key {
        self.pieces[square.to_index()][piece.to_index()]
    }

    /// Calculates the key of the given castling rights.
    fn castling_rights_key(&self, rights: CastlingRights) -> Key {
        self.castling_rights[rights.0 as usize]
    }

    /// Calculates the key of the file of the given en passant square.
    fn ep_key(&self, square: Square) -> Key {
        self.ep_files[File::from(square).0 as usize]
    }

    /// Calculates the side to move key.
    const fn side_key(&self) -> Key {
        self.side
    }
}

impl Board {
    /// Recalculates the fingerprint of the current board from scratch.
    ///
    /// The incrementally maintained key must always equal this; the property
    /// tests assert it after every make and unmake.
    pub fn key_from_scratch(&self) -> Key {
        let mut key = 0;

        for index in 0..Square::TOTAL as u8 {
            let square = Square(index);
            let piece = self.piece_on(square);
            if piece != Piece::NONE {
                key ^= ZOBRIST_KEYS.piece_key(square, piece);
            }
        }
        key ^= ZOBRIST_KEYS.castling_rights_key(self.castling_rights());
        if self.ep_square() != Square::NONE {
            key ^= ZOBRIST_KEYS.ep_key(self.ep_square());
        }
        if self.side_to_move() == Side::BLACK {
            key ^= ZOBRIST_KEYS.side_key();
        }

        key
    }

    /// Replaces the stored fingerprint with the from-scratch recomputation.
    pub fn refresh_key(&mut self) {
        self.key = self.key_from_scratch();
    }

    /// Toggles the key of the given piece on the given square.
    pub(super) fn toggle_key_piece(&mut self, square: Square, piece: Piece) {
        debug_assert!(piece != Piece::NONE, "toggling the key of no piece");
        self.key ^= ZOBRIST_KEYS.piece_key(square, piece);
    }

    /// Toggles the keys of the given castling rights.
    pub(super) fn toggle_key_castling_rights(&mut self, rights: CastlingRights) {
        self.key ^= ZOBRIST_KEYS.castling_rights_key(rights);
    }

    /// Toggles the key of the given en passant square, if there is one.
    pub(super) fn toggle_key_ep_square(&mut self, square: Square) {
        if square != Square::NONE {
            self.key ^= ZOBRIST_KEYS.ep_key(square);
        }
    }

    /// Toggles the side to move key.
    pub(super) fn toggle_key_side(&mut self) {
        self.key ^= ZOBRIST_KEYS.side_key();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::board::Board;

    #[test]
    fn keys_are_reproducible() {
        let board = Board::default();
        let again = Board::default();
        assert_eq!(board.key(), again.key());
        assert_ne!(board.key(), 0);
    }

    #[test]
    fn components_all_contribute() {
        let base: Board = "4k3/8/8/8/8/8/8/4K3 w - - 0 1"
            .parse()
            .expect("test FEN is valid");
        let side: Board = "4k3/8/8/8/8/8/8/4K3 b - - 0 1"
            .parse()
            .expect("test FEN is valid");
        assert_ne!(base.key(), side.key());

        let castling: Board = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"
            .parse()
            .expect("test FEN is valid");
        let no_castling: Board = "r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1"
            .parse()
            .expect("test FEN is valid");
        assert_ne!(castling.key(), no_castling.key());

        let ep: Board = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1"
            .parse()
            .expect("test FEN is valid");
        let no_ep: Board = "4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1"
            .parse()
            .expect("test FEN is valid");
        assert_ne!(ep.key(), no_ep.key());
    }
}
