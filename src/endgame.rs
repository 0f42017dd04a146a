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

use crate::{
    board::Board,
    defs::{Piece, PieceType, Side, Square},
    evaluation::{Eval, DRAW},
};

/// The most pieces (kings included) the oracle will look at.
const MAX_ORACLE_PIECES: usize = 5;

/// The base score of a recognised won configuration; the approximate
/// distance to mate is subtracted from it.
///
/// Well above the 8000 a won oracle score must reach, well below
/// [`MATE_BOUND`](crate::evaluation::MATE_BOUND) so the search can never
/// mistake it for a proven mate.
const ORACLE_WIN: Eval = 8500;

/// The approximate mating distance with a queen, in plies.
const QUEEN_MATE_PLIES: Eval = 10;
/// The approximate mating distance with a rook, in plies.
const ROOK_MATE_PLIES: Eval = 16;

/// The score of a king-and-pawn ending the pawn wins.
const PAWN_WIN: Eval = 8200;

/// Short-circuits the evaluation of trivial material configurations.
///
/// Returns a score from White's perspective for the configurations it
/// recognises and [`None`] for everything else. With few pieces on the
/// board a full positional evaluation is mostly noise: these endings are
/// decided by material alone (or, for KPvK, by a deliberately rough
/// rank-of-pawn rule — king positions are not consulted, and the search
/// papers over the gaps).
pub fn probe(board: &Board) -> Option<Eval> {
    if board.piece_count() > MAX_ORACLE_PIECES {
        return None;
    }

    let mut counts = [[0_u8; PieceType::TOTAL]; Side::TOTAL];
    let mut pawn_square = Square::NONE;
    for index in 0..Square::TOTAL as u8 {
        let square = Square(index);
        let piece = board.piece_on(square);
        if piece == Piece::NONE {
            continue;
        }
        counts[Side::from(piece).to_index()][PieceType::from(piece).to_index()] += 1;
        if PieceType::from(piece) == PieceType::PAWN {
            pawn_square = square;
        }
    }

    let white_extras = non_king_count(&counts[Side::WHITE.to_index()]);
    let black_extras = non_king_count(&counts[Side::BLACK.to_index()]);

    // bare kings
    if white_extras == 0 && black_extras == 0 {
        return Some(DRAW);
    }

    // only one side may have material, and only a single piece of it
    let (strong, extras) = if black_extras == 0 {
        (Side::WHITE, white_extras)
    } else if white_extras == 0 {
        (Side::BLACK, black_extras)
    } else {
        return None;
    };
    if extras != 1 {
        return None;
    }

    let strong_counts = &counts[strong.to_index()];
    let sign = if strong == Side::WHITE { 1 } else { -1 };

    if strong_counts[PieceType::KNIGHT.to_index()] == 1
        || strong_counts[PieceType::BISHOP.to_index()] == 1
    {
        // a lone minor cannot mate
        return Some(DRAW);
    }
    if strong_counts[PieceType::QUEEN.to_index()] == 1 {
        return Some(sign * (ORACLE_WIN - QUEEN_MATE_PLIES));
    }
    if strong_counts[PieceType::ROOK.to_index()] == 1 {
        return Some(sign * (ORACLE_WIN - ROOK_MATE_PLIES));
    }

    // KPvK: a win once the pawn has reached its own fourth rank
    if strong_counts[PieceType::PAWN.to_index()] == 1 {
        return if pawn_square.relative_rank(strong) >= 3 {
            Some(sign * PAWN_WIN)
        } else {
            Some(DRAW)
        };
    }

    None
}

/// Counts everything but the king in one side's tally.
fn non_king_count(counts: &[u8; PieceType::TOTAL]) -> u8 {
    counts
        .iter()
        .take(PieceType::KING.to_index())
        .sum()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::probe;
    use crate::board::Board;

    fn probe_fen(fen: &str) -> Option<i32> {
        probe(&fen.parse::<Board>().expect("test FEN is valid"))
    }

    #[test]
    fn bare_kings_are_drawn() {
        assert_eq!(probe_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1"), Some(0));
    }

    #[test]
    fn a_lone_minor_is_insufficient() {
        assert_eq!(probe_fen("4k3/8/8/8/8/8/8/3NK3 w - - 0 1"), Some(0));
        assert_eq!(probe_fen("4kb2/8/8/8/8/8/8/4K3 w - - 0 1"), Some(0));
    }

    #[test]
    fn heavy_pieces_win() {
        let queen = probe_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("KQvK is recognised");
        let rook = probe_fen("4k3/8/8/8/8/8/8/3RK3 w - - 0 1").expect("KRvK is recognised");
        assert!(queen >= 8000);
        assert!(rook >= 8000);
        // the queen mates faster, so it scores higher
        assert!(queen > rook);

        // and the sign follows the strong side
        let black_queen =
            probe_fen("3qk3/8/8/8/8/8/8/4K3 w - - 0 1").expect("KQvK is recognised");
        assert_eq!(black_queen, -queen);
    }

    #[test]
    fn pawn_endings_follow_the_rank_rule() {
        // an unadvanced pawn reads as a draw no matter where the kings are
        assert_eq!(probe_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"), Some(0));
        // its own fourth rank is the threshold
        let on_fourth = probe_fen("4k3/8/8/8/4P3/8/8/4K3 w - - 0 1").expect("KPvK is recognised");
        assert!(on_fourth >= 8000);
        // same rule mirrored for Black: e5 is Black's fourth rank
        let black_pawn =
            probe_fen("4k3/8/8/4p3/8/8/8/4K3 w - - 0 1").expect("KPvK is recognised");
        assert!(black_pawn <= -8000);
        let black_unadvanced = probe_fen("4k3/4p3/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(black_unadvanced, Some(0));
    }

    #[test]
    fn unrecognised_configurations_fall_through() {
        // KQvKR is not trivial
        assert_eq!(probe_fen("3rk3/8/8/8/8/8/8/3QK3 w - - 0 1"), None);
        // too many pieces
        assert_eq!(
            probe_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            None
        );
        // two pawns is not the single-pawn ending
        assert_eq!(probe_fen("4k3/8/8/8/4PP2/8/8/4K3 w - - 0 1"), None);
    }
}
