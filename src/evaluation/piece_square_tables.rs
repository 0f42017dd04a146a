use super::Eval;
use crate::defs::{Piece, PieceType, Side, Square};

/// Piece-square tables, from the classic simplified evaluation function.
///
/// Written from White's point of view with rank 8 as the first row, the way
/// the tables are usually printed. [`piece_square_value`] flips the lookup
/// for White and mirrors it for Black.
#[rustfmt::skip]
static PAWN: [Eval; Square::TOTAL] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[allow(clippy::missing_docs_in_private_items)]
#[rustfmt::skip]
static KNIGHT: [Eval; Square::TOTAL] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[allow(clippy::missing_docs_in_private_items)]
#[rustfmt::skip]
static BISHOP: [Eval; Square::TOTAL] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[allow(clippy::missing_docs_in_private_items)]
#[rustfmt::skip]
static ROOK: [Eval; Square::TOTAL] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[allow(clippy::missing_docs_in_private_items)]
#[rustfmt::skip]
static QUEEN: [Eval; Square::TOTAL] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

/// The middlegame king table rewards a castled king tucked behind its pawns.
#[rustfmt::skip]
static KING_MIDDLEGAME: [Eval; Square::TOTAL] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

/// The endgame king table pulls the king towards the centre instead.
#[rustfmt::skip]
static KING_ENDGAME: [Eval; Square::TOTAL] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -50,-30,-30,-30,-30,-30,-50,-50,
];

/// Looks up the placement bonus of `piece` on `square`.
///
/// The returned value is unsigned with respect to colour: the caller adds it
/// for White and subtracts it for Black.
pub(super) fn piece_square_value(piece: Piece, square: Square, endgame: bool) -> Eval {
    let table = match PieceType::from(piece) {
        PieceType::PAWN => &PAWN,
        PieceType::KNIGHT => &KNIGHT,
        PieceType::BISHOP => &BISHOP,
        PieceType::ROOK => &ROOK,
        PieceType::QUEEN => &QUEEN,
        _ if endgame => &KING_ENDGAME,
        _ => &KING_MIDDLEGAME,
    };

    // the tables are printed with rank 8 on top, so a White lookup flips the
    // rank and a Black lookup reads the square as-is
    let index = if Side::from(piece) == Side::WHITE {
        square.flip_vertical()
    } else {
        square
    };

    table[index.to_index()]
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::piece_square_value;
    use crate::defs::{Piece, Square};

    #[test]
    fn tables_are_colour_mirrored() {
        // e2 for White reads the same entry as e7 for Black
        assert_eq!(
            piece_square_value(Piece::WPAWN, Square::E2, false),
            piece_square_value(Piece::BPAWN, Square::E7, false),
        );
        assert_eq!(
            piece_square_value(Piece::WKING, Square::G1, false),
            piece_square_value(Piece::BKING, Square::G8, false),
        );
    }

    #[test]
    fn king_tables_switch_with_the_phase() {
        // a castled corner king is good in the middlegame, bad in the endgame
        let middlegame = piece_square_value(Piece::WKING, Square::G1, false);
        let endgame = piece_square_value(Piece::WKING, Square::G1, true);
        assert!(middlegame > endgame);

        // a centralised king is the other way around
        let centre_mg = piece_square_value(Piece::WKING, Square::E4, false);
        let centre_eg = piece_square_value(Piece::WKING, Square::E4, true);
        assert!(centre_eg > centre_mg);
    }
}
