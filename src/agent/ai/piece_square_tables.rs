// Piece-square tables for the tapered positional term ("heatmap")
// All values in centipawns (100 = 1 pawn)
// Tables are from White's perspective, index = row * 8 + col with row 0 = rank 1.
// Black reads the same table through a rank reflection (sq ^ 56) and the
// contribution is negated, so the accumulated heatmap stays White-positive.

use crate::game_repr::{Color, Type};

#[rustfmt::skip]
const PAWN_MIDGAME: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      5,  10,  10, -20, -20,  10,  10,   5,
      5,  -5, -10,   5,   5, -10,  -5,   5,
      0,   0,  10,  25,  25,  10,   0,   0,
      5,   5,  15,  30,  30,  15,   5,   5,
     15,  20,  25,  35,  35,  25,  20,  15,
     60,  60,  60,  60,  60,  60,  60,  60,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const PAWN_ENDGAME: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
      5,   5,   5,   5,   5,   5,   5,   5,
     15,  15,  15,  15,  15,  15,  15,  15,
     30,  30,  30,  30,  30,  30,  30,  30,
     55,  55,  55,  55,  55,  55,  55,  55,
     90,  90,  90,  90,  90,  90,  90,  90,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_MIDGAME: [i32; 64] = [
    -50, -35, -30, -30, -30, -30, -35, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const KNIGHT_ENDGAME: [i32; 64] = [
    -40, -30, -20, -20, -20, -20, -30, -40,
    -30, -15,   0,   0,   0,   0, -15, -30,
    -20,   0,  10,  15,  15,  10,   0, -20,
    -20,   5,  15,  20,  20,  15,   5, -20,
    -20,   5,  15,  20,  20,  15,   5, -20,
    -20,   0,  10,  15,  15,  10,   0, -20,
    -30, -15,   0,   0,   0,   0, -15, -30,
    -40, -30, -20, -20, -20, -20, -30, -40,
];

#[rustfmt::skip]
const BISHOP_MIDGAME: [i32; 64] = [
    -20, -10, -12, -10, -10, -12, -10, -20,
    -10,  10,   0,   5,   5,   0,  10, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  15,  15,  10,   0, -10,
    -10,   5,   5,  15,  15,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const BISHOP_ENDGAME: [i32; 64] = [
    -15, -10, -10, -10, -10, -10, -10, -15,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -15, -10, -10, -10, -10, -10, -10, -15,
];

#[rustfmt::skip]
const ROOK_MIDGAME: [i32; 64] = [
      0,   0,   5,  10,  10,   5,   0,   0,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     -5,   0,   0,   0,   0,   0,   0,  -5,
     10,  15,  15,  15,  15,  15,  15,  10,
      0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const ROOK_ENDGAME: [i32; 64] = [
      0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
      5,   5,   5,   5,   5,   5,   5,   5,
      5,   5,   5,   5,   5,   5,   5,   5,
     10,  10,  10,  10,  10,  10,  10,  10,
      5,   5,   5,   5,   5,   5,   5,   5,
];

#[rustfmt::skip]
const QUEEN_MIDGAME: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -10,   5,   5,   5,   5,   5,   0, -10,
      0,   0,   5,   5,   5,   5,   0,  -5,
     -5,   0,   5,   5,   5,   5,   0,  -5,
    -10,   0,   5,   5,   5,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const QUEEN_ENDGAME: [i32; 64] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
     -5,   0,  10,  15,  15,  10,   0,  -5,
     -5,   0,  10,  15,  15,  10,   0,  -5,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

// King prefers shelter while material is on the board
#[rustfmt::skip]
const KING_MIDGAME: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

// and the centre once it has come off
#[rustfmt::skip]
const KING_ENDGAME: [i32; 64] = [
    -50, -30, -30, -30, -30, -30, -30, -50,
    -30, -30,   0,   0,   0,   0, -30, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  30,  40,  40,  30, -10, -30,
    -30, -10,  20,  30,  30,  20, -10, -30,
    -30, -20, -10,   0,   0, -10, -20, -30,
    -50, -40, -30, -20, -20, -30, -40, -50,
];

/// Indexed by `Type::index`
const MIDGAME_TABLES: [&[i32; 64]; 6] = [
    &KING_MIDGAME,
    &QUEEN_MIDGAME,
    &ROOK_MIDGAME,
    &BISHOP_MIDGAME,
    &KNIGHT_MIDGAME,
    &PAWN_MIDGAME,
];

const ENDGAME_TABLES: [&[i32; 64]; 6] = [
    &KING_ENDGAME,
    &QUEEN_ENDGAME,
    &ROOK_ENDGAME,
    &BISHOP_ENDGAME,
    &KNIGHT_ENDGAME,
    &PAWN_ENDGAME,
];

/// Square as seen from White's side of the board
#[inline(always)]
fn relative_square(color: Color, square: usize) -> usize {
    match color {
        Color::White => square,
        Color::Black => square ^ 56,
    }
}

/// Signed (midgame, endgame) contribution of a piece, positive for White
#[inline]
pub fn heatmap_value(color: Color, piece_type: Type, square: usize) -> (i32, i32) {
    let idx = relative_square(color, square);
    let sign = color.sign();
    (
        sign * MIDGAME_TABLES[piece_type.index()][idx],
        sign * ENDGAME_TABLES[piece_type.index()][idx],
    )
}
