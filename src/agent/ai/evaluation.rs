// Position evaluation
// Absolute scores in centipawns: positive = good for White.
// Material and the tapered heatmap are maintained incrementally by make/undo
// through EvalState; pawn structure and mobility are computed at leaves.

use super::piece_square_tables::heatmap_value;
use crate::game_repr::{
    bishop_attacks, file_mask, popcount, rook_attacks, Bitboards, Color, Position, Squares, Type,
    ADJACENT_FILES, ALL_TYPES, KNIGHT_ATTACKS, PASSED_PAWN_MASKS, PAWN_ATTACKS,
};

/// Material values in centipawns, indexed by `Type::index` (K, Q, R, B, N, P)
pub const PIECE_VALUES: [i32; 6] = [0, 900, 500, 320, 300, 100];

/// Stage weight per piece kind. Starting material sums to `STAGE_MAX`.
const PHASE_WEIGHTS: [i32; 6] = [0, 4, 2, 1, 1, 0];
pub const STAGE_MAX: i32 = 24;

#[inline(always)]
pub fn piece_value(piece_type: Type) -> i32 {
    PIECE_VALUES[piece_type.index()]
}

/// Incrementally maintained evaluation accumulators
///
/// `mid`/`end` are the raw piece-square sums and `phase` the uncapped stage
/// weight; `stage` and `heatmap` are derived from them by [`EvalState::refresh`],
/// so an updated state is always equal to one built from scratch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalState {
    pub material: i32,
    pub heatmap: i32,
    /// Pawn structure + mobility, written at evaluated leaves
    pub other: i32,
    /// 24 = full opening material, 0 = bare kings and pawns
    pub stage: i32,
    mid: i32,
    end: i32,
    phase: i32,
}

impl EvalState {
    /// Build accumulators for a board from scratch
    pub fn from_bitboards(bitboards: &Bitboards) -> Self {
        let mut state = EvalState::default();
        for color in [Color::White, Color::Black] {
            for piece_type in ALL_TYPES {
                for square in Squares(bitboards.pieces_of_type(color, piece_type)) {
                    state.add_piece(color, piece_type, square);
                }
            }
        }
        state.refresh();
        state
    }

    /// Account for a piece appearing. Call [`EvalState::refresh`] once the
    /// whole move has been applied.
    #[inline]
    pub fn add_piece(&mut self, color: Color, piece_type: Type, square: usize) {
        let (mid, end) = heatmap_value(color, piece_type, square);
        self.material += color.sign() * piece_value(piece_type);
        self.mid += mid;
        self.end += end;
        self.phase += PHASE_WEIGHTS[piece_type.index()];
    }

    #[inline]
    pub fn remove_piece(&mut self, color: Color, piece_type: Type, square: usize) {
        let (mid, end) = heatmap_value(color, piece_type, square);
        self.material -= color.sign() * piece_value(piece_type);
        self.mid -= mid;
        self.end -= end;
        self.phase -= PHASE_WEIGHTS[piece_type.index()];
    }

    /// Recompute the stage-dependent terms
    #[inline]
    pub fn refresh(&mut self) {
        // Extra promoted pieces can push the raw phase past the opening value
        self.stage = self.phase.min(STAGE_MAX);
        self.heatmap = (self.mid * self.stage + self.end * (STAGE_MAX - self.stage)) / STAGE_MAX;
    }

    /// Material plus heatmap, the part of the score that needs no board scan
    #[inline(always)]
    pub fn incremental_score(&self) -> i32 {
        self.material + self.heatmap
    }
}

// Pawn structure weights (per pawn, White view)
const DOUBLED_PAWN_PENALTY: i32 = 12;
const ISOLATED_PAWN_PENALTY: i32 = 15;
const PROTECTED_PAWN_BONUS: i32 = 8;
/// Passed-pawn bonus by rank from the pawn's own side (rank 2 .. rank 7)
const PASSED_PAWN_BONUS: [i32; 8] = [0, 10, 15, 25, 40, 65, 100, 0];

// Mobility per reachable square
const KNIGHT_MOBILITY: i32 = 4;
const BISHOP_MOBILITY: i32 = 4;
const ROOK_MOBILITY: i32 = 2;

/// Pawn-structure score for one side, positive = good for that side
fn pawn_structure_for(color: Color, own: u64, enemy: u64) -> i32 {
    let mut score = 0;

    for square in Squares(own) {
        let file = square % 8;
        let file_pawns = own & file_mask(file);

        if popcount(file_pawns) > 1 {
            score -= DOUBLED_PAWN_PENALTY;
        }
        if own & ADJACENT_FILES[file] == 0 {
            score -= ISOLATED_PAWN_PENALTY;
        }
        if enemy & PASSED_PAWN_MASKS[color.index()][square] == 0 {
            let rank = match color {
                Color::White => square / 8,
                Color::Black => 7 - square / 8,
            };
            score += PASSED_PAWN_BONUS[rank];
        }
        // A friendly pawn defends this one when this square is in its attack
        // set, i.e. it stands on one of our own pawn-attacked-from squares
        if PAWN_ATTACKS[color.opposite().index()][square] & own != 0 {
            score += PROTECTED_PAWN_BONUS;
        }
    }

    score
}

/// White-positive pawn-structure score
pub fn pawn_structure(white_pawns: u64, black_pawns: u64) -> i32 {
    pawn_structure_for(Color::White, white_pawns, black_pawns)
        - pawn_structure_for(Color::Black, black_pawns, white_pawns)
}

/// White-positive mobility score over knights, bishops and rooks
pub fn mobility(bitboards: &Bitboards) -> i32 {
    let occupied = bitboards.all_occupied();
    let mut score = 0;

    for color in [Color::White, Color::Black] {
        let targets = !bitboards.occupied_by_color(color);
        let mut side = 0;

        for sq in Squares(bitboards.pieces_of_type(color, Type::Knight)) {
            side += KNIGHT_MOBILITY * popcount(KNIGHT_ATTACKS[sq] & targets) as i32;
        }
        for sq in Squares(bitboards.pieces_of_type(color, Type::Bishop)) {
            side += BISHOP_MOBILITY * popcount(bishop_attacks(sq, occupied) & targets) as i32;
        }
        for sq in Squares(bitboards.pieces_of_type(color, Type::Rook)) {
            side += ROOK_MOBILITY * popcount(rook_attacks(sq, occupied) & targets) as i32;
        }

        score += color.sign() * side;
    }

    score
}

/// Number of slots in the pawn-structure cache (prime)
const PAWN_TABLE_SIZE: usize = 16_381;

#[derive(Clone, Copy, Debug)]
struct PawnEntry {
    white: u64,
    black: u64,
    score: i32,
}

/// Small cache of pawn-structure scores keyed by the pawn skeleton
///
/// The slot index is the union of both pawn sets modulo a prime; an entry is
/// only used when both stored pawn sets match, so two skeletons with the same
/// union never share a score.
pub struct PawnTable {
    entries: Vec<Option<PawnEntry>>,
    pub hits: u64,
    pub misses: u64,
}

impl PawnTable {
    pub fn new() -> Self {
        Self {
            entries: vec![None; PAWN_TABLE_SIZE],
            hits: 0,
            misses: 0,
        }
    }

    /// Cached or freshly computed pawn-structure score
    pub fn score(&mut self, white_pawns: u64, black_pawns: u64) -> i32 {
        let idx = ((white_pawns | black_pawns) % PAWN_TABLE_SIZE as u64) as usize;
        if let Some(entry) = self.entries[idx] {
            if entry.white == white_pawns && entry.black == black_pawns {
                self.hits += 1;
                return entry.score;
            }
        }
        self.misses += 1;
        let score = pawn_structure(white_pawns, black_pawns);
        self.entries[idx] = Some(PawnEntry {
            white: white_pawns,
            black: black_pawns,
            score,
        });
        score
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|e| *e = None);
        self.hits = 0;
        self.misses = 0;
    }
}

impl Default for PawnTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Full static evaluation, positive = good for White
///
/// Stores the leaf-only part in `pos.eval.other`.
pub fn evaluate(pos: &mut Position, pawn_table: &mut PawnTable) -> i32 {
    let bitboards = pos.bitboards();
    let white_pawns = bitboards.pieces_of_type(Color::White, Type::Pawn);
    let black_pawns = bitboards.pieces_of_type(Color::Black, Type::Pawn);
    let other = pawn_table.score(white_pawns, black_pawns) + mobility(bitboards);

    pos.eval.other = other;
    pos.eval.incremental_score() + other
}

/// Negamax view: positive = good for the side to move
#[inline]
pub fn evaluate_relative(pos: &mut Position, pawn_table: &mut PawnTable) -> i32 {
    let side = pos.side_to_move().sign();
    side * evaluate(pos, pawn_table)
}
