//! Legal move generation
//!
//! Moves are produced directly as legal moves: the king never steps onto an
//! attacked square, other pieces are restricted to the check ray while in
//! check and to their pin line while pinned. En passant is validated by
//! replaying the capture on the occupancy.

mod king;
mod knight;
mod pawn;
mod sliders;

use super::bitboards::{
    bishop_attacks, is_positive_direction, popcount, rook_attacks, Bitboards, BETWEEN, DIRECTION_AXIS, KING_ATTACKS,
    KNIGHT_ATTACKS, PAWN_ATTACKS, PIN_LINES, RAYS,
};
use super::moves::Move;
use super::piece::{Color, Type};
use super::position::{MoveBuffers, Position};

/// Everything the per-piece generators need for one call
pub(crate) struct GenContext {
    pub(crate) us: Color,
    pub(crate) them: Color,
    pub(crate) king: usize,
    pub(crate) own: u64,
    pub(crate) enemy: u64,
    pub(crate) occupied: u64,
    /// Squares a non-king move may land on: all squares when not in check,
    /// else the checker plus the squares between it and the king
    pub(crate) check_ray: u64,
    /// Pieces pinned to the king, one set per pin axis
    pub(crate) pinned: [u64; 4],
    pub(crate) checks: u32,
    pub(crate) early_out: bool,
}

impl GenContext {
    /// Squares `square` may move to without breaking a pin
    #[inline(always)]
    pub(crate) fn pin_mask(&self, square: usize) -> u64 {
        let bit = 1u64 << square;
        for (axis, set) in self.pinned.iter().enumerate() {
            if set & bit != 0 {
                return PIN_LINES[axis][self.king];
            }
        }
        !0
    }

    #[inline(always)]
    pub(crate) fn is_pinned(&self, square: usize) -> bool {
        let bit = 1u64 << square;
        self.pinned.iter().any(|set| set & bit != 0)
    }

    /// True once early-out generation may stop
    #[inline(always)]
    pub(crate) fn done(&self, out: &MoveBuffers) -> bool {
        self.early_out && !out.is_empty()
    }
}

/// Pieces of `by` attacking `square`, with sliders blocked by `occupied`
#[inline]
pub fn attackers_to(bitboards: &Bitboards, square: usize, by: Color, occupied: u64) -> u64 {
    let queens = bitboards.pieces_of_type(by, Type::Queen);
    let rooks = bitboards.pieces_of_type(by, Type::Rook) | queens;
    let bishops = bitboards.pieces_of_type(by, Type::Bishop) | queens;

    (PAWN_ATTACKS[by.opposite().index()][square] & bitboards.pieces_of_type(by, Type::Pawn))
        | (KNIGHT_ATTACKS[square] & bitboards.pieces_of_type(by, Type::Knight))
        | (KING_ATTACKS[square] & bitboards.pieces_of_type(by, Type::King))
        | (rook_attacks(square, occupied) & rooks)
        | (bishop_attacks(square, occupied) & bishops)
}

#[inline]
pub fn is_square_attacked(bitboards: &Bitboards, square: usize, by: Color) -> bool {
    attackers_to(bitboards, square, by, bitboards.all_occupied()) != 0
}

/// Walk each ray out of the king and collect friendly pieces that are the
/// only blocker between the king and an enemy slider moving on that line
fn pinned_pieces(bitboards: &Bitboards, king: usize, us: Color) -> [u64; 4] {
    let them = us.opposite();
    let own = bitboards.occupied_by_color(us);
    let occupied = bitboards.all_occupied();
    let queens = bitboards.pieces_of_type(them, Type::Queen);
    let orthogonal = bitboards.pieces_of_type(them, Type::Rook) | queens;
    let diagonal = bitboards.pieces_of_type(them, Type::Bishop) | queens;

    let nearest = |set: u64, dir: usize| -> usize {
        if is_positive_direction(dir) {
            set.trailing_zeros() as usize
        } else {
            63 - set.leading_zeros() as usize
        }
    };

    let mut pinned = [0u64; 4];
    for dir in 0..8 {
        let blockers = RAYS[dir][king] & occupied;
        if blockers == 0 {
            continue;
        }
        let first = nearest(blockers, dir);
        if own & (1u64 << first) == 0 {
            continue;
        }
        let beyond = blockers & !(1u64 << first);
        if beyond == 0 {
            continue;
        }
        let second = 1u64 << nearest(beyond, dir);
        // Even directions are the orthogonal ones
        let sliders = if dir % 2 == 0 { orthogonal } else { diagonal };
        if second & sliders != 0 {
            pinned[DIRECTION_AXIS[dir]] |= 1u64 << first;
        }
    }
    pinned
}

impl Position {
    /// Fill the move buffers with every legal move of the side to move and set
    /// `king_checks`. With `early_out` generation stops after the first move.
    pub fn generate_moves(&mut self, early_out: bool) {
        let Position {
            bitboards,
            moves,
            side_to_move,
            castling,
            ep_target,
            king_checks,
            ..
        } = self;
        moves.clear();

        let us = *side_to_move;
        let them = us.opposite();
        let king = bitboards.pieces_of_type(us, Type::King).trailing_zeros() as usize;
        let occupied = bitboards.all_occupied();

        let checkers = attackers_to(bitboards, king, them, occupied);
        let checks = popcount(checkers);
        *king_checks = checks as u8;

        let mut check_ray = !0u64;
        if checks > 0 {
            check_ray = 0;
            let mut remaining = checkers;
            while remaining != 0 {
                let checker = remaining.trailing_zeros() as usize;
                remaining &= remaining - 1;
                check_ray |= (1u64 << checker) | BETWEEN[king][checker];
            }
        }

        let mut ctx = GenContext {
            us,
            them,
            king,
            own: bitboards.occupied_by_color(us),
            enemy: bitboards.occupied_by_color(them),
            occupied,
            check_ray,
            pinned: [0; 4],
            checks,
            early_out,
        };

        king::king_moves(bitboards, &ctx, moves);
        // Double check: only the king may move
        if checks >= 2 || ctx.done(moves) {
            return;
        }

        ctx.pinned = pinned_pieces(bitboards, king, us);

        pawn::pawn_moves(bitboards, &ctx, *ep_target, moves);
        if ctx.done(moves) {
            return;
        }
        knight::knight_moves(bitboards, &ctx, moves);
        if ctx.done(moves) {
            return;
        }
        sliders::slider_moves(bitboards, &ctx, moves);
        if ctx.done(moves) {
            return;
        }
        king::castling_moves(bitboards, &ctx, castling, moves);
    }

    /// All legal moves, threat moves first
    pub fn legal_moves(&mut self) -> Vec<Move> {
        self.generate_moves(false);
        self.moves.iter().copied().collect()
    }

    /// Whether the side to move is in check, without generating moves
    pub fn is_in_check(&self) -> bool {
        let us = self.side_to_move;
        is_square_attacked(&self.bitboards, self.king_square(us), us.opposite())
    }
}

/// Square one rank behind `square` from `color`'s point of view
#[inline(always)]
pub(crate) fn behind(square: usize, color: Color) -> usize {
    match color {
        Color::White => square - 8,
        Color::Black => square + 8,
    }
}
