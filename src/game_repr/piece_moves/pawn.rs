use super::{behind, GenContext};
use crate::game_repr::bitboards::{
    bishop_attacks, rook_attacks, Bitboards, Squares, KNIGHT_ATTACKS, PAWN_ATTACKS, PAWN_DOUBLE_PATH, PAWN_PUSHES,
    RANK_1, RANK_8,
};
use crate::game_repr::moves::{Move, MoveType};
use crate::game_repr::piece::Type;
use crate::game_repr::position::MoveBuffers;

const PROMOTIONS: [Type; 4] = [Type::Queen, Type::Rook, Type::Knight, Type::Bishop];

/// Push a pawn move, expanding it into the four promotions on the last rank.
/// Promotions count as threats even when they capture nothing.
#[inline]
fn push_pawn_move(from: usize, to: usize, move_type: MoveType, out: &mut MoveBuffers) {
    if (1u64 << to) & (RANK_1 | RANK_8) != 0 {
        for promo in PROMOTIONS {
            out.threat.push(Move::promotion(from, to, move_type, promo));
        }
    } else if move_type == MoveType::Capture {
        out.threat.push(Move::new(from, to, Type::Pawn, move_type));
    } else {
        out.quiet.push(Move::new(from, to, Type::Pawn, move_type));
    }
}

pub(crate) fn pawn_moves(bitboards: &Bitboards, ctx: &GenContext, ep_target: u64, out: &mut MoveBuffers) {
    let us = ctx.us.index();

    for from in Squares(bitboards.pieces_of_type(ctx.us, Type::Pawn)) {
        let allowed = ctx.check_ray & ctx.pin_mask(from);

        let push = PAWN_PUSHES[us][from];
        if push & ctx.occupied == 0 {
            if push & allowed != 0 {
                push_pawn_move(from, push.trailing_zeros() as usize, MoveType::Quiet, out);
            }
            let path = PAWN_DOUBLE_PATH[us][from];
            if path != 0 && path & ctx.occupied == 0 {
                let double = path & !push;
                if double & allowed != 0 {
                    out.quiet.push(Move::new(from, double.trailing_zeros() as usize, Type::Pawn, MoveType::Quiet));
                }
            }
        }

        let attacks = PAWN_ATTACKS[us][from];
        for to in Squares(attacks & ctx.enemy & allowed) {
            push_pawn_move(from, to, MoveType::Capture, out);
        }

        if attacks & ep_target != 0 && en_passant_is_legal(bitboards, ctx, from, ep_target) {
            let to = ep_target.trailing_zeros() as usize;
            out.threat.push(Move::new(from, to, Type::Pawn, MoveType::EnPassant));
        }
    }
}

/// Replay the capture on the occupancy and check the king is not attacked
/// afterwards. This covers pins of the capturing pawn, a checking pawn being
/// captured, and the horizontal case where both pawns leave the king's rank.
fn en_passant_is_legal(bitboards: &Bitboards, ctx: &GenContext, from: usize, ep_target: u64) -> bool {
    let to = ep_target.trailing_zeros() as usize;
    let captured = 1u64 << behind(to, ctx.us);
    let occupied = (ctx.occupied ^ (1u64 << from) ^ captured) | ep_target;

    let them = ctx.them;
    let queens = bitboards.pieces_of_type(them, Type::Queen);
    let rooks = bitboards.pieces_of_type(them, Type::Rook) | queens;
    let bishops = bitboards.pieces_of_type(them, Type::Bishop) | queens;
    let pawns = bitboards.pieces_of_type(them, Type::Pawn) & !captured;

    let attackers = (rook_attacks(ctx.king, occupied) & rooks)
        | (bishop_attacks(ctx.king, occupied) & bishops)
        | (KNIGHT_ATTACKS[ctx.king] & bitboards.pieces_of_type(them, Type::Knight))
        | (PAWN_ATTACKS[ctx.us.index()][ctx.king] & pawns);

    attackers == 0
}
