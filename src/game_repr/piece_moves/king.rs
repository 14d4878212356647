use super::{attackers_to, GenContext};
use crate::game_repr::bitboards::{Bitboards, Squares, CASTLE_CLEARANCE, CASTLE_KING_PATH, CASTLE_SQUARES, KING_ATTACKS};
use crate::game_repr::moves::{Move, MoveType};
use crate::game_repr::piece::{Color, Type};
use crate::game_repr::position::MoveBuffers;

/// King steps onto squares the enemy does not attack. The king itself is
/// lifted off the board first so a slider's ray is not blocked by it.
pub(crate) fn king_moves(bitboards: &Bitboards, ctx: &GenContext, out: &mut MoveBuffers) {
    let without_king = ctx.occupied & !(1u64 << ctx.king);

    for to in Squares(KING_ATTACKS[ctx.king] & !ctx.own) {
        if attackers_to(bitboards, to, ctx.them, without_king) != 0 {
            continue;
        }
        if ctx.enemy & (1u64 << to) != 0 {
            out.threat.push(Move::new(ctx.king, to, Type::King, MoveType::Capture));
        } else {
            out.quiet.push(Move::new(ctx.king, to, Type::King, MoveType::Quiet));
        }
    }
}

/// Castling: right present, king and rook at home, the squares between them
/// empty, and the squares the king crosses not attacked. Never out of check.
pub(crate) fn castling_moves(bitboards: &Bitboards, ctx: &GenContext, rights: &[bool; 4], out: &mut MoveBuffers) {
    if ctx.checks > 0 {
        return;
    }

    let sides = match ctx.us {
        Color::White => [0, 1],
        Color::Black => [2, 3],
    };
    let rooks = bitboards.pieces_of_type(ctx.us, Type::Rook);

    for idx in sides {
        if !rights[idx] {
            continue;
        }
        let (king_from, king_to, rook_from, _) = CASTLE_SQUARES[idx];
        if ctx.king != king_from || rooks & (1u64 << rook_from) == 0 {
            continue;
        }
        if ctx.occupied & CASTLE_CLEARANCE[idx] != 0 {
            continue;
        }
        let path_attacked = CASTLE_KING_PATH[idx]
            .iter()
            .any(|&sq| attackers_to(bitboards, sq, ctx.them, ctx.occupied) != 0);
        if path_attacked {
            continue;
        }
        out.quiet.push(Move::new(king_from, king_to, Type::King, MoveType::Castle));
    }
}
