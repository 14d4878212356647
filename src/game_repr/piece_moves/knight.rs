use super::GenContext;
use crate::game_repr::bitboards::{Bitboards, Squares, KNIGHT_ATTACKS};
use crate::game_repr::moves::{Move, MoveType};
use crate::game_repr::piece::Type;
use crate::game_repr::position::MoveBuffers;

/// A pinned knight can never stay on its pin line, so it has no moves
pub(crate) fn knight_moves(bitboards: &Bitboards, ctx: &GenContext, out: &mut MoveBuffers) {
    for from in Squares(bitboards.pieces_of_type(ctx.us, Type::Knight)) {
        if ctx.is_pinned(from) {
            continue;
        }
        let targets = KNIGHT_ATTACKS[from] & !ctx.own & ctx.check_ray;
        for to in Squares(targets & ctx.enemy) {
            out.threat.push(Move::new(from, to, Type::Knight, MoveType::Capture));
        }
        for to in Squares(targets & !ctx.enemy) {
            out.quiet.push(Move::new(from, to, Type::Knight, MoveType::Quiet));
        }
    }
}
