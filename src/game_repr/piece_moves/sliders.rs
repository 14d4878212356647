use super::GenContext;
use crate::game_repr::bitboards::{bishop_attacks, queen_attacks, rook_attacks, Bitboards, Squares};
use crate::game_repr::moves::{Move, MoveType};
use crate::game_repr::piece::Type;
use crate::game_repr::position::MoveBuffers;

/// Rook, bishop and queen moves through the magic tables
pub(crate) fn slider_moves(bitboards: &Bitboards, ctx: &GenContext, out: &mut MoveBuffers) {
    for piece_type in [Type::Queen, Type::Rook, Type::Bishop] {
        for from in Squares(bitboards.pieces_of_type(ctx.us, piece_type)) {
            let reach = match piece_type {
                Type::Rook => rook_attacks(from, ctx.occupied),
                Type::Bishop => bishop_attacks(from, ctx.occupied),
                _ => queen_attacks(from, ctx.occupied),
            };
            let targets = reach & !ctx.own & ctx.check_ray & ctx.pin_mask(from);

            for to in Squares(targets & ctx.enemy) {
                out.threat.push(Move::new(from, to, piece_type, MoveType::Capture));
            }
            for to in Squares(targets & !ctx.enemy) {
                out.quiet.push(Move::new(from, to, piece_type, MoveType::Quiet));
            }
        }
    }
}
