mod game_state;
mod make_move;
mod moves;
mod perft;
mod piece;
mod piece_moves;
mod position;
pub mod bitboards;
pub mod zobrist;

#[cfg(test)]
mod tests;

pub use bitboards::*;
pub use game_state::*;
pub use moves::*;
pub use piece::*;
pub use piece_moves::{attackers_to, is_square_attacked};
pub use position::*;
