use std::fmt;

use super::bitboards::LIGHT_SQUARES;
use super::piece::{Color, Type};
use super::position::Position;

/// Outcome of a position for the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoveRule,
    ThreefoldRepetition,
    InsufficientMaterial,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        !matches!(self, GameState::Ongoing)
    }

    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            GameState::Stalemate
                | GameState::FiftyMoveRule
                | GameState::ThreefoldRepetition
                | GameState::InsufficientMaterial
        )
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameState::Ongoing => write!(f, "ongoing"),
            GameState::Checkmate { winner } => write!(f, "checkmate, {:?} wins", winner),
            GameState::Stalemate => write!(f, "stalemate"),
            GameState::FiftyMoveRule => write!(f, "draw by fifty-move rule"),
            GameState::ThreefoldRepetition => write!(f, "draw by threefold repetition"),
            GameState::InsufficientMaterial => write!(f, "draw by insufficient material"),
        }
    }
}

impl Position {
    /// The current hash already occurred twice before
    pub fn is_threefold_repetition(&self) -> bool {
        self.hash_stack.iter().filter(|&&h| h == self.hash).count() >= 2
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock > 100
    }

    /// Neither side can possibly mate: bare kings, a single minor piece, or
    /// one bishop each on squares of the same color
    pub fn is_insufficient_material(&self) -> bool {
        let bb = &self.bitboards;
        let heavy_or_pawns = [Color::White, Color::Black].iter().any(|&c| {
            bb.pieces_of_type(c, Type::Pawn) | bb.pieces_of_type(c, Type::Rook) | bb.pieces_of_type(c, Type::Queen) != 0
        });
        if heavy_or_pawns {
            return false;
        }

        let knights = bb.pieces_of_type(Color::White, Type::Knight) | bb.pieces_of_type(Color::Black, Type::Knight);
        let white_bishops = bb.pieces_of_type(Color::White, Type::Bishop);
        let black_bishops = bb.pieces_of_type(Color::Black, Type::Bishop);
        let minors = knights.count_ones() + white_bishops.count_ones() + black_bishops.count_ones();

        if minors <= 1 {
            return true;
        }
        knights == 0
            && white_bishops.count_ones() == 1
            && black_bishops.count_ones() == 1
            && (white_bishops & LIGHT_SQUARES != 0) == (black_bishops & LIGHT_SQUARES != 0)
    }

    /// Any draw other than stalemate
    pub fn is_rule_draw(&self) -> bool {
        self.is_fifty_move_draw() || self.is_threefold_repetition() || self.is_insufficient_material()
    }

    /// Classify the position from the last generate call's output
    pub fn game_state(&self) -> GameState {
        if self.moves.is_empty() {
            return if self.king_checks > 0 {
                GameState::Checkmate {
                    winner: self.side_to_move.opposite(),
                }
            } else {
                GameState::Stalemate
            };
        }
        if self.is_fifty_move_draw() {
            GameState::FiftyMoveRule
        } else if self.is_threefold_repetition() {
            GameState::ThreefoldRepetition
        } else if self.is_insufficient_material() {
            GameState::InsufficientMaterial
        } else {
            GameState::Ongoing
        }
    }

    /// Generate (stopping at the first legal move) and classify
    pub fn evaluate_game_state(&mut self) -> GameState {
        self.generate_moves(true);
        self.game_state()
    }
}
