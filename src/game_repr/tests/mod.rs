use super::*;

// ==================== HELPER FUNCTIONS ====================

/// Parse a FEN that is known to be valid
pub fn position(fen: &str) -> Position {
    Position::from_fen(fen).unwrap_or_else(|e| panic!("bad test FEN {}: {}", fen, e))
}

/// Helper function to check if a move exists in the move list
pub fn has_move(moves: &[Move], from: usize, to: usize) -> bool {
    moves.iter().any(|m| m.from() == from && m.to() == to)
}

/// Helper function to count moves of a specific type
pub fn count_move_type(moves: &[Move], move_type: MoveType) -> usize {
    moves.iter().filter(|m| m.move_type() == move_type).count()
}

/// Legal moves starting on one square
pub fn moves_from(pos: &mut Position, square: usize) -> Vec<Move> {
    pos.legal_moves().into_iter().filter(|m| m.from() == square).collect()
}

/// Play a sequence of long-algebraic moves, panicking on any illegal one
pub fn play(pos: &mut Position, moves: &[&str]) {
    for text in moves {
        let mv = pos
            .parse_uci_move(text)
            .unwrap_or_else(|e| panic!("{} in {}: {}", text, pos.to_fen(), e));
        pos.make_move(mv);
    }
}

// ==================== TEST MODULES ====================

mod check_detection;
mod fen_parsing;
mod perft;
