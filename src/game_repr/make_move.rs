use super::bitboards::CASTLE_SQUARES;
use super::moves::{Move, MoveType};
use super::piece::{Color, Type};
use super::position::{Position, BLACK_KINGSIDE, BLACK_QUEENSIDE, WHITE_KINGSIDE, WHITE_QUEENSIDE};
use super::zobrist::ZOBRIST;

/// Castling right lost when a piece leaves or lands on a corner
#[inline(always)]
fn corner_right(square: usize) -> Option<usize> {
    match square {
        0 => Some(WHITE_QUEENSIDE),
        7 => Some(WHITE_KINGSIDE),
        56 => Some(BLACK_QUEENSIDE),
        63 => Some(BLACK_KINGSIDE),
        _ => None,
    }
}

/// Castling right index for a castle move, by king destination
#[inline(always)]
fn castle_index(king_to: usize) -> usize {
    match king_to {
        6 => WHITE_KINGSIDE,
        2 => WHITE_QUEENSIDE,
        62 => BLACK_KINGSIDE,
        _ => BLACK_QUEENSIDE,
    }
}

impl Position {
    /// Place a piece, updating hash and accumulators
    #[inline]
    fn put_piece(&mut self, color: Color, piece_type: Type, square: usize) {
        self.bitboards.add_piece(color, piece_type, square);
        self.hash ^= ZOBRIST.piece(color, piece_type, square);
        self.eval.add_piece(color, piece_type, square);
    }

    #[inline]
    fn take_piece(&mut self, color: Color, piece_type: Type, square: usize) {
        self.bitboards.remove_piece(color, piece_type, square);
        self.hash ^= ZOBRIST.piece(color, piece_type, square);
        self.eval.remove_piece(color, piece_type, square);
    }

    /// Play a legal move. Every call must be paired with one [`Position::undo_move`].
    pub fn make_move(&mut self, mv: Move) {
        let us = self.side_to_move;
        let them = us.opposite();
        let from = mv.from();
        let to = mv.to();
        let piece = mv.piece();

        self.history_stack.push(self.snapshot());
        self.hash_stack.push(self.hash);

        let old_rights = ZOBRIST.castling_key(&self.castling);
        self.hash ^= ZOBRIST.en_passant_key(self.ep_target);
        self.ep_target = 0;

        let mut resets_clock = piece == Type::Pawn;

        match mv.move_type() {
            MoveType::Quiet => {}
            MoveType::Capture => {
                if let Some(victim) = self.bitboards.type_at(them, to) {
                    self.take_piece(them, victim, to);
                }
                resets_clock = true;
            }
            MoveType::EnPassant => {
                let captured = match us {
                    Color::White => to - 8,
                    Color::Black => to + 8,
                };
                self.take_piece(them, Type::Pawn, captured);
                resets_clock = true;
            }
            MoveType::Castle => {
                let (_, _, rook_from, rook_to) = CASTLE_SQUARES[castle_index(to)];
                self.take_piece(us, Type::Rook, rook_from);
                self.put_piece(us, Type::Rook, rook_to);
            }
        }

        self.take_piece(us, piece, from);
        match mv.promotion_type() {
            Some(promoted) => {
                self.put_piece(us, promoted, to);
                resets_clock = true;
            }
            None => self.put_piece(us, piece, to),
        }

        if piece == Type::King {
            match us {
                Color::White => {
                    self.castling[WHITE_KINGSIDE] = false;
                    self.castling[WHITE_QUEENSIDE] = false;
                }
                Color::Black => {
                    self.castling[BLACK_KINGSIDE] = false;
                    self.castling[BLACK_QUEENSIDE] = false;
                }
            }
        }
        // A rook leaving its corner, or anything captured there
        for square in [from, to] {
            if let Some(right) = corner_right(square) {
                self.castling[right] = false;
            }
        }
        self.hash ^= old_rights ^ ZOBRIST.castling_key(&self.castling);

        if piece == Type::Pawn && from.abs_diff(to) == 16 {
            self.ep_target = 1u64 << ((from + to) / 2);
            self.hash ^= ZOBRIST.en_passant_key(self.ep_target);
        }

        self.eval.refresh();

        self.halfmove_clock = if resets_clock {
            1
        } else {
            (self.halfmove_clock + 1).min(101)
        };
        if us == Color::Black {
            self.fullmove_number += 1;
        }
        self.ply += 1;

        self.side_to_move = them;
        self.hash ^= ZOBRIST.white_to_move;
        self.king_checks = 0;
        self.moves.clear();
    }

    /// Take back the last [`Position::make_move`]
    pub fn undo_move(&mut self) {
        if !self.pop_state() {
            return;
        }
        if self.side_to_move == Color::Black {
            self.fullmove_number -= 1;
        }
    }

    /// Pass the turn without moving. Pair with [`Position::undo_null_move`].
    pub fn make_null_move(&mut self) {
        self.history_stack.push(self.snapshot());
        self.hash_stack.push(self.hash);

        self.hash ^= ZOBRIST.en_passant_key(self.ep_target);
        self.ep_target = 0;

        self.side_to_move = self.side_to_move.opposite();
        self.hash ^= ZOBRIST.white_to_move;
        self.ply += 1;
        self.king_checks = 0;
        self.moves.clear();
    }

    pub fn undo_null_move(&mut self) {
        self.pop_state();
    }

    /// Restore the previous snapshot and hash and hand the turn back
    fn pop_state(&mut self) -> bool {
        let (Some(state), Some(hash)) = (self.history_stack.pop(), self.hash_stack.pop()) else {
            return false;
        };
        self.restore(state);
        self.hash = hash;
        self.ply -= 1;
        self.side_to_move = self.side_to_move.opposite();
        self.moves.clear();
        true
    }
}
