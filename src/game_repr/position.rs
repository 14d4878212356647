use std::fmt;

use smallvec::SmallVec;

use super::bitboards::{test_bit, Bitboards};
use super::moves::{parse_square, square_name, Move};
use super::piece::{Color, Piece, Type};
use super::zobrist::ZOBRIST;
use crate::agent::ai::evaluation::EvalState;
use crate::error::{FenError, MoveParseError};

/*
 * MODULE IS RESPONSIBLE FOR
 * POSITION STATE AND FEN I/O
 */

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Deepest search ply tracked for killers and recursion
pub const MAX_PLY: usize = 128;

// Castling right indices
pub const WHITE_KINGSIDE: usize = 0;
pub const WHITE_QUEENSIDE: usize = 1;
pub const BLACK_KINGSIDE: usize = 2;
pub const BLACK_QUEENSIDE: usize = 3;

const CASTLING_CHARS: [char; 4] = ['K', 'Q', 'k', 'q'];

/// Generator output buffer
pub type MoveList = SmallVec<[Move; 256]>;

/// Legal moves of the side to move, split the way the search consumes them
#[derive(Clone, Debug, Default)]
pub struct MoveBuffers {
    /// Captures, en passant and promotions
    pub threat: MoveList,
    /// Quiet moves and castling
    pub quiet: MoveList,
}

impl MoveBuffers {
    pub fn clear(&mut self) {
        self.threat.clear();
        self.quiet.clear();
    }

    pub fn len(&self) -> usize {
        self.threat.len() + self.quiet.len()
    }

    pub fn is_empty(&self) -> bool {
        self.threat.is_empty() && self.quiet.is_empty()
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.threat.contains(&mv) || self.quiet.contains(&mv)
    }

    /// Threat moves first, then quiet moves
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.threat.iter().chain(self.quiet.iter())
    }
}

/// Everything make/undo needs to restore besides the hash
#[derive(Clone, Copy, Debug)]
pub(crate) struct PreviousState {
    pub(crate) bitboards: Bitboards,
    pub(crate) castling: [bool; 4],
    pub(crate) ep_target: u64,
    pub(crate) halfmove_clock: u32,
    pub(crate) king_checks: u8,
    pub(crate) eval: EvalState,
}

#[derive(Clone)]
pub struct Position {
    pub(crate) bitboards: Bitboards,
    pub(crate) side_to_move: Color,
    /// WK, WQ, BK, BQ
    pub(crate) castling: [bool; 4],
    /// Square a pawn would move to when capturing en passant, zero when none
    pub(crate) ep_target: u64,
    /// Halfmoves since the last capture or pawn move, plus one.
    /// A fifty-move draw is reached once it exceeds 100.
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) ply: usize,
    pub(crate) hash: u64,
    pub(crate) eval: EvalState,
    pub(crate) moves: MoveBuffers,
    pub(crate) history_stack: Vec<PreviousState>,
    pub(crate) hash_stack: Vec<u64>,
    pub(crate) killer_moves: [[Move; 2]; MAX_PLY],
    /// Number of pieces checking the side to move; valid after generation
    pub(crate) king_checks: u8,
}

impl Default for Position {
    fn default() -> Self {
        // The start position always parses
        match Self::from_fen(START_FEN) {
            Ok(pos) => pos,
            Err(_) => unreachable!("start position FEN is valid"),
        }
    }
}

impl Position {
    /// Parse a six-field FEN string
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::FieldCount { found: fields.len() });
        }

        let bitboards = parse_board(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSide(other.to_string())),
        };

        let mut castling = [false; 4];
        if fields[2] != "-" {
            for c in fields[2].chars() {
                let idx = CASTLING_CHARS
                    .iter()
                    .position(|&k| k == c)
                    .ok_or(FenError::InvalidCastling(c))?;
                castling[idx] = true;
            }
        }

        let ep_target = if fields[3] == "-" {
            0
        } else {
            let sq = parse_square(fields[3]).ok_or_else(|| FenError::InvalidEnPassant(fields[3].to_string()))?;
            // White to move captures onto rank 6, Black onto rank 3
            let expected_rank = match side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if sq / 8 != expected_rank {
                return Err(FenError::InvalidEnPassant(fields[3].to_string()));
            }
            1u64 << sq
        };

        // The clock is kept as FEN value + 1 and never exceeds 101
        let halfmove = fields[4]
            .parse::<u32>()
            .ok()
            .filter(|&h| h <= 100)
            .ok_or_else(|| FenError::InvalidCounter {
                field: "halfmove",
                value: fields[4].to_string(),
            })?;
        let fullmove: u32 = fields[5].parse().map_err(|_| FenError::InvalidCounter {
            field: "fullmove",
            value: fields[5].to_string(),
        })?;

        let hash = ZOBRIST.hash_position(&bitboards, side_to_move, &castling, ep_target);
        let eval = EvalState::from_bitboards(&bitboards);

        Ok(Position {
            bitboards,
            side_to_move,
            castling,
            ep_target,
            halfmove_clock: halfmove + 1,
            fullmove_number: fullmove.max(1),
            ply: 0,
            hash,
            eval,
            moves: MoveBuffers::default(),
            history_stack: Vec::with_capacity(MAX_PLY),
            hash_stack: Vec::with_capacity(MAX_PLY),
            killer_moves: [[Move::NULL; 2]; MAX_PLY],
            king_checks: 0,
        })
    }

    /// Replace this position with a parsed FEN. On error the position is left untouched.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), FenError> {
        *self = Position::from_fen(fen)?;
        Ok(())
    }

    /// Canonical FEN of the current state
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.bitboards.piece_at(rank * 8 + file) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push_str(match self.side_to_move {
            Color::White => " w ",
            Color::Black => " b ",
        });

        let rights: String = CASTLING_CHARS
            .iter()
            .zip(self.castling.iter())
            .filter_map(|(&c, &allowed)| allowed.then_some(c))
            .collect();
        fen.push_str(if rights.is_empty() { "-" } else { &rights });

        fen.push(' ');
        if self.ep_target == 0 {
            fen.push('-');
        } else {
            fen.push_str(&square_name(self.ep_target.trailing_zeros() as usize));
        }

        fen.push_str(&format!(
            " {} {}",
            self.halfmove_clock.saturating_sub(1),
            self.fullmove_number
        ));
        fen
    }

    /// Find the legal move written in long algebraic notation (`e2e4`, `e7e8q`)
    pub fn parse_uci_move(&mut self, text: &str) -> Result<Move, MoveParseError> {
        let malformed = || MoveParseError::Malformed(text.to_string());
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(malformed());
        }
        let from = parse_square(&text[0..2]).ok_or_else(malformed)?;
        let to = parse_square(&text[2..4]).ok_or_else(malformed)?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(c) => match Type::from_char(c) {
                Some(t @ (Type::Queen | Type::Rook | Type::Bishop | Type::Knight)) if c.is_ascii_lowercase() => Some(t),
                _ => return Err(malformed()),
            },
        };

        self.generate_moves(false);
        self.moves
            .iter()
            .copied()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion_type() == promotion)
            .ok_or_else(|| MoveParseError::Illegal(text.to_string()))
    }

    #[inline(always)]
    pub fn bitboards(&self) -> &Bitboards {
        &self.bitboards
    }

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> [bool; 4] {
        self.castling
    }

    pub fn ep_target(&self) -> u64 {
        self.ep_target
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn ply(&self) -> usize {
        self.ply
    }

    #[inline(always)]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn eval(&self) -> &EvalState {
        &self.eval
    }

    /// Checkers found by the last generate call
    pub fn king_checks(&self) -> u8 {
        self.king_checks
    }

    pub fn moves(&self) -> &MoveBuffers {
        &self.moves
    }

    /// Previous hashes, oldest first
    pub fn hash_history(&self) -> &[u64] {
        &self.hash_stack
    }

    pub fn piece_at(&self, square: usize) -> Option<Piece> {
        self.bitboards.piece_at(square)
    }

    pub fn king_square(&self, color: Color) -> usize {
        self.bitboards.pieces_of_type(color, Type::King).trailing_zeros() as usize
    }

    /// Zobrist hash recomputed from scratch
    pub fn compute_hash(&self) -> u64 {
        ZOBRIST.hash_position(&self.bitboards, self.side_to_move, &self.castling, self.ep_target)
    }

    /// Check the incrementally maintained state against a from-scratch rebuild
    pub fn is_consistent(&self) -> bool {
        let mut scratch = EvalState::from_bitboards(&self.bitboards);
        scratch.other = self.eval.other;
        self.bitboards.is_consistent()
            && self.bitboards.pieces_of_type(Color::White, Type::King).count_ones() == 1
            && self.bitboards.pieces_of_type(Color::Black, Type::King).count_ones() == 1
            && self.ep_target.count_ones() <= 1
            && self.hash == self.compute_hash()
            && self.eval == scratch
            && self.history_stack.len() == self.hash_stack.len()
    }

    pub fn killers(&self, ply: usize) -> [Move; 2] {
        self.killer_moves.get(ply).copied().unwrap_or([Move::NULL; 2])
    }

    /// Record a quiet move that caused a beta cutoff at `ply`
    pub fn store_killer(&mut self, ply: usize, mv: Move) {
        if let Some(slot) = self.killer_moves.get_mut(ply) {
            if slot[0] != mv {
                slot[1] = slot[0];
                slot[0] = mv;
            }
        }
    }

    pub fn clear_killers(&mut self) {
        self.killer_moves = [[Move::NULL; 2]; MAX_PLY];
    }

    /// Current state for the history stack
    pub(crate) fn snapshot(&self) -> PreviousState {
        PreviousState {
            bitboards: self.bitboards,
            castling: self.castling,
            ep_target: self.ep_target,
            halfmove_clock: self.halfmove_clock,
            king_checks: self.king_checks,
            eval: self.eval,
        }
    }

    pub(crate) fn restore(&mut self, state: PreviousState) {
        self.bitboards = state.bitboards;
        self.castling = state.castling;
        self.ep_target = state.ep_target;
        self.halfmove_clock = state.halfmove_clock;
        self.king_checks = state.king_checks;
        self.eval = state.eval;
    }
}

/// Parse the piece-placement field
fn parse_board(placement: &str) -> Result<Bitboards, FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::BoardLayout {
            message: format!("expected 8 ranks, found {}", ranks.len()),
        });
    }

    let mut bitboards = Bitboards::empty();
    for (i, rank_text) in ranks.iter().enumerate() {
        let rank = 7 - i;
        let mut file = 0usize;
        for c in rank_text.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(FenError::InvalidPiece(c));
                }
                file += skip as usize;
            } else {
                let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece(c))?;
                if file >= 8 {
                    return Err(FenError::BoardLayout {
                        message: format!("rank {} is longer than 8 squares", rank + 1),
                    });
                }
                bitboards.add_piece(piece.color, piece.piece_type, rank * 8 + file);
                file += 1;
            }
            if file > 8 {
                return Err(FenError::BoardLayout {
                    message: format!("rank {} is longer than 8 squares", rank + 1),
                });
            }
        }
        if file != 8 {
            return Err(FenError::BoardLayout {
                message: format!("rank {} has {} squares", rank + 1, file),
            });
        }
    }

    for (color, name) in [(Color::White, "white"), (Color::Black, "black")] {
        let count = bitboards.pieces_of_type(color, Type::King).count_ones();
        if count != 1 {
            return Err(FenError::KingCount { color: name, count });
        }
    }

    Ok(bitboards)
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = self.piece_at(rank * 8 + file).map_or('.', |p| p.to_char());
                write!(f, " {}", c)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")?;
        writeln!(f, "Fen: {}", self.to_fen())?;
        write!(f, "Key: {:016X}", self.hash)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.to_fen())
    }
}
