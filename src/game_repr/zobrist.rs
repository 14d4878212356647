use std::collections::HashSet;

use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::bitboards::{Bitboards, Squares};
use super::piece::{Color, Type, ALL_TYPES};

/// Zobrist hashing constants for chess positions
///
/// Zobrist hashing uses random 64-bit numbers to represent each possible
/// piece-square combination, along with castling rights, en passant, and
/// side to move. This allows for efficient incremental hash updates.
pub struct ZobristKeys {
    /// [color][piece_type][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// One key per castling right, in WK, WQ, BK, BQ order
    pub castling: [u64; 4],
    /// Hashed only for the current en-passant target square
    pub en_passant: [u64; 64],
    /// XORed in while White is to move
    pub white_to_move: u64,
}

impl ZobristKeys {
    /// Generate Zobrist keys using a seeded random number generator
    /// This ensures the keys are random but reproducible
    fn generate() -> Self {
        let mut rng = StdRng::seed_from_u64(0x517cc1b727220a95);
        let mut seen = HashSet::new();
        let mut draw = || loop {
            let key: u64 = rng.gen();
            if key != 0 && key != u64::MAX && seen.insert(key) {
                return key;
            }
        };

        let mut pieces = [[[0u64; 64]; 6]; 2];
        for color in &mut pieces {
            for piece_type in color {
                for square in piece_type {
                    *square = draw();
                }
            }
        }

        let mut castling = [0u64; 4];
        for castle in &mut castling {
            *castle = draw();
        }

        let mut en_passant = [0u64; 64];
        for ep in &mut en_passant {
            *ep = draw();
        }

        Self {
            pieces,
            castling,
            en_passant,
            white_to_move: draw(),
        }
    }

    #[inline(always)]
    pub fn piece(&self, color: Color, piece_type: Type, square: usize) -> u64 {
        self.pieces[color.index()][piece_type.index()][square]
    }

    /// Key for an en-passant bitboard (zero or one bit set)
    #[inline(always)]
    pub fn en_passant_key(&self, ep_target: u64) -> u64 {
        if ep_target == 0 {
            0
        } else {
            self.en_passant[ep_target.trailing_zeros() as usize]
        }
    }

    /// Combined key of a set of castling rights
    #[inline]
    pub fn castling_key(&self, rights: &[bool; 4]) -> u64 {
        let mut key = 0u64;
        for (i, &right) in rights.iter().enumerate() {
            if right {
                key ^= self.castling[i];
            }
        }
        key
    }

    /// Hash of a full position from scratch
    pub fn hash_position(
        &self,
        bitboards: &Bitboards,
        side_to_move: Color,
        castling: &[bool; 4],
        ep_target: u64,
    ) -> u64 {
        let mut hash = 0u64;

        for color in [Color::White, Color::Black] {
            for piece_type in ALL_TYPES {
                for square in Squares(bitboards.pieces_of_type(color, piece_type)) {
                    hash ^= self.piece(color, piece_type, square);
                }
            }
        }

        hash ^= self.castling_key(castling);
        hash ^= self.en_passant_key(ep_target);

        if side_to_move == Color::White {
            hash ^= self.white_to_move;
        }

        hash
    }
}

/// Global Zobrist keys - initialized once on first use
pub static ZOBRIST: Lazy<ZobristKeys> = Lazy::new(ZobristKeys::generate);
