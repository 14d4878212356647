use super::{Color, Piece, Type, ALL_TYPES};

pub mod magic;
pub mod tables;
pub use magic::*;
pub use tables::*;

/// Bitboard representation: one u64 per (color, piece type) plus derived occupancy.
/// Each bit represents presence/absence of a piece on that square (0-63).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bitboards {
    /// `pieces[color][type]`, indexed by `Color::index` and `Type::index`
    pieces: [[u64; 6]; 2],
    /// Union of each side's piece sets, kept in sync on every update
    occupied: [u64; 2],
    all: u64,
}

impl Bitboards {
    /// Create empty bitboards
    pub fn empty() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupied: [0; 2],
            all: 0,
        }
    }

    /// Get bitboard for a specific piece type and color
    #[inline(always)]
    pub fn pieces_of_type(&self, color: Color, piece_type: Type) -> u64 {
        self.pieces[color.index()][piece_type.index()]
    }

    /// Get bitboard for all pieces of a color
    #[inline(always)]
    pub fn occupied_by_color(&self, color: Color) -> u64 {
        self.occupied[color.index()]
    }

    /// Get bitboard for all occupied squares
    #[inline(always)]
    pub fn all_occupied(&self) -> u64 {
        self.all
    }

    /// Kind of the `color` piece standing on `square`, if any
    #[inline]
    pub fn type_at(&self, color: Color, square: usize) -> Option<Type> {
        let bit = 1u64 << square;
        if self.occupied[color.index()] & bit == 0 {
            return None;
        }
        ALL_TYPES
            .into_iter()
            .find(|&t| self.pieces[color.index()][t.index()] & bit != 0)
    }

    /// Get the piece at a specific square (if any)
    pub fn piece_at(&self, square: usize) -> Option<Piece> {
        for color in [Color::White, Color::Black] {
            if let Some(piece_type) = self.type_at(color, square) {
                return Some(Piece { color, piece_type });
            }
        }
        None
    }

    /// Add a piece to a square
    #[inline]
    pub fn add_piece(&mut self, color: Color, piece_type: Type, square: usize) {
        let bit = 1u64 << square;
        self.pieces[color.index()][piece_type.index()] |= bit;
        self.occupied[color.index()] |= bit;
        self.all |= bit;
    }

    /// Remove a piece from a square
    #[inline]
    pub fn remove_piece(&mut self, color: Color, piece_type: Type, square: usize) {
        let bit = !(1u64 << square);
        self.pieces[color.index()][piece_type.index()] &= bit;
        self.occupied[color.index()] &= bit;
        self.all &= bit;
    }

    /// Update a piece position (move from one square to another)
    #[inline]
    pub fn move_piece(&mut self, color: Color, piece_type: Type, from: usize, to: usize) {
        self.remove_piece(color, piece_type, from);
        self.add_piece(color, piece_type, to);
    }

    /// True when the occupancy sets equal the union of their piece sets and no
    /// two piece sets overlap
    pub fn is_consistent(&self) -> bool {
        let mut union = [0u64; 2];
        for color in [Color::White, Color::Black] {
            let mut seen = 0u64;
            for t in ALL_TYPES {
                let bb = self.pieces[color.index()][t.index()];
                if seen & bb != 0 {
                    return false;
                }
                seen |= bb;
            }
            union[color.index()] = seen;
        }
        union == self.occupied
            && union[0] & union[1] == 0
            && self.all == union[0] | union[1]
    }
}

#[inline(always)]
pub fn set_bit(bb: &mut u64, square: usize) {
    *bb |= 1u64 << square;
}

#[inline(always)]
pub fn clear_bit(bb: &mut u64, square: usize) {
    *bb &= !(1u64 << square);
}

#[inline(always)]
pub fn test_bit(bb: u64, square: usize) -> bool {
    bb & (1u64 << square) != 0
}

/// Pop the least significant bit from a bitboard and return its index
#[inline(always)]
pub fn pop_lsb(bb: &mut u64) -> usize {
    let sq = bb.trailing_zeros() as usize;
    *bb &= *bb - 1; // Clear the LSB
    sq
}

/// Pop the most significant bit from a bitboard and return its index
#[inline(always)]
pub fn pop_msb(bb: &mut u64) -> usize {
    let sq = bitscan_reverse(*bb);
    *bb &= !(1u64 << sq);
    sq
}

/// Find the index of the most significant bit
#[inline(always)]
pub fn bitscan_reverse(bb: u64) -> usize {
    63 - bb.leading_zeros() as usize
}

/// Count the number of set bits in a bitboard
#[inline(always)]
pub fn popcount(bb: u64) -> u32 {
    bb.count_ones()
}

/// Iterator over the square indices of a bitboard, lowest first
pub struct Squares(pub u64);

impl Iterator for Squares {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(pop_lsb(&mut self.0))
        }
    }
}

// File and rank masks
pub const FILE_A: u64 = 0x0101010101010101;

pub const RANK_1: u64 = 0x00000000000000FF;
pub const RANK_8: u64 = 0xFF00000000000000;

/// Light squares (b1, d1, ... a2, c2, ...)
pub const LIGHT_SQUARES: u64 = 0x55AA55AA55AA55AA;

#[inline(always)]
pub const fn file_mask(file: usize) -> u64 {
    FILE_A << file
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bitboards() {
        let bb = Bitboards::empty();
        assert_eq!(bb.all_occupied(), 0);
        assert!(bb.is_consistent());
    }

    #[test]
    fn test_add_remove_keeps_occupancy() {
        let mut bb = Bitboards::empty();
        bb.add_piece(Color::White, Type::Pawn, 8);
        bb.add_piece(Color::White, Type::Knight, 16);
        bb.add_piece(Color::Black, Type::Pawn, 48);

        assert_eq!(bb.occupied_by_color(Color::White), (1u64 << 8) | (1u64 << 16));
        assert_eq!(bb.occupied_by_color(Color::Black), 1u64 << 48);
        assert_eq!(bb.type_at(Color::White, 16), Some(Type::Knight));
        assert_eq!(bb.type_at(Color::Black, 16), None);

        bb.move_piece(Color::White, Type::Knight, 16, 33);
        assert_eq!(bb.piece_at(33), Some(Piece::new(Color::White, Type::Knight)));
        assert_eq!(bb.piece_at(16), None);

        bb.remove_piece(Color::Black, Type::Pawn, 48);
        assert_eq!(bb.occupied_by_color(Color::Black), 0);
        assert!(bb.is_consistent());
    }

    #[test]
    fn test_bit_helpers() {
        let mut bb = 0u64;
        set_bit(&mut bb, 8);
        assert!(test_bit(bb, 8));
        clear_bit(&mut bb, 8);
        assert!(!test_bit(bb, 8));
    }

    #[test]
    fn test_pop_lsb_and_msb() {
        let mut bb = 0b1010u64;
        assert_eq!(pop_lsb(&mut bb), 1);
        assert_eq!(bb, 0b1000);
        assert_eq!(pop_lsb(&mut bb), 3);
        assert_eq!(bb, 0);

        let mut bb = (1u64 << 63) | (1u64 << 5);
        assert_eq!(pop_msb(&mut bb), 63);
        assert_eq!(pop_msb(&mut bb), 5);
        assert_eq!(bb, 0);
    }

    #[test]
    fn test_squares_iterator() {
        let squares: Vec<usize> = Squares(0b1001_0001).collect();
        assert_eq!(squares, vec![0, 4, 7]);
    }

    #[test]
    fn test_light_squares() {
        // a1 is dark, b1 and a2 are light
        assert!(!test_bit(LIGHT_SQUARES, 0));
        assert!(test_bit(LIGHT_SQUARES, 1));
        assert!(test_bit(LIGHT_SQUARES, 8));
        assert_eq!(popcount(LIGHT_SQUARES), 32);
    }
}
