use std::fmt;
use std::hash::{Hash, Hasher};

use super::piece::Type;

/*-------ARCHITECTURE--------*/

// | 12 bits | 3 bits |  2 bits  | 3 bits | 6 bits | 6 bits |
// |  Score  | Promo  | MoveType | Piece  |   To   |  From  |
// |                     32 bits                            |
//
// Score is ordering metadata only: equality and hashing ignore it.

const TO_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const TYPE_SHIFT: u32 = 15;
const PROMO_SHIFT: u32 = 17;
const SCORE_SHIFT: u32 = 20;

const SQUARE_MASK: u32 = 0x3F;
const KEY_MASK: u32 = (1 << SCORE_SHIFT) - 1;
const SCORE_BIAS: i32 = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveType {
    Quiet = 0,
    Capture = 1,
    Castle = 2,
    EnPassant = 3,
}

impl MoveType {
    fn from_bits(bits: u32) -> MoveType {
        match bits & 0x3 {
            0 => MoveType::Quiet,
            1 => MoveType::Capture,
            2 => MoveType::Castle,
            _ => MoveType::EnPassant,
        }
    }
}

#[derive(Clone, Copy)]
pub struct Move {
    buf: u32,
}

impl Move {
    /// Sentinel stored in the transposition table when no best move is known
    pub const NULL: Move = Move { buf: 0 };

    pub fn new(from: usize, to: usize, piece: Type, move_type: MoveType) -> Move {
        let mut buf = 0u32;
        buf |= from as u32 & SQUARE_MASK;
        buf |= (to as u32 & SQUARE_MASK) << TO_SHIFT;
        buf |= (piece as u32) << PIECE_SHIFT;
        buf |= (move_type as u32) << TYPE_SHIFT;
        Self { buf }.with_score(0)
    }

    /// A pawn move onto the last rank. `promotion` must be Queen, Rook, Bishop or Knight.
    pub fn promotion(from: usize, to: usize, move_type: MoveType, promotion: Type) -> Move {
        let mv = Move::new(from, to, Type::Pawn, move_type);
        Move {
            buf: mv.buf | ((promotion as u32) << PROMO_SHIFT),
        }
    }

    #[inline(always)]
    pub fn from(&self) -> usize {
        (self.buf & SQUARE_MASK) as usize
    }

    #[inline(always)]
    pub fn to(&self) -> usize {
        ((self.buf >> TO_SHIFT) & SQUARE_MASK) as usize
    }

    #[inline(always)]
    pub fn piece(&self) -> Type {
        // Only valid kinds are ever written into the field
        Type::from_index(((self.buf >> PIECE_SHIFT) & 0x7) as usize).unwrap_or(Type::Pawn)
    }

    #[inline(always)]
    pub fn move_type(&self) -> MoveType {
        MoveType::from_bits(self.buf >> TYPE_SHIFT)
    }

    /// Promotion kind, if any
    #[inline(always)]
    pub fn promotion_type(&self) -> Option<Type> {
        match (self.buf >> PROMO_SHIFT) & 0x7 {
            0 => None,
            idx => Type::from_index(idx as usize),
        }
    }

    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        (self.buf >> PROMO_SHIFT) & 0x7 != 0
    }

    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        matches!(self.move_type(), MoveType::Capture | MoveType::EnPassant)
    }

    /// Neither a capture nor a promotion. Castling counts as quiet.
    #[inline(always)]
    pub fn is_quiet(&self) -> bool {
        !self.is_capture() && !self.is_promotion()
    }

    #[inline(always)]
    pub fn is_null(&self) -> bool {
        self.buf & KEY_MASK == 0
    }

    /// Copy of this move carrying an ordering score, clamped to [-2048, 2047]
    #[inline]
    pub fn with_score(self, score: i32) -> Move {
        let biased = (score.clamp(-SCORE_BIAS, SCORE_BIAS - 1) + SCORE_BIAS) as u32;
        Move {
            buf: (self.buf & KEY_MASK) | (biased << SCORE_SHIFT),
        }
    }

    #[inline(always)]
    pub fn score(&self) -> i32 {
        (self.buf >> SCORE_SHIFT) as i32 - SCORE_BIAS
    }

    /// Long algebraic notation, e.g. `e2e4`, `e7e8q`, `0000` for the null move
    pub fn to_uci(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.buf & KEY_MASK == other.buf & KEY_MASK
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.buf & KEY_MASK).hash(state);
    }
}

impl Default for Move {
    fn default() -> Self {
        Move::NULL
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Move({} {:?} {:?} score={})",
            self,
            self.piece(),
            self.move_type(),
            self.score()
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return write!(f, "0000");
        }
        write!(f, "{}{}", square_name(self.from()), square_name(self.to()))?;
        if let Some(promo) = self.promotion_type() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

/// `0` -> "a1", `63` -> "h8"
pub fn square_name(sq: usize) -> String {
    let file = (b'a' + (sq % 8) as u8) as char;
    let rank = (b'1' + (sq / 8) as u8) as char;
    format!("{}{}", file, rank)
}

/// "e4" -> Some(28)
pub fn parse_square(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].checked_sub(b'a')?;
    let rank = bytes[1].checked_sub(b'1')?;
    if file >= 8 || rank >= 8 {
        return None;
    }
    Some(rank as usize * 8 + file as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_fields() {
        let mv = Move::new(12, 28, Type::Pawn, MoveType::Quiet);
        assert_eq!(mv.from(), 12);
        assert_eq!(mv.to(), 28);
        assert_eq!(mv.piece(), Type::Pawn);
        assert_eq!(mv.move_type(), MoveType::Quiet);
        assert_eq!(mv.promotion_type(), None);
        assert_eq!(mv.to_uci(), "e2e4");
    }

    #[test]
    fn test_promotion_encoding() {
        let mv = Move::promotion(52, 61, MoveType::Capture, Type::Knight);
        assert!(mv.is_promotion());
        assert!(mv.is_capture());
        assert!(!mv.is_quiet());
        assert_eq!(mv.promotion_type(), Some(Type::Knight));
        assert_eq!(mv.to_uci(), "e7f8n");
    }

    #[test]
    fn test_score_is_stripped_from_equality() {
        let mv = Move::new(6, 21, Type::Knight, MoveType::Quiet);
        let scored = mv.with_score(-750);
        assert_eq!(scored.score(), -750);
        assert_eq!(mv, scored);
        assert_eq!(mv.with_score(5000).score(), 2047);
        assert_eq!(mv.with_score(-5000).score(), -2048);
    }

    #[test]
    fn test_null_move() {
        assert!(Move::NULL.is_null());
        assert!(Move::NULL.with_score(100).is_null());
        assert_eq!(Move::NULL.to_string(), "0000");
        assert!(!Move::new(0, 8, Type::Rook, MoveType::Quiet).is_null());
    }

    #[test]
    fn test_square_parsing() {
        assert_eq!(parse_square("a1"), Some(0));
        assert_eq!(parse_square("h8"), Some(63));
        assert_eq!(parse_square("e4"), Some(28));
        assert_eq!(parse_square("i1"), None);
        assert_eq!(parse_square("a9"), None);
        assert_eq!(parse_square("e"), None);
        assert_eq!(square_name(28), "e4");
    }
}
