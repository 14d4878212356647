#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    King = 0,
    Queen = 1,
    Rook = 2,
    Bishop = 3,
    Knight = 4,
    Pawn = 5,
}

/// Every piece kind, in index order
pub const ALL_TYPES: [Type; 6] = [
    Type::King,
    Type::Queen,
    Type::Rook,
    Type::Bishop,
    Type::Knight,
    Type::Pawn,
];

impl Type {
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Type::index`]. Indices outside 0..6 map to `None`.
    pub fn from_index(idx: usize) -> Option<Type> {
        ALL_TYPES.get(idx).copied()
    }

    /// Lowercase letter used by FEN and long algebraic notation
    pub fn to_char(self) -> char {
        match self {
            Type::King => 'k',
            Type::Queen => 'q',
            Type::Rook => 'r',
            Type::Bishop => 'b',
            Type::Knight => 'n',
            Type::Pawn => 'p',
        }
    }

    pub fn from_char(c: char) -> Option<Type> {
        match c.to_ascii_lowercase() {
            'k' => Some(Type::King),
            'q' => Some(Type::Queen),
            'r' => Some(Type::Rook),
            'b' => Some(Type::Bishop),
            'n' => Some(Type::Knight),
            'p' => Some(Type::Pawn),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// +1 for White, -1 for Black. Evaluation is always stored from White's side.
    #[inline(always)]
    pub fn sign(self) -> i32 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub piece_type: Type,
}

impl Piece {
    pub fn new(color: Color, piece_type: Type) -> Self {
        Self { color, piece_type }
    }

    /// FEN letter: uppercase for White, lowercase for Black
    pub fn to_char(&self) -> char {
        let c = self.piece_type.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let piece_type = Type::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self { color, piece_type })
    }
}
