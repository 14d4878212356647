//! Error types for the engine
//!
//! Search cancellation is not an error: the recursion reports it through
//! `Option` and the driver falls back to the last completed iteration.

/// Errors raised while parsing a FEN string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// Fewer or more than the six standard fields
    #[error("expected 6 FEN fields, found {found}")]
    FieldCount { found: usize },

    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),

    /// A rank that does not describe exactly eight squares, or the wrong number of ranks
    #[error("malformed board layout: {message}")]
    BoardLayout { message: String },

    #[error("invalid side to move '{0}'")]
    InvalidSide(String),

    #[error("invalid castling character '{0}'")]
    InvalidCastling(char),

    #[error("invalid en passant square '{0}'")]
    InvalidEnPassant(String),

    #[error("invalid {field} counter '{value}'")]
    InvalidCounter { field: &'static str, value: String },

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: &'static str, count: u32 },
}

/// Errors raised while turning long algebraic text into a move
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveParseError {
    #[error("malformed move text '{0}'")]
    Malformed(String),

    /// Well-formed, but not among the legal moves of the position
    #[error("illegal move '{0}'")]
    Illegal(String),
}

/// Errors surfaced by the UCI front-end
#[derive(Debug, thiserror::Error)]
pub enum UciError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bad position: {0}")]
    Fen(#[from] FenError),

    #[error("bad move: {0}")]
    Move(#[from] MoveParseError),

    #[error("malformed command: {0}")]
    Command(String),
}

/// Result type alias for UCI operations
pub type UciResult<T> = Result<T, UciError>;
