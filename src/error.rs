//! Error types for the rules engine
//!
//! Only malformed input is an error. Rule outcomes such as an illegal
//! destination are reported through `MoveStatus`.

use thiserror::Error;

/// Errors raised while building a `Coordinate`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordinateError {
    /// File or rank left the 8x8 grid
    #[error("Coordinate out of bounds: file {file}, rank {rank} (must be 1-8)")]
    OutOfBounds { file: i8, rank: i8 },

    /// Notation is not a file letter a-h followed by a rank digit 1-8
    #[error("Invalid position received: {notation}")]
    InvalidPosition { notation: String },
}

/// Errors raised while parsing move text such as "e2e4" or "e7e8q"
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("Invalid move text: {text}")]
    Malformed { text: String },

    #[error("Invalid promotion piece: {piece}")]
    Promotion { piece: char },

    #[error(transparent)]
    Coordinate(#[from] CoordinateError),
}

/// Errors raised while importing a FEN record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("Invalid FEN string: must have 6 parts, found {found}")]
    FieldCount { found: usize },

    #[error("Invalid FEN string: expected 8 ranks, found {found}")]
    RankCount { found: usize },

    #[error("Invalid FEN string: rank {rank} does not describe 8 squares")]
    RankWidth { rank: u8 },

    #[error("Invalid piece character in FEN string: {0}")]
    PieceChar(char),

    #[error("Invalid FEN string: invalid active color {0}")]
    ActiveColor(String),

    #[error("Invalid FEN string: invalid castling field {0}")]
    Castling(String),

    #[error("Invalid FEN string: invalid en passant square {0}")]
    EnPassant(String),

    #[error("Invalid FEN string: {field} is not a valid number: {value}")]
    Counter { field: &'static str, value: String },

    #[error("Invalid FEN string: expected exactly one {color} king, found {found}")]
    KingCount { color: &'static str, found: usize },

    #[error("Invalid FEN string: the side not to move is in check")]
    OpponentInCheck,
}

/// Result type alias for FEN operations
pub type FenResult<T> = Result<T, FenError>;
