pub mod board;
pub mod coordinate;
pub mod fen;
pub mod model;
pub mod zobrist_hash;
pub use board::{Board, CastlingSide, MoveEffect};
pub use coordinate::Coordinate;
pub use fen::{export_position, import_position, Position, INITIAL_POSITION};
pub use model::{Color, Move, Piece, PieceKind};
pub use zobrist_hash::ZOBRIST;

mod move_generation;
#[cfg(test)]
pub mod test_utils;
