pub mod chess_board;
pub mod config;
pub mod error;
pub mod game;
pub mod perft;
pub mod play;

pub use chess_board::{Board, Color, Coordinate, Move, Piece, PieceKind};
pub use config::GameConfig;
pub use game::{DrawReason, Game, GameState, MoveStatus};
