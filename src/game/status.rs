use std::fmt;

use crate::chess_board::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// Side to move has no legal move and is not in check
    Stalemate,
    /// Same position seen `repetition_limit` times
    Repetition,
    /// Neither side can mate: bare kings, or a single knight or bishop
    InsufficientMaterial,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::Stalemate => write!(f, "stalemate"),
            DrawReason::Repetition => write!(f, "repetition"),
            DrawReason::InsufficientMaterial => write!(f, "insufficient material"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    AwaitingMove(Color),
    Checkmate { winner: Color },
    Draw(DrawReason),
}

impl GameState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameState::AwaitingMove(_))
    }
}

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// Move committed, game continues
    ValidMove,
    /// Move committed and the opponent is now in check
    Check,
    /// Not a move the selected piece can make; nothing changed
    InvalidMove,
    /// Would leave the mover's own king attacked; nothing changed
    PutsKingInCheck,
    /// Move committed and the opponent is mated
    Checkmate,
    /// Move committed and the game is drawn
    Draw(DrawReason),
}

impl MoveStatus {
    /// Whether the request changed the game.
    pub fn is_applied(&self) -> bool {
        !matches!(self, MoveStatus::InvalidMove | MoveStatus::PutsKingInCheck)
    }
}
