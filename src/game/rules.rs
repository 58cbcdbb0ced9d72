//! Legality checks shared by `Game` and `perft`.

use crate::chess_board::{Board, Color, Coordinate, Move, PieceKind};

/// Plays `mv` on a snapshot and reports whether `side`'s king is safe after it.
pub fn leaves_king_safe(board: &Board, side: Color, mv: Move, en_passant: Option<Coordinate>) -> bool {
    let mut snapshot = board.snapshot();
    snapshot.make_move(mv, en_passant);
    !snapshot.is_in_check(side)
}

/// Pseudo-legal moves of `side` that do not expose its own king.
pub fn legal_moves(board: &Board, side: Color, en_passant: Option<Coordinate>, promotions: &[PieceKind]) -> Vec<Move> {
    board
        .generate_pseudo_moves(side, en_passant, promotions)
        .into_iter()
        .filter(|&mv| leaves_king_safe(board, side, mv, en_passant))
        .collect()
}

pub fn has_legal_move(board: &Board, side: Color, en_passant: Option<Coordinate>) -> bool {
    board
        .generate_pseudo_moves(side, en_passant, &[PieceKind::Queen])
        .into_iter()
        .any(|mv| leaves_king_safe(board, side, mv, en_passant))
}

/// Bare kings, or kings plus a single knight or bishop.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut minors = 0;
    for piece in board.pieces() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Knight | PieceKind::Bishop => minors += 1,
            _ => return false,
        }
    }
    minors <= 1
}
