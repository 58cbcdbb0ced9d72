//! Move path enumeration for verifying move generation against published
//! node counts. Every promotion piece is generated so totals match the
//! standard tables.

use crate::chess_board::{Board, Color, Coordinate, Move, Position};
use crate::config::PromotionPolicy;
use crate::game::rules;

const PROMOTIONS: PromotionPolicy = PromotionPolicy::AllowChoice;

pub fn perft(position: &Position, depth: u8) -> u64 {
    count_nodes(&position.board, position.side_to_move, position.en_passant, depth)
}

/// Node count below each legal root move, sorted by move text. Depth 0 has
/// no root moves to split on.
pub fn divide(position: &Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let side = position.side_to_move;
    let mut result: Vec<(Move, u64)> =
        rules::legal_moves(&position.board, side, position.en_passant, PROMOTIONS.choices())
            .into_iter()
            .map(|mv| {
                let mut board = position.board.clone();
                let effect = board.make_move(mv, position.en_passant);
                let nodes = count_nodes(&board, side.opposite(), effect.double_step_target, depth - 1);
                (mv, nodes)
            })
            .collect();
    result.sort_by_key(|(mv, _)| mv.as_algebraic());
    result
}

fn count_nodes(board: &Board, side: Color, en_passant: Option<Coordinate>, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = rules::legal_moves(board, side, en_passant, PROMOTIONS.choices());
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut node_count = 0u64;
    for mv in moves {
        let mut new_board = board.clone();
        let effect = new_board.make_move(mv, en_passant);
        node_count += count_nodes(&new_board, side.opposite(), effect.double_step_target, depth - 1);
    }
    node_count
}
