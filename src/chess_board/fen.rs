use super::board::{square, CASTLING_SIDES};
use super::{Board, Color, Coordinate, PieceKind};
use crate::error::{FenError, FenResult};
use crate::game::Game;

pub const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const CASTLING_CHARS: [char; 4] = ['K', 'Q', 'k', 'q'];

/// Everything a FEN record describes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub board: Board,
    pub side_to_move: Color,
    pub en_passant: Option<Coordinate>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            board: Board::standard(),
            side_to_move: Color::White,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

/// Parses a FEN record. `has_moved` flags are derived: kings and corner
/// rooks are unmoved exactly when a matching castling right is listed, pawns
/// are unmoved on their starting rank.
pub fn import_position(fen: &str) -> FenResult<Position> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() != 6 {
        return Err(FenError::FieldCount { found: parts.len() });
    }

    let board = parse_placement(parts[0], parts[2])?;

    let side_to_move = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::ActiveColor(other.to_string())),
    };
    if board.is_in_check(side_to_move.opposite()) {
        return Err(FenError::OpponentInCheck);
    }

    let en_passant = match parts[3] {
        "-" => None,
        field => {
            let target = Coordinate::from_algebraic(field).map_err(|_| FenError::EnPassant(field.to_string()))?;
            if !is_en_passant_target(&board, side_to_move, target) {
                return Err(FenError::EnPassant(field.to_string()));
            }
            Some(target)
        }
    };

    let halfmove_clock = parse_counter("halfmove clock", parts[4])?;
    let fullmove_number = parse_counter("fullmove number", parts[5])?;

    Ok(Position {
        board,
        side_to_move,
        en_passant,
        halfmove_clock,
        fullmove_number,
    })
}

/// The opponent's pawn must just have double-stepped over `target`: it stands
/// one rank past the target, and the target and the square behind it are empty.
fn is_en_passant_target(board: &Board, side_to_move: Color, target: Coordinate) -> bool {
    let passer = side_to_move.opposite();
    let skipped_rank = (passer.pawn_rank() as i8 + passer.forward()) as u8;
    if target.rank() != skipped_rank || !board.is_empty_at(target) {
        return false;
    }
    let origin_empty = (target - (0, passer.forward())).is_ok_and(|origin| board.is_empty_at(origin));
    let passed_pawn = (target + (0, passer.forward()))
        .ok()
        .and_then(|at| board.get(at))
        .is_some_and(|p| p.kind == PieceKind::Pawn && p.color == passer);
    origin_empty && passed_pawn
}

fn parse_counter(field: &'static str, value: &str) -> FenResult<u32> {
    value.parse::<u32>().map_err(|_| FenError::Counter {
        field,
        value: value.to_string(),
    })
}

fn parse_placement(placement: &str, castling: &str) -> FenResult<Board> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(FenError::RankCount { found: rows.len() });
    }

    let mut board = Board::empty();
    for (row_index, row) in rows.iter().enumerate() {
        let rank = 8 - row_index as u8;
        let mut file = 1u8;

        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
            } else {
                let kind = PieceKind::from_char(c).ok_or(FenError::PieceChar(c))?;
                if file > 8 {
                    return Err(FenError::RankWidth { rank });
                }
                let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
                board.place(kind, color, square(file, rank));
                file += 1;
            }
            if file > 9 {
                return Err(FenError::RankWidth { rank });
            }
        }
        if file != 9 {
            return Err(FenError::RankWidth { rank });
        }
    }

    for (color, name) in [(Color::White, "white"), (Color::Black, "black")] {
        let found = board
            .pieces_of(color)
            .filter(|p| p.kind == PieceKind::King)
            .count();
        if found != 1 {
            return Err(FenError::KingCount { color: name, found });
        }
    }

    let rights = parse_castling(castling)?;
    apply_has_moved(&mut board, rights);
    Ok(board)
}

fn parse_castling(field: &str) -> FenResult<[bool; 4]> {
    let mut rights = [false; 4];
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        let index = CASTLING_CHARS
            .iter()
            .position(|&r| r == c)
            .ok_or_else(|| FenError::Castling(field.to_string()))?;
        if rights[index] {
            return Err(FenError::Castling(field.to_string()));
        }
        rights[index] = true;
    }
    Ok(rights)
}

fn apply_has_moved(board: &mut Board, rights: [bool; 4]) {
    let pieces: Vec<_> = board.pieces().copied().collect();
    for piece in pieces {
        let at = piece.position();
        let moved = match piece.kind {
            PieceKind::Pawn => at.rank() != piece.color.pawn_rank(),
            PieceKind::King => !CASTLING_SIDES
                .iter()
                .zip(rights)
                .any(|(&(color, _), right)| right && color == piece.color),
            PieceKind::Rook => !CASTLING_SIDES.iter().zip(rights).any(|(&(color, side), right)| {
                right && color == piece.color && at == square(side.rook_file(), color.back_rank())
            }),
            _ => false,
        };
        board.mark_moved(at, moved);
    }
}

/// Six-field FEN for a position.
pub fn to_fen(position: &Position) -> String {
    let mut board_representation = String::new();

    for rank in (1..=8).rev() {
        let mut empty_count = 0;

        for file in 1..=8 {
            match position.board.get(square(file, rank)) {
                Some(piece) => {
                    if empty_count > 0 {
                        board_representation.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    board_representation.push(piece.to_char());
                }
                None => {
                    empty_count += 1;
                }
            }
        }

        if empty_count > 0 {
            board_representation.push_str(&empty_count.to_string());
        }

        if rank > 1 {
            board_representation.push('/');
        }
    }

    let active_color = if position.side_to_move == Color::White { "w" } else { "b" };

    let mut castling: String = CASTLING_CHARS
        .iter()
        .zip(position.board.castling_rights())
        .filter(|(_, right)| *right)
        .map(|(c, _)| *c)
        .collect();
    if castling.is_empty() {
        castling = "-".to_string();
    }

    let en_passant_square = match position.en_passant {
        Some(square) => square.as_algebraic(),
        None => "-".to_string(),
    };

    format!(
        "{} {} {} {} {} {}",
        board_representation,
        active_color,
        castling,
        en_passant_square,
        position.halfmove_clock,
        position.fullmove_number
    )
}

/// FEN for the current state of a game. The halfmove clock is not tracked
/// and always reads 0.
pub fn export_position(game: &Game) -> String {
    to_fen(&game.position())
}
