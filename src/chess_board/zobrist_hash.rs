use super::{Board, Color, Coordinate, PieceKind};
use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::sync::Arc;

const BOARD_SIZE: usize = 8;

pub struct ZobristHash {
    piece_keys: [[[u64; BOARD_SIZE * BOARD_SIZE]; 6]; 2],
    side_to_move_key: u64,
    castling_keys: [u64; 4],
    en_passant_keys: [u64; BOARD_SIZE],
}

impl ZobristHash {
    fn new(seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);

        let mut piece_keys = [[[0; BOARD_SIZE * BOARD_SIZE]; 6]; 2];
        for color_keys in &mut piece_keys {
            for piece_type_keys in color_keys {
                for square_key in piece_type_keys {
                    *square_key = rng.gen();
                }
            }
        }

        let side_to_move_key = rng.gen();

        let mut castling_keys = [0; 4];
        for key in &mut castling_keys {
            *key = rng.gen();
        }

        let mut en_passant_keys = [0; BOARD_SIZE];
        for file in &mut en_passant_keys {
            *file = rng.gen();
        }

        ZobristHash {
            piece_keys,
            side_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }

    /// Key over placement, side to move, castling rights and en passant file.
    pub fn calculate_hash(&self, board: &Board, side_to_move: Color, en_passant: Option<Coordinate>) -> u64 {
        let mut hash = 0;

        for piece in board.pieces() {
            let piece_index = match piece.kind {
                PieceKind::Pawn => 0,
                PieceKind::Knight => 1,
                PieceKind::Bishop => 2,
                PieceKind::Rook => 3,
                PieceKind::Queen => 4,
                PieceKind::King => 5,
            };
            hash ^= self.piece_keys[piece.color.index()][piece_index][piece.position().index()];
        }

        if side_to_move == Color::Black {
            hash ^= self.side_to_move_key;
        }

        for (i, castling) in board.castling_rights().iter().enumerate() {
            if *castling {
                hash ^= self.castling_keys[i];
            }
        }

        if let Some(en_passant) = en_passant {
            hash ^= self.en_passant_keys[en_passant.file() as usize - 1];
        }

        hash
    }
}

lazy_static! {
    pub static ref ZOBRIST: Arc<ZobristHash> = Arc::new(ZobristHash::new(42));
}
