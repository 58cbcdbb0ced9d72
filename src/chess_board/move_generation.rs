use super::board::{square, CastlingSide};
use super::{Board, Color, Coordinate, Move, Piece, PieceKind};

impl Board {
    /// Pseudo-legal moves for every piece of `color`. Moves that expose the
    /// mover's own king are still included.
    pub fn generate_pseudo_moves(
        &self,
        color: Color,
        en_passant: Option<Coordinate>,
        promotions: &[PieceKind],
    ) -> Vec<Move> {
        let mut all_moves = Vec::with_capacity(64);
        for piece in self.pieces_of(color) {
            all_moves.extend(self.generate_pseudo_moves_from(piece.position(), en_passant, promotions));
        }
        all_moves
    }

    pub fn generate_pseudo_moves_from(
        &self,
        from: Coordinate,
        en_passant: Option<Coordinate>,
        promotions: &[PieceKind],
    ) -> Vec<Move> {
        let Some(piece) = self.get(from) else {
            return Vec::new();
        };
        match piece.kind {
            PieceKind::Pawn => self.generate_pawn_moves(&piece, en_passant, promotions),
            PieceKind::King => {
                let mut moves = self.generate_stepping_moves(&piece);
                moves.extend(self.generate_castling_moves(&piece));
                moves
            }
            kind if kind.is_sliding() => self.generate_sliding_moves(&piece),
            _ => self.generate_stepping_moves(&piece),
        }
    }

    fn generate_pawn_moves(&self, pawn: &Piece, en_passant: Option<Coordinate>, promotions: &[PieceKind]) -> Vec<Move> {
        let mut moves = Vec::new();
        let from = pawn.position();
        let forward = pawn.color.forward();

        // Regular forward move, then the double step for an unmoved pawn
        if let Ok(one_forward) = from + (0, forward) {
            if self.is_empty_at(one_forward) {
                add_pawn_move(Move::new(from, one_forward), pawn.color, promotions, &mut moves);
                if !pawn.has_moved() {
                    if let Ok(two_forward) = one_forward + (0, forward) {
                        if self.is_empty_at(two_forward) {
                            moves.push(Move::new(from, two_forward));
                        }
                    }
                }
            }
        }

        // Capture diagonally, ordinary or en passant
        for dx in [-1, 1] {
            let Ok(to) = from + (dx, forward) else {
                continue;
            };
            match self.get(to) {
                Some(target) if target.color != pawn.color => {
                    add_pawn_move(Move::new(from, to), pawn.color, promotions, &mut moves);
                }
                None if Some(to) == en_passant && self.holds_passed_pawn(square(to.file(), from.rank()), pawn.color) => {
                    moves.push(Move::new(from, to));
                }
                _ => {}
            }
        }

        moves
    }

    fn holds_passed_pawn(&self, at: Coordinate, capturer: Color) -> bool {
        matches!(self.get(at), Some(p) if p.kind == PieceKind::Pawn && p.color != capturer)
    }

    /// Sliding pieces walk each direction until blocked; an enemy blocker is
    /// included as a capture, a friendly one is not.
    fn generate_sliding_moves(&self, piece: &Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        let from = piece.position();

        for (dx, dy) in piece.offsets() {
            let mut current = from;
            while let Ok(next) = current + (dx, dy) {
                match self.get(next) {
                    None => moves.push(Move::new(from, next)),
                    Some(blocker) => {
                        if blocker.color != piece.color {
                            moves.push(Move::new(from, next));
                        }
                        break;
                    }
                }
                current = next;
            }
        }

        moves
    }

    /// Knight and king steps: each offset once.
    fn generate_stepping_moves(&self, piece: &Piece) -> Vec<Move> {
        let from = piece.position();
        piece
            .offsets()
            .filter_map(|(dx, dy)| (from + (dx, dy)).ok())
            .filter(|&to| self.get(to).map_or(true, |occupant| occupant.color != piece.color))
            .map(|to| Move::new(from, to))
            .collect()
    }

    /// Castling needs an unmoved king and rook, empty squares between them and
    /// no attack on the king's start, transit or destination square.
    fn generate_castling_moves(&self, king: &Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        let rank = king.color.back_rank();
        if king.has_moved() || king.position() != square(5, rank) {
            return moves;
        }
        let opponent = king.color.opposite();

        for side in [CastlingSide::King, CastlingSide::Queen] {
            if !self.has_castling_right(king.color, side) {
                continue;
            }
            let rook_file = side.rook_file();
            let between = (rook_file.min(5) + 1)..rook_file.max(5);
            if !between.into_iter().all(|file| self.is_empty_at(square(file, rank))) {
                continue;
            }
            let king_path = [5, side.rook_destination_file(), side.king_destination_file()];
            if king_path
                .iter()
                .any(|&file| self.is_square_attacked_by_color(square(file, rank), opponent))
            {
                continue;
            }
            moves.push(Move::new(king.position(), square(side.king_destination_file(), rank)));
        }

        moves
    }

    /// Whether any piece of `attacker` could capture on `at`. Pawns attack
    /// their forward diagonals whether or not the square is occupied.
    pub fn is_square_attacked_by_color(&self, at: Coordinate, attacker: Color) -> bool {
        // Check for attacks by sliding pieces
        for &(dx, dy) in PieceKind::Queen.movement_template() {
            let is_diagonal = dx != 0 && dy != 0;
            let mut current = at;
            while let Ok(next) = current + (dx, dy) {
                if let Some(piece) = self.get(next) {
                    if piece.color == attacker {
                        match piece.kind {
                            PieceKind::Queen => return true,
                            PieceKind::Rook if !is_diagonal => return true,
                            PieceKind::Bishop if is_diagonal => return true,
                            _ => {}
                        }
                    }
                    break;
                }
                current = next;
            }
        }

        let behind = -attacker.forward();
        self.check_attack(at, attacker, PieceKind::Knight.movement_template(), PieceKind::Knight)
            || self.check_attack(at, attacker, PieceKind::King.movement_template(), PieceKind::King)
            || self.check_attack(at, attacker, &[(-1, behind), (1, behind)], PieceKind::Pawn)
    }

    fn check_attack(&self, at: Coordinate, attacker: Color, offsets: &[(i8, i8)], kind: PieceKind) -> bool {
        offsets
            .iter()
            .filter_map(|&offset| (at + offset).ok())
            .any(|from| matches!(self.get(from), Some(p) if p.color == attacker && p.kind == kind))
    }

    /// Whether the king of `color` is attacked.
    ///
    /// # Panics
    ///
    /// Panics when `color` has no king; the engine never removes one.
    pub fn is_in_check(&self, color: Color) -> bool {
        let Some(king) = self.king(color) else {
            panic!("no {color} king on the board");
        };
        self.is_square_attacked_by_color(king, color.opposite())
    }
}

fn add_pawn_move(mv: Move, color: Color, promotions: &[PieceKind], moves: &mut Vec<Move>) {
    if mv.to.rank() == color.promotion_rank() {
        moves.extend(promotions.iter().map(|&kind| mv.with_promotion(kind)));
    } else {
        moves.push(mv);
    }
}
