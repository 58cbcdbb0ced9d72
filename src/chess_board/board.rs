use super::{Color, Coordinate, Move, Piece, PieceKind};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Castling right order shared by FEN and hashing: K, Q, k, q.
pub const CASTLING_SIDES: [(Color, CastlingSide); 4] = [
    (Color::White, CastlingSide::King),
    (Color::White, CastlingSide::Queen),
    (Color::Black, CastlingSide::King),
    (Color::Black, CastlingSide::Queen),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingSide {
    King,
    Queen,
}

impl CastlingSide {
    pub fn rook_file(&self) -> u8 {
        match self {
            CastlingSide::King => 8,
            CastlingSide::Queen => 1,
        }
    }

    pub fn king_destination_file(&self) -> u8 {
        match self {
            CastlingSide::King => 7,
            CastlingSide::Queen => 3,
        }
    }

    pub fn rook_destination_file(&self) -> u8 {
        match self {
            CastlingSide::King => 6,
            CastlingSide::Queen => 4,
        }
    }
}

/// What a committed move did besides relocating the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveEffect {
    pub captured: Option<Piece>,
    pub en_passant_capture: bool,
    pub castling: Option<CastlingSide>,
    pub promotion: Option<PieceKind>,
    /// Square skipped by a pawn double step, if this move was one.
    pub double_step_target: Option<Coordinate>,
}

/// Every one of the 64 squares, each empty or holding one piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// Creates an empty chess board
    pub fn empty() -> Self {
        Self { squares: [None; 64] }
    }

    /// The standard 32-piece starting position.
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (file, kind) in (1..=8).zip(BACK_RANK) {
            for color in [Color::White, Color::Black] {
                board.place(kind, color, square(file, color.back_rank()));
                board.place(PieceKind::Pawn, color, square(file, color.pawn_rank()));
            }
        }
        board
    }

    /// Puts a fresh, unmoved piece on `at`, replacing any occupant.
    pub fn place(&mut self, kind: PieceKind, color: Color, at: Coordinate) {
        self.squares[at.index()] = Some(Piece::new(kind, color, at));
    }

    pub fn get(&self, at: Coordinate) -> Option<Piece> {
        self.squares[at.index()]
    }

    pub fn is_empty_at(&self, at: Coordinate) -> bool {
        self.squares[at.index()].is_none()
    }

    /// Stores `piece` on `at`. A piece still standing on its recorded square
    /// is lifted from there first, and its position is updated to `at`.
    /// Returns whatever occupied `at` before.
    pub fn set(&mut self, at: Coordinate, piece: Option<Piece>) -> Option<Piece> {
        let piece = piece.map(|mut p| {
            let origin = p.position.index();
            if self.squares[origin] == Some(p) {
                self.squares[origin] = None;
            }
            p.position = at;
            p
        });
        std::mem::replace(&mut self.squares[at.index()], piece)
    }

    /// Clears `from` and puts its piece on `to`. Returns the displaced
    /// occupant of `to`.
    pub fn move_piece(&mut self, from: Coordinate, to: Coordinate) -> Option<Piece> {
        let piece = self.squares[from.index()].take();
        self.set(to, piece)
    }

    /// Removes the piece on `at` from the board.
    pub fn capture(&mut self, at: Coordinate) -> Option<Piece> {
        self.squares[at.index()].take()
    }

    /// Independent copy for speculative evaluation.
    pub fn snapshot(&self) -> Board {
        self.clone()
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().flatten()
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.color == color)
    }

    pub fn king(&self, color: Color) -> Option<Coordinate> {
        self.pieces_of(color)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.position)
    }

    /// True when the king and the rook of `side` are unmoved on their home
    /// squares. Squares in between and attacks are not considered.
    pub fn has_castling_right(&self, color: Color, side: CastlingSide) -> bool {
        let rank = color.back_rank();
        let unmoved = |file: u8, kind: PieceKind| {
            matches!(self.get(square(file, rank)),
                Some(p) if p.kind == kind && p.color == color && !p.has_moved)
        };
        unmoved(5, PieceKind::King) && unmoved(side.rook_file(), PieceKind::Rook)
    }

    /// Rights in K, Q, k, q order.
    pub fn castling_rights(&self) -> [bool; 4] {
        CASTLING_SIDES.map(|(color, side)| self.has_castling_right(color, side))
    }

    pub(crate) fn mark_moved(&mut self, at: Coordinate, has_moved: bool) {
        if let Some(piece) = self.squares[at.index()].as_mut() {
            piece.has_moved = has_moved;
        }
    }

    /// Applies an already validated move: relocates the mover, removes the
    /// captured piece (the passed pawn for en passant), brings the rook
    /// along when castling and promotes a pawn reaching the last rank.
    pub fn make_move(&mut self, mv: Move, en_passant: Option<Coordinate>) -> MoveEffect {
        let mut effect = MoveEffect::default();
        let Some(piece) = self.get(mv.from) else {
            return effect;
        };

        if piece.kind == PieceKind::Pawn && Some(mv.to) == en_passant && mv.from.file() != mv.to.file() {
            // the passed pawn sits beside the mover, behind the landing square
            let passed = square(mv.to.file(), mv.from.rank());
            effect.captured = self.capture(passed);
            effect.en_passant_capture = effect.captured.is_some();
        }

        if let Some(displaced) = self.move_piece(mv.from, mv.to) {
            effect.captured = Some(displaced);
        }
        self.mark_moved(mv.to, true);

        match piece.kind {
            PieceKind::King if mv.from.file().abs_diff(mv.to.file()) == 2 => {
                let side = if mv.to.file() > mv.from.file() { CastlingSide::King } else { CastlingSide::Queen };
                let rank = mv.from.rank();
                let rook_to = square(side.rook_destination_file(), rank);
                self.move_piece(square(side.rook_file(), rank), rook_to);
                self.mark_moved(rook_to, true);
                effect.castling = Some(side);
            }
            PieceKind::Pawn if mv.to.rank() == piece.color.promotion_rank() => {
                let kind = mv.promotion.unwrap_or(PieceKind::Queen);
                self.squares[mv.to.index()] = Some(Piece {
                    kind,
                    has_moved: true,
                    ..piece.with_position(mv.to)
                });
                effect.promotion = Some(kind);
            }
            PieceKind::Pawn if mv.from.rank().abs_diff(mv.to.rank()) == 2 => {
                effect.double_step_target = Some(square(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2));
            }
            _ => {}
        }
        effect
    }

    /// Checks that every stored piece records the square it is stored under.
    pub fn is_consistent(&self) -> bool {
        self.squares
            .iter()
            .enumerate()
            .all(|(index, square)| square.map_or(true, |p| p.position.index() == index))
    }

    pub fn render_to_string(&self) -> String {
        let mut board_representation = String::new();
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");
        board_representation.push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

        for rank in (1..=8).rev() {
            board_representation.push_str(&format!("{} │", rank));
            for file in 1..=8 {
                let piece = self.get(square(file, rank)).map_or(' ', |p| p.to_char());
                board_representation.push_str(&format!(" {} │", piece));
            }
            board_representation.push_str(&format!(" {}\n", rank));

            if rank > 1 {
                board_representation.push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
            }
        }

        board_representation.push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");

        board_representation
    }
}

impl Piece {
    fn with_position(mut self, position: Coordinate) -> Self {
        self.position = position;
        self
    }
}

/// In-bounds square from known-good file and rank.
pub(crate) fn square(file: u8, rank: u8) -> Coordinate {
    Coordinate::from_index((rank as usize - 1) * 8 + (file as usize - 1))
}
