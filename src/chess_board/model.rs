use std::fmt;

use super::Coordinate;
use crate::error::MoveParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank direction pawns of this color advance in.
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank holding this color's king and rooks at the start.
    pub fn back_rank(&self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 8,
        }
    }

    pub fn pawn_rank(&self) -> u8 {
        match self {
            Color::White => 2,
            Color::Black => 7,
        }
    }

    pub fn promotion_rank(&self) -> u8 {
        self.opposite().back_rank()
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

const PAWN_TEMPLATE: [(i8, i8); 3] = [(0, 1), (-1, 1), (1, 1)];
const KNIGHT_TEMPLATE: [(i8, i8); 8] = [(2, 1), (2, -1), (-2, 1), (-2, -1), (1, 2), (1, -2), (-1, 2), (-1, -2)];
const BISHOP_TEMPLATE: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];
const ROOK_TEMPLATE: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const ROYAL_TEMPLATE: [(i8, i8); 8] = [(0, 1), (0, -1), (1, 0), (-1, 0), (1, 1), (1, -1), (-1, 1), (-1, -1)];

impl PieceKind {
    /// Unit offsets for this kind, from White's point of view.
    pub fn movement_template(&self) -> &'static [(i8, i8)] {
        match self {
            PieceKind::Pawn => &PAWN_TEMPLATE,
            PieceKind::Knight => &KNIGHT_TEMPLATE,
            PieceKind::Bishop => &BISHOP_TEMPLATE,
            PieceKind::Rook => &ROOK_TEMPLATE,
            PieceKind::Queen | PieceKind::King => &ROYAL_TEMPLATE,
        }
    }

    /// Whether template offsets repeat until blocked.
    pub fn is_sliding(&self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceKind::Pawn => write!(f, "P"),
            PieceKind::Knight => write!(f, "N"),
            PieceKind::Bishop => write!(f, "B"),
            PieceKind::Rook => write!(f, "R"),
            PieceKind::Queen => write!(f, "Q"),
            PieceKind::King => write!(f, "K"),
        }
    }
}

/// A piece standing on the board. `position` always matches the square the
/// `Board` stores it under; only the board moves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub(crate) position: Coordinate,
    pub(crate) has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color, position: Coordinate) -> Self {
        Self {
            kind,
            color,
            position,
            has_moved: false,
        }
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Movement template with the pawn's forward direction mirrored for Black.
    pub fn offsets(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let forward = self.color.forward();
        let pawn = self.kind == PieceKind::Pawn;
        self.kind
            .movement_template()
            .iter()
            .map(move |&(dx, dy)| if pawn { (dx, dy * forward) } else { (dx, dy) })
    }

    /// Uppercase for White, lowercase for Black.
    pub fn to_char(&self) -> char {
        let c = self.kind.to_string().chars().next().unwrap_or('?');
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Move {
    pub from: Coordinate,
    pub to: Coordinate,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub fn new(from: Coordinate, to: Coordinate) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(mut self, promotion: PieceKind) -> Self {
        self.promotion = Some(promotion);
        self
    }

    pub fn as_algebraic(&self) -> String {
        let base_move = format!("{}{}", self.from, self.to);
        if let Some(promo) = self.promotion {
            base_move + &promo.to_string().to_lowercase()
        } else {
            base_move
        }
    }

    /// Parses "e2e4", "e2 e4" or "e7e8q".
    pub fn from_algebraic(algebraic: &str) -> Result<Self, MoveParseError> {
        let compact: String = algebraic.split_whitespace().collect();
        let malformed = || MoveParseError::Malformed {
            text: algebraic.to_string(),
        };
        let (Some(from), Some(to)) = (compact.get(0..2), compact.get(2..4)) else {
            return Err(malformed());
        };
        let from = Coordinate::from_algebraic(from)?;
        let to = Coordinate::from_algebraic(to)?;

        let mut rest = compact[4..].chars();
        let promotion = match (rest.next(), rest.next()) {
            (None, _) => None,
            (Some(c), None) => match PieceKind::from_char(c) {
                Some(kind @ (PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight)) => Some(kind),
                _ => return Err(MoveParseError::Promotion { piece: c }),
            },
            _ => return Err(malformed()),
        };
        Ok(Self { from, to, promotion })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoordinateError;

    fn sq(s: &str) -> Coordinate {
        Coordinate::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_piece_chars() {
        assert_eq!(Piece::new(PieceKind::Knight, Color::White, sq("b1")).to_char(), 'N');
        assert_eq!(Piece::new(PieceKind::Queen, Color::Black, sq("d8")).to_char(), 'q');
        assert_eq!(PieceKind::from_char('k'), Some(PieceKind::King));
        assert_eq!(PieceKind::from_char('x'), None);
    }

    #[test]
    fn test_sliding_flags() {
        assert!(PieceKind::Rook.is_sliding());
        assert!(PieceKind::Bishop.is_sliding());
        assert!(PieceKind::Queen.is_sliding());
        assert!(!PieceKind::Knight.is_sliding());
        assert!(!PieceKind::King.is_sliding());
        assert!(!PieceKind::Pawn.is_sliding());
    }

    #[test]
    fn test_pawn_template_mirrored_for_black() {
        let white = Piece::new(PieceKind::Pawn, Color::White, sq("e2"));
        let black = Piece::new(PieceKind::Pawn, Color::Black, sq("e7"));
        assert_eq!(white.offsets().collect::<Vec<_>>(), vec![(0, 1), (-1, 1), (1, 1)]);
        assert_eq!(black.offsets().collect::<Vec<_>>(), vec![(0, -1), (-1, -1), (1, -1)]);
    }

    #[test]
    fn test_move_text() {
        assert_eq!(Move::from_algebraic("e2e4").unwrap().as_algebraic(), "e2e4");
        assert_eq!(Move::from_algebraic("e2 e4").unwrap(), Move::new(sq("e2"), sq("e4")));
        assert_eq!(
            Move::from_algebraic("g7g8N").unwrap(),
            Move::new(sq("g7"), sq("g8")).with_promotion(PieceKind::Knight)
        );
        assert_eq!(Move::from_algebraic("g7g8n").unwrap().as_algebraic(), "g7g8n");
    }

    #[test]
    fn test_move_text_errors() {
        assert!(matches!(Move::from_algebraic("e2"), Err(MoveParseError::Malformed { .. })));
        assert!(matches!(Move::from_algebraic("e7e8qq"), Err(MoveParseError::Malformed { .. })));
        assert_eq!(Move::from_algebraic("e7e8k"), Err(MoveParseError::Promotion { piece: 'k' }));
        assert_eq!(
            Move::from_algebraic("z2e4"),
            Err(MoveParseError::Coordinate(CoordinateError::InvalidPosition {
                notation: "z2".to_string()
            }))
        );
    }
}
