use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::CoordinateError;

/// A square on the board. File and rank are both 1-based, so `a1` is (1, 1)
/// and `h8` is (8, 8).
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Coordinate {
    file: u8,
    rank: u8,
}

impl Coordinate {
    pub fn new(file: i8, rank: i8) -> Result<Self, CoordinateError> {
        if !(1..=8).contains(&file) || !(1..=8).contains(&rank) {
            return Err(CoordinateError::OutOfBounds { file, rank });
        }
        Ok(Self {
            file: file as u8,
            rank: rank as u8,
        })
    }

    /// Square for a packed index in 0..64, where a1 is 0 and h8 is 63.
    pub(crate) const fn from_index(index: usize) -> Self {
        debug_assert!(index < 64);
        Self {
            file: (index % 8) as u8 + 1,
            rank: (index / 8) as u8 + 1,
        }
    }

    pub(crate) const fn index(&self) -> usize {
        (self.rank as usize - 1) * 8 + (self.file as usize - 1)
    }

    /// All 64 squares, a1, b1, ... h8.
    pub fn all() -> impl Iterator<Item = Coordinate> {
        (0..64).map(Coordinate::from_index)
    }

    pub fn from_algebraic(algebraic: &str) -> Result<Self, CoordinateError> {
        let invalid = || CoordinateError::InvalidPosition {
            notation: algebraic.to_string(),
        };
        let mut chars = algebraic.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(invalid());
        }
        Ok(Self {
            file: file as u8 - b'a' + 1,
            rank: rank as u8 - b'1' + 1,
        })
    }

    pub fn as_algebraic(&self) -> String {
        format!("{}{}", (b'a' + self.file - 1) as char, self.rank)
    }

    pub fn file(&self) -> u8 {
        self.file
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Shift by (dx, dy), failing if the result leaves the board.
    pub fn offset(&self, dx: i8, dy: i8) -> Result<Self, CoordinateError> {
        let shift = |from: u8, by: i8| (from as i16 + by as i16).clamp(i8::MIN as i16, i8::MAX as i16) as i8;
        Self::new(shift(self.file, dx), shift(self.rank, dy))
    }
}

impl Add<(i8, i8)> for Coordinate {
    type Output = Result<Coordinate, CoordinateError>;

    fn add(self, (dx, dy): (i8, i8)) -> Self::Output {
        self.offset(dx, dy)
    }
}

impl Sub<(i8, i8)> for Coordinate {
    type Output = Result<Coordinate, CoordinateError>;

    fn sub(self, (dx, dy): (i8, i8)) -> Self::Output {
        self.offset(dx.saturating_neg(), dy.saturating_neg())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}
