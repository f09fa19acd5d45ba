//! Board coordinates.

use crate::constants::{COLS, ROWS};
use crate::error::SquareParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A `(row, col)` cell. Row 0 is black's back rank, row 9 is red's.
///
/// Coordinates are signed so that candidate generation can step off the
/// board and be rejected by [`Square::is_valid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn offset(self, dr: i8, dc: i8) -> Self {
        Self::new(self.row + dr, self.col + dc)
    }

    pub fn is_valid(self) -> bool {
        (0..ROWS).contains(&self.row) && (0..COLS).contains(&self.col)
    }

    /// Every cell on the board, row by row.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..ROWS).flat_map(|row| (0..COLS).map(move |col| Square::new(row, col)))
    }

    /// Cells strictly between `self` and `other` on a shared rank or file.
    /// Empty when the two squares are not aligned.
    pub fn between(self, other: Square) -> impl Iterator<Item = Square> {
        let (range, along_rank) = if self.row == other.row {
            (self.col.min(other.col) + 1..self.col.max(other.col), true)
        } else if self.col == other.col {
            (self.row.min(other.row) + 1..self.row.max(other.row), false)
        } else {
            (0..0, true)
        };
        let (row, col) = (self.row, self.col);
        range.map(move |i| if along_rank { Square::new(row, i) } else { Square::new(i, col) })
    }
}

/// Algebraic notation: file `a..i` for columns 0..8, rank `9 - row`.
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "({}, {})", self.row, self.col);
        }
        write!(f, "{}{}", (b'a' + self.col as u8) as char, 9 - self.row)
    }
}

impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SquareParseError::Malformed(s.to_string());
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(malformed());
        };
        if !('a'..='i').contains(&file) {
            return Err(malformed());
        }
        let rank = rank.to_digit(10).ok_or_else(malformed)? as i8;
        Ok(Square::new(9 - rank, file as i8 - 'a' as i8))
    }
}
