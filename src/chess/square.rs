use super::error::ChessError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A board square as an index 0-63, `row * 8 + col`.
///
/// Row 0 is rank 8 (the top of a FEN string), col 0 is file a.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Square(u8);

impl Square {
    pub fn new(index: u8) -> Result<Self, ChessError> {
        if index > 63 {
            return Err(ChessError::InvalidSquare(format!(
                "Index must be 0-63, got {}",
                index
            )));
        }
        Ok(Self(index))
    }

    /// Create a square without validation (for internal use when bounds are guaranteed)
    pub const fn new_unchecked(index: u8) -> Self {
        Self(index)
    }

    /// Square at `row`, `col`; `None` if either is off the board.
    pub fn from_coords(row: i8, col: i8) -> Option<Self> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Self((row * 8 + col) as u8))
        } else {
            None
        }
    }

    pub const fn at(row: u8, col: u8) -> Self {
        Self(row * 8 + col)
    }

    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn row(&self) -> u8 {
        self.0 / 8
    }

    pub const fn col(&self) -> u8 {
        self.0 % 8
    }

    /// Square shifted by a row/col delta, clipped to the board
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::from_coords(self.row() as i8 + d_row, self.col() as i8 + d_col)
    }

    /// File letter, 'a'-'h'
    pub fn file_char(&self) -> char {
        (self.col() + b'a') as char
    }

    /// Rank digit, '1'-'8'
    pub fn rank_char(&self) -> char {
        (b'8' - self.row()) as char
    }

    /// Create a square from file and rank characters
    pub fn from_chars(file: char, rank: char) -> Result<Self, ChessError> {
        let file_lower = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file_lower) {
            return Err(ChessError::InvalidSquare(format!(
                "Invalid file '{}'. Must be a-h.",
                file
            )));
        }
        if !('1'..='8').contains(&rank) {
            return Err(ChessError::InvalidSquare(format!(
                "Invalid rank '{}'. Must be 1-8.",
                rank
            )));
        }

        let col = file_lower as u8 - b'a';
        let row = b'8' - rank as u8;
        Ok(Self::at(row, col))
    }

    /// All 64 squares in FEN order (a8 first, h1 last)
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => Self::from_chars(file, rank),
            _ => Err(ChessError::InvalidSquare(format!(
                "Square must be exactly 2 characters (e.g., 'e4'), got '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<u8> for Square {
    type Error = ChessError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::new(index)
    }
}

impl From<Square> for u8 {
    fn from(square: Square) -> u8 {
        square.0
    }
}
