//! Grid coordinates and the label codec (`"A1"` .. `"J10"`).
//!
//! A label is one column letter followed by a one or two digit row number.
//! Decoding is case-insensitive and tolerates a leading zero on the row;
//! encoding always yields the canonical form (uppercase letter, unpadded row).

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use crate::core::config::BOARD_SIZE;

/// Errors produced while decoding or bounds-checking a coordinate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinateError {
    /// Label too short or otherwise not `<letter><number>`.
    #[error("malformed coordinate label {0:?}")]
    Malformed(String),
    /// Column letter outside `A..=J`.
    #[error("column {0:?} is out of range")]
    ColumnOutOfRange(char),
    /// Row number outside `1..=10`.
    #[error("row {0} is out of range")]
    RowOutOfRange(usize),
    /// Row part is not a one or two digit number.
    #[error("row {0:?} is not a number")]
    InvalidRow(String),
    /// Index pair outside the board.
    #[error("coordinate (row {row}, column {column}) is outside the board")]
    OutOfBounds { row: usize, column: usize },
}

/// Zero-based `(row, column)` position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    row: usize,
    column: usize,
}

impl Coordinate {
    /// Build a coordinate without a bounds check.
    ///
    /// Placements built from raw indexes go through the fleet validator, which
    /// rejects anything off the board. Use [`Coordinate::checked`] elsewhere.
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Build a coordinate, failing when it lies outside the board.
    pub fn checked(row: usize, column: usize) -> Result<Self, CoordinateError> {
        let coord = Self::new(row, column);
        if coord.in_bounds() {
            Ok(coord)
        } else {
            Err(CoordinateError::OutOfBounds { row, column })
        }
    }

    pub const fn row(&self) -> usize {
        self.row
    }

    pub const fn column(&self) -> usize {
        self.column
    }

    /// True when both indexes are in `[0, BOARD_SIZE)`.
    pub const fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.column < BOARD_SIZE
    }

    /// Decode a label such as `"b7"` into `(6, 1)`.
    pub fn decode(label: &str) -> Result<Self, CoordinateError> {
        let mut chars = label.chars();
        let letter = match chars.next() {
            Some(c) if label.len() >= 2 => c,
            _ => return Err(CoordinateError::Malformed(label.to_string())),
        };
        if !letter.is_ascii_alphabetic() {
            return Err(CoordinateError::Malformed(label.to_string()));
        }
        let letter = letter.to_ascii_uppercase();
        let column = (letter as u8 - b'A') as usize;
        if column >= BOARD_SIZE {
            return Err(CoordinateError::ColumnOutOfRange(letter));
        }

        let digits = chars.as_str();
        if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoordinateError::InvalidRow(digits.to_string()));
        }
        let number: usize = digits
            .parse()
            .map_err(|_| CoordinateError::InvalidRow(digits.to_string()))?;
        if number == 0 || number > BOARD_SIZE {
            return Err(CoordinateError::RowOutOfRange(number));
        }
        Ok(Self::new(number - 1, column))
    }

    /// Canonical label for this coordinate.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.in_bounds() {
            return write!(f, "({}, {})", self.row, self.column);
        }
        let letter = (b'A' + self.column as u8) as char;
        write!(f, "{}{}", letter, self.row + 1)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}
