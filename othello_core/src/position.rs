use std::fmt;

use serde::Serialize;

/// A 0-indexed (row, col) coordinate on a square board.
///
/// A position carries no board size of its own; operations that depend on
/// board bounds take the size explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Creates a new position.
    #[inline]
    pub fn new(row: usize, col: usize) -> Position {
        Position { row, col }
    }

    /// Offsets the position by one step in a compass direction, staying
    /// within a `size`-sized board.
    ///
    /// # Returns
    ///
    /// `Some(Position)` for the neighbouring cell, `None` when the step
    /// leaves the board.
    #[inline]
    pub fn offset(self, dr: isize, dc: isize, size: usize) -> Option<Position> {
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        (row < size && col < size).then_some(Position { row, col })
    }

    /// Parses `a1`-style notation (column letter, then 1-based row number)
    /// against a specific board size.
    pub fn parse(s: &str, size: usize) -> Result<Position, ParsePositionError> {
        let s = s.trim().to_lowercase();
        let mut chars = s.chars();
        let file = chars.next().ok_or(ParsePositionError)?;
        if !file.is_ascii_lowercase() {
            return Err(ParsePositionError);
        }
        let col = (file as u8 - b'a') as usize;
        let row = chars
            .as_str()
            .parse::<usize>()
            .map_err(|_| ParsePositionError)?
            .checked_sub(1)
            .ok_or(ParsePositionError)?;
        if row >= size || col >= size {
            return Err(ParsePositionError);
        }
        Ok(Position { row, col })
    }
}

impl fmt::Display for Position {
    /// Formats the position in `a1` notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Columns beyond 'z' never occur: supported boards are at most 10 wide.
        let file = (b'a' + self.col as u8) as char;
        write!(f, "{}{}", file, self.row + 1)
    }
}

/// Error returned when a string is not a valid square for the given board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePositionError;

impl fmt::Display for ParsePositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected a square like \"c4\" within the board")
    }
}

impl std::error::Error for ParsePositionError {}
