use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Represents a piece in the game.
///
/// The `Piece` enum has three variants:
///
/// * `Empty` - Represents an empty cell on the board.
/// * `Black` - Represents a black disc.
/// * `White` - Represents a white disc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Piece {
    Empty,
    Black,
    White,
}

impl Piece {
    /// Converts the piece to its corresponding character representation.
    ///
    /// # Returns
    ///
    /// * `'-'` for `Piece::Empty`
    /// * `'X'` for `Piece::Black`
    /// * `'O'` for `Piece::White`
    pub fn to_char(self) -> char {
        match self {
            Piece::Empty => '-',
            Piece::Black => 'X',
            Piece::White => 'O',
        }
    }

    /// Returns the opposite piece.
    ///
    /// # Returns
    ///
    /// * `Piece::White` for `Piece::Black`
    /// * `Piece::Black` for `Piece::White`
    /// * `Piece::Empty` for `Piece::Empty`
    pub fn opposite(&self) -> Piece {
        match self {
            Piece::Black => Piece::White,
            Piece::White => Piece::Black,
            Piece::Empty => Piece::Empty,
        }
    }

    /// Returns `true` for the two player tokens, `false` for `Piece::Empty`.
    #[inline]
    pub fn is_player(self) -> bool {
        !matches!(self, Piece::Empty)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Piece::Empty => write!(f, "Empty"),
            Piece::Black => write!(f, "Black"),
            Piece::White => write!(f, "White"),
        }
    }
}

/// Error returned when a string does not name a player color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePieceError;

impl fmt::Display for ParsePieceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected \"black\" or \"white\"")
    }
}

impl std::error::Error for ParsePieceError {}

impl FromStr for Piece {
    type Err = ParsePieceError;

    /// Parses a player color name.
    ///
    /// Accepts `black`/`b`/`x` and `white`/`w`/`o`, case-insensitively.
    /// `Piece::Empty` is deliberately not parseable: user input always names
    /// one of the two players.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "black" | "b" | "x" => Ok(Piece::Black),
            "white" | "w" | "o" => Ok(Piece::White),
            _ => Err(ParsePieceError),
        }
    }
}
