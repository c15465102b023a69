use serde::Serialize;

use crate::position::Position;

/// A legal placement together with the discs it flips.
///
/// A `Move` is computed against a specific board and player; detached from
/// them it is meaningless, so moves are never kept across board mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Move {
    /// The empty cell where the disc is placed.
    pub position: Position,
    /// Opponent discs flipped by this move, in direction-scan order.
    pub flipped: Vec<Position>,
}

impl Move {
    /// Creates a new move.
    #[inline]
    pub fn new(position: Position, flipped: Vec<Position>) -> Move {
        Move { position, flipped }
    }
}
