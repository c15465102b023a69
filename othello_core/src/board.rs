use std::fmt;

use serde::Serialize;

use crate::moves::Move;
use crate::piece::Piece;
use crate::position::Position;

/// Minimum supported board edge length.
pub const MIN_BOARD_SIZE: usize = 4;

/// The eight compass directions used by the flip search, scanned in
/// row-major order. The order is fixed so flip lists are reproducible.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Error returned when constructing a board with an odd or too-small size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidBoardSizeError(pub usize);

impl fmt::Display for InvalidBoardSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "board size must be an even number of at least {MIN_BOARD_SIZE}, got {}",
            self.0
        )
    }
}

impl std::error::Error for InvalidBoardSizeError {}

/// Disc counts for one position.
///
/// The three fields always sum to the cell count of the board they were
/// taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Score {
    pub black: usize,
    pub white: usize,
    pub empty: usize,
}

/// An N×N Reversi board stored row-major.
///
/// Boards are value types: every "mutating" operation returns a new `Board`
/// and never touches the original, so callers may freely keep references to
/// past boards for history and undo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    size: usize,
    cells: Vec<Piece>,
}

impl Default for Board {
    /// Creates an 8×8 board with the standard Reversi starting position.
    fn default() -> Self {
        Board::initial(8).expect("the default board size is valid")
    }
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBoardSizeError` when `size` is odd or below
    /// [`MIN_BOARD_SIZE`].
    pub fn new(size: usize) -> Result<Board, InvalidBoardSizeError> {
        if size < MIN_BOARD_SIZE || size % 2 != 0 {
            return Err(InvalidBoardSizeError(size));
        }
        Ok(Board {
            size,
            cells: vec![Piece::Empty; size * size],
        })
    }

    /// Creates a board with the four centre cells in the canonical starting
    /// pattern: White on the NW–SE centre diagonal, Black on the NE–SW one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBoardSizeError` when `size` is odd or below
    /// [`MIN_BOARD_SIZE`].
    pub fn initial(size: usize) -> Result<Board, InvalidBoardSizeError> {
        let mut board = Board::new(size)?;
        let mid = size / 2;
        board.set(Position::new(mid - 1, mid - 1), Piece::White);
        board.set(Position::new(mid, mid), Piece::White);
        board.set(Position::new(mid - 1, mid), Piece::Black);
        board.set(Position::new(mid, mid - 1), Piece::Black);
        Ok(board)
    }

    /// Creates a board from a string representation.
    ///
    /// The string holds one character per cell in row-major order, with `'X'`
    /// for Black, `'O'` for White and `'-'` for empty. Whitespace is ignored,
    /// so rows may be written on separate lines.
    ///
    /// # Errors
    ///
    /// Returns `InvalidBoardSizeError` when `size` is invalid or the string
    /// does not hold exactly `size * size` cell characters.
    pub fn from_string(board_string: &str, size: usize) -> Result<Board, InvalidBoardSizeError> {
        let mut board = Board::new(size)?;
        let cells: Vec<char> = board_string.chars().filter(|c| !c.is_whitespace()).collect();
        if cells.len() != size * size {
            return Err(InvalidBoardSizeError(size));
        }
        for (i, c) in cells.into_iter().enumerate() {
            board.cells[i] = match c {
                'X' => Piece::Black,
                'O' => Piece::White,
                _ => Piece::Empty,
            };
        }
        Ok(board)
    }

    /// Returns the board edge length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Checks whether a position lies on this board.
    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.size && pos.col < self.size
    }

    /// Gets the piece at a position.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    #[inline]
    pub fn get(&self, pos: Position) -> Piece {
        debug_assert!(self.contains(pos), "position off board: {pos}");
        self.cells[pos.row * self.size + pos.col]
    }

    #[inline]
    pub(crate) fn set(&mut self, pos: Position, piece: Piece) {
        debug_assert!(self.contains(pos), "position off board: {pos}");
        self.cells[pos.row * self.size + pos.col] = piece;
    }

    /// Checks whether every cell is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Piece::Empty)
    }

    /// Iterates over all positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    /// Collects the opponent discs that would flip if `player` placed a disc
    /// at `pos`.
    ///
    /// For each of the eight compass directions the walk collects the
    /// contiguous run of opponent discs starting next to `pos`; the run
    /// counts only when it is terminated by one of `player`'s own discs.
    /// Runs ending on an empty cell or the board edge contribute nothing.
    ///
    /// # Returns
    ///
    /// The flipped positions in direction-scan order, or an empty vector when
    /// `pos` is off the board or already occupied. The board is never
    /// mutated.
    pub fn collect_flipped(&self, pos: Position, player: Piece) -> Vec<Position> {
        debug_assert!(player.is_player(), "flip search requires a player token");
        if !self.contains(pos) || self.get(pos) != Piece::Empty {
            return Vec::new();
        }

        let opponent = player.opposite();
        let mut flipped = Vec::new();

        for &(dr, dc) in &DIRECTIONS {
            let mut run = Vec::new();
            let mut cursor = pos.offset(dr, dc, self.size);
            while let Some(p) = cursor {
                if self.get(p) != opponent {
                    break;
                }
                run.push(p);
                cursor = p.offset(dr, dc, self.size);
            }
            if run.is_empty() {
                continue;
            }
            // The run is bracketed only when the walk stopped on the
            // player's own disc, not on an empty cell or the board edge.
            if let Some(p) = cursor {
                if self.get(p) == player {
                    flipped.append(&mut run);
                }
            }
        }

        flipped
    }

    /// Enumerates every legal move for `player`.
    ///
    /// # Returns
    ///
    /// Moves over the empty cells with a non-empty flip set, scanned in
    /// row-major order.
    pub fn legal_moves(&self, player: Piece) -> Vec<Move> {
        self.positions()
            .filter(|&pos| self.get(pos) == Piece::Empty)
            .filter_map(|pos| {
                let flipped = self.collect_flipped(pos, player);
                (!flipped.is_empty()).then(|| Move::new(pos, flipped))
            })
            .collect()
    }

    /// Checks if `player` has any legal move.
    pub fn has_legal_moves(&self, player: Piece) -> bool {
        self.positions().any(|pos| {
            self.get(pos) == Piece::Empty && !self.collect_flipped(pos, player).is_empty()
        })
    }

    /// Applies a move for `player`, returning the resulting board.
    ///
    /// The original board is unmodified. An illegal move (empty flip set)
    /// returns an unmodified copy; callers are expected to pre-validate
    /// against [`Board::legal_moves`].
    pub fn apply_move(&self, pos: Position, player: Piece) -> Board {
        let flipped = self.collect_flipped(pos, player);
        if flipped.is_empty() {
            return self.clone();
        }
        self.apply_move_with_flipped(pos, &flipped, player)
    }

    /// Applies a move given an already computed flip set.
    ///
    /// Used by the controller, which validates against its cached legal
    /// moves and already holds the flip list.
    pub fn apply_move_with_flipped(
        &self,
        pos: Position,
        flipped: &[Position],
        player: Piece,
    ) -> Board {
        debug_assert!(self.get(pos) == Piece::Empty, "target cell occupied: {pos}");
        let mut next = self.clone();
        next.set(pos, player);
        for &p in flipped {
            next.set(p, player);
        }
        next
    }

    /// Counts the discs of each color and the empty cells.
    pub fn count_discs(&self) -> Score {
        let mut score = Score {
            black: 0,
            white: 0,
            empty: 0,
        };
        for &cell in &self.cells {
            match cell {
                Piece::Black => score.black += 1,
                Piece::White => score.white += 1,
                Piece::Empty => score.empty += 1,
            }
        }
        score
    }

    /// Checks if the game is over: the board is full, or neither player has
    /// a legal move.
    ///
    /// A board with open cells where exactly one player can move is not
    /// terminal; that player moves and the other passes.
    pub fn is_game_over(&self) -> bool {
        if self.is_full() {
            return true;
        }
        !self.has_legal_moves(Piece::Black) && !self.has_legal_moves(Piece::White)
    }
}

impl fmt::Display for Board {
    /// Formats the board as rows of 'X'/'O'/'-' characters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.size {
                write!(f, "{}", self.get(Position::new(row, col)).to_char())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_sizes() {
        assert_eq!(Board::new(7), Err(InvalidBoardSizeError(7)));
        assert_eq!(Board::new(2), Err(InvalidBoardSizeError(2)));
        assert_eq!(Board::new(0), Err(InvalidBoardSizeError(0)));
        assert!(Board::new(4).is_ok());
        assert!(Board::new(10).is_ok());
    }

    #[test]
    fn test_initial_setup() {
        let board = Board::initial(8).unwrap();
        assert_eq!(board.get(Position::new(3, 3)), Piece::White);
        assert_eq!(board.get(Position::new(4, 4)), Piece::White);
        assert_eq!(board.get(Position::new(3, 4)), Piece::Black);
        assert_eq!(board.get(Position::new(4, 3)), Piece::Black);

        let score = board.count_discs();
        assert_eq!(score.black, 2);
        assert_eq!(score.white, 2);
        assert_eq!(score.empty, 60);
    }

    #[test]
    fn test_initial_setup_scales_with_size() {
        for size in [4, 6, 10] {
            let board = Board::initial(size).unwrap();
            let mid = size / 2;
            assert_eq!(board.get(Position::new(mid - 1, mid - 1)), Piece::White);
            assert_eq!(board.get(Position::new(mid, mid)), Piece::White);
            assert_eq!(board.get(Position::new(mid - 1, mid)), Piece::Black);
            assert_eq!(board.get(Position::new(mid, mid - 1)), Piece::Black);
            assert_eq!(board.count_discs().empty, size * size - 4);
        }
    }

    #[test]
    fn test_default_is_initial_8x8() {
        assert_eq!(Board::default(), Board::initial(8).unwrap());
    }

    #[test]
    fn test_collect_flipped_rejects_occupied_and_off_board() {
        let board = Board::default();
        assert!(board.collect_flipped(Position::new(3, 3), Piece::Black).is_empty());
        assert!(board.collect_flipped(Position::new(8, 0), Piece::Black).is_empty());
        assert!(board.collect_flipped(Position::new(0, 8), Piece::White).is_empty());
    }

    #[test]
    fn test_collect_flipped_initial_moves() {
        let board = Board::default();
        let flipped = board.collect_flipped(Position::new(2, 3), Piece::Black);
        assert_eq!(flipped, vec![Position::new(3, 3)]);

        // A direction whose run ends on an empty cell contributes nothing.
        assert!(board.collect_flipped(Position::new(2, 2), Piece::Black).is_empty());
    }

    #[test]
    fn test_collect_flipped_corner_multi_direction() {
        // Corner placement flipping runs along the top edge and left edge.
        let board = Board::from_string(
            "-OOXOOOO\
             OOOOOOOO\
             OOOOOOOO\
             XOOOOOOO\
             OOOOOOOO\
             OOOOOOOO\
             OOOOOOOO\
             OOOOOOOO",
            8,
        )
        .unwrap();
        let flips = board.collect_flipped(Position::new(0, 0), Piece::Black);
        assert_eq!(flips.len(), 4);
        assert!(flips.contains(&Position::new(0, 1)));
        assert!(flips.contains(&Position::new(0, 2)));
        assert!(flips.contains(&Position::new(1, 0)));
        assert!(flips.contains(&Position::new(2, 0)));

        let after = board.apply_move(Position::new(0, 0), Piece::Black);
        assert_eq!(after.get(Position::new(0, 1)), Piece::Black);
        assert_eq!(after.get(Position::new(1, 0)), Piece::Black);
        // The original board is untouched.
        assert_eq!(board.get(Position::new(0, 1)), Piece::White);
        assert_eq!(board.get(Position::new(1, 0)), Piece::White);
    }

    #[test]
    fn test_legal_moves_initial_position() {
        let board = Board::default();

        let black: Vec<Position> = board
            .legal_moves(Piece::Black)
            .into_iter()
            .map(|m| m.position)
            .collect();
        assert_eq!(
            black,
            vec![
                Position::new(2, 3),
                Position::new(3, 2),
                Position::new(4, 5),
                Position::new(5, 4),
            ]
        );

        let white: Vec<Position> = board
            .legal_moves(Piece::White)
            .into_iter()
            .map(|m| m.position)
            .collect();
        assert_eq!(
            white,
            vec![
                Position::new(2, 4),
                Position::new(3, 5),
                Position::new(4, 2),
                Position::new(5, 3),
            ]
        );
    }

    #[test]
    fn test_legal_moves_every_flip_set_non_empty() {
        let board = Board::default();
        for mv in board.legal_moves(Piece::Black) {
            assert!(!mv.flipped.is_empty());
            assert_eq!(board.get(mv.position), Piece::Empty);
        }
    }

    #[test]
    fn test_apply_move_does_not_mutate_original() {
        let board = Board::default();
        let copy = board.clone();
        let after = board.apply_move(Position::new(2, 3), Piece::Black);

        assert_eq!(board, copy);
        assert_ne!(board, after);
        assert_eq!(after.get(Position::new(2, 3)), Piece::Black);
        assert_eq!(after.get(Position::new(3, 3)), Piece::Black);
        assert_eq!(board.get(Position::new(3, 3)), Piece::White);
    }

    #[test]
    fn test_apply_move_illegal_returns_unmodified_copy() {
        let board = Board::default();
        // Occupied cell and no-flip cell both come back unchanged.
        assert_eq!(board.apply_move(Position::new(3, 3), Piece::Black), board);
        assert_eq!(board.apply_move(Position::new(0, 0), Piece::Black), board);
    }

    #[test]
    fn test_disc_count_delta_after_legal_move() {
        let board = Board::default();
        let before = board.count_discs();
        for mv in board.legal_moves(Piece::Black) {
            let after = board
                .apply_move_with_flipped(mv.position, &mv.flipped, Piece::Black)
                .count_discs();
            assert_eq!(after.black, before.black + 1 + mv.flipped.len());
            assert_eq!(after.white, before.white - mv.flipped.len());
            assert_eq!(after.black + after.white, before.black + before.white + 1);
            assert_eq!(after.black + after.white + after.empty, 64);
        }
    }

    #[test]
    fn test_full_board_is_terminal() {
        let board = Board::from_string(&"X".repeat(64), 8).unwrap();
        assert!(board.is_full());
        assert!(board.is_game_over());
        assert!(board.legal_moves(Piece::Black).is_empty());
        assert!(board.legal_moves(Piece::White).is_empty());

        let score = board.count_discs();
        assert_eq!(score.black, 64);
        assert_eq!(score.white, 0);
        assert_eq!(score.empty, 0);
    }

    #[test]
    fn test_blocked_board_with_empties_is_terminal() {
        // Two discs in opposite corners: neither side can flip anything.
        let mut board = Board::new(8).unwrap();
        board.set(Position::new(0, 0), Piece::Black);
        board.set(Position::new(7, 7), Piece::White);
        assert!(!board.is_full());
        assert!(!board.has_legal_moves(Piece::Black));
        assert!(!board.has_legal_moves(Piece::White));
        assert!(board.is_game_over());
    }

    #[test]
    fn test_one_sided_block_is_not_terminal() {
        // All white except one empty corner; Black cannot move but White
        // can, so the game is not over.
        let board = Board::from_string(
            "OOOOOOOO\
             OOOOOOOO\
             OOOOOOOO\
             OOOOOOOO\
             OOOOOOOO\
             OOOOOOOO\
             OOOOOOOO\
             OOOOOOX-",
            8,
        )
        .unwrap();
        assert!(!board.has_legal_moves(Piece::Black));
        assert!(board.has_legal_moves(Piece::White));
        assert!(!board.is_game_over());
    }

    #[test]
    fn test_initial_position_is_not_terminal() {
        assert!(!Board::default().is_game_over());
    }

    #[test]
    fn test_from_string_round_trip() {
        let board = Board::default();
        let text = board.to_string();
        assert_eq!(Board::from_string(&text, 8).unwrap(), board);
    }

    #[test]
    fn test_from_string_rejects_wrong_length() {
        assert!(Board::from_string("XO", 8).is_err());
    }

    #[test]
    fn test_display() {
        let board = Board::initial(4).unwrap();
        let expected = "----\n\
                        -OX-\n\
                        -XO-\n\
                        ----";
        assert_eq!(board.to_string(), expected);
    }
}
