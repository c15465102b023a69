use serde::Serialize;

use crate::board::{Board, Score};
use crate::moves::Move;
use crate::piece::Piece;
use crate::position::Position;
use crate::settings::Settings;

/// One recorded ply: a placement or a forced pass.
///
/// History entries are append-only and never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// The acting player.
    pub player: Piece,
    /// The played cell; `None` for a pass.
    pub position: Option<Position>,
    /// The discs flipped by the ply; empty for a pass.
    pub flipped: Vec<Position>,
    pub is_pass: bool,
    /// Disc counts after the ply was applied.
    pub scores_after: Score,
}

impl HistoryEntry {
    pub(crate) fn placement(
        player: Piece,
        position: Position,
        flipped: Vec<Position>,
        scores_after: Score,
    ) -> HistoryEntry {
        HistoryEntry {
            player,
            position: Some(position),
            flipped,
            is_pass: false,
            scores_after,
        }
    }

    pub(crate) fn pass(player: Piece, scores_after: Score) -> HistoryEntry {
        HistoryEntry {
            player,
            position: None,
            flipped: Vec::new(),
            is_pass: true,
            scores_after,
        }
    }
}

/// The full game aggregate observed by subscribers.
///
/// Snapshots are plain clones: mutating a `GameState` obtained from a
/// controller never affects the controller's own state, and the controller
/// never hands out references to its internals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub board: Board,
    pub current_player: Piece,
    /// Legal moves for `current_player`, recomputed on every transition.
    pub legal_moves: Vec<Move>,
    pub score: Score,
    pub history: Vec<HistoryEntry>,
    pub settings: Settings,
    /// Consecutive forced passes since the last placement.
    pub consecutive_passes: u32,
    pub is_game_over: bool,
}

impl GameState {
    /// Builds the initial state for a fresh game.
    ///
    /// Settings are normalized first, so the board size is always one of the
    /// supported sizes and the first player is always a real player token.
    pub fn new_game(settings: Settings) -> GameState {
        let settings = settings.normalized();
        let board = Board::initial(settings.board_size)
            .expect("normalized settings carry a supported board size");
        let current_player = settings.first_player;
        let legal_moves = board.legal_moves(current_player);
        let score = board.count_discs();
        GameState {
            board,
            current_player,
            legal_moves,
            score,
            history: Vec::new(),
            settings,
            consecutive_passes: 0,
            is_game_over: false,
        }
    }
}
