//! Stateful game controller: command validation, the turn/pass state
//! machine, single-level undo, and snapshot broadcasting.

use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, error};

use crate::game::{GameState, HistoryEntry};
use crate::piece::Piece;
use crate::settings::{self, Settings, SettingsPatch, SUPPORTED_BOARD_SIZES};

/// Handle returned by [`GameController::subscribe`]; pass it to
/// [`GameController::unsubscribe`] to stop receiving snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&GameState)>;

/// Owns a single game and sequences its turns.
///
/// Every command is synchronous and runs to completion, including the
/// bounded pass cascade, before subscribers are notified; observers never
/// see a half-applied transition. Subscribers receive value snapshots, so
/// nothing they do to a received [`GameState`] can reach back into the
/// controller. Commands take `&mut self`, which also rules out reentrant
/// commands from within a listener; a listener that needs to issue commands
/// must defer them until its notification returns.
///
/// Controllers are plain values: any number of independent instances may
/// coexist.
pub struct GameController {
    state: GameState,
    /// Full state as of just before the most recent successful move.
    undo_snapshot: Option<GameState>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl Default for GameController {
    fn default() -> Self {
        GameController::new(Settings::default())
    }
}

impl GameController {
    /// Creates a controller holding a fresh game with the given settings
    /// (normalized as in [`GameState::new_game`]).
    pub fn new(settings: Settings) -> GameController {
        GameController {
            state: GameState::new_game(settings),
            undo_snapshot: None,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Creates a controller continuing from an existing state.
    ///
    /// Useful for setting up specific positions in tests or resuming a
    /// saved game. Legal moves and score are recomputed from the board; the
    /// caller supplies the side to move and the history so far.
    pub fn from_state(mut state: GameState) -> GameController {
        state.legal_moves = state.board.legal_moves(state.current_player);
        state.score = state.board.count_discs();
        GameController {
            state,
            undo_snapshot: None,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Returns a fresh snapshot of the current state.
    pub fn state(&self) -> GameState {
        self.state.clone()
    }

    /// Returns the board sizes accepted by [`GameController::set_board_size`].
    pub fn supported_board_sizes() -> &'static [usize] {
        &SUPPORTED_BOARD_SIZES
    }

    /// Plays a move for the current player.
    ///
    /// The cell must be in the cached legal-move set and the game must not
    /// be over. On success the previous state is retained for undo, the move
    /// is applied, a history entry is appended, the turn advances (possibly
    /// through recorded passes), and one snapshot is broadcast.
    ///
    /// # Returns
    ///
    /// `false` for any rejected input: game over, out-of-range cell, or a
    /// cell that is not a legal move. Ordinary rejection never panics.
    pub fn play(&mut self, row: usize, col: usize) -> bool {
        if self.state.is_game_over {
            return false;
        }
        let Some(mv) = self
            .state
            .legal_moves
            .iter()
            .find(|m| m.position.row == row && m.position.col == col)
            .cloned()
        else {
            return false;
        };

        self.undo_snapshot = Some(self.state.clone());

        let player = self.state.current_player;
        self.state.board =
            self.state
                .board
                .apply_move_with_flipped(mv.position, &mv.flipped, player);
        self.state.score = self.state.board.count_discs();
        self.state
            .history
            .push(HistoryEntry::placement(player, mv.position, mv.flipped, self.state.score));
        self.state.consecutive_passes = 0;

        self.advance_turn(player);
        self.broadcast();
        true
    }

    /// Advances the turn after `after_player` has acted.
    ///
    /// The candidate to move is polled starting with the opponent: a
    /// candidate with a legal move becomes the current player; a candidate
    /// without one passes (counter incremented, pass entry recorded), and
    /// the game ends when two consecutive passes have accumulated or the
    /// board is full. With two players the loop runs at most twice, so a
    /// player with a legal move is never skipped without a recorded pass.
    fn advance_turn(&mut self, after_player: Piece) {
        if self.state.is_game_over {
            self.state.legal_moves.clear();
            return;
        }

        let mut candidate = after_player.opposite();
        loop {
            let legal_moves = self.state.board.legal_moves(candidate);
            if !legal_moves.is_empty() {
                self.state.current_player = candidate;
                self.state.legal_moves = legal_moves;
                self.state.is_game_over = false;
                return;
            }

            self.state.consecutive_passes += 1;
            debug!(player = %candidate, "no legal move, recording forced pass");
            self.state
                .history
                .push(HistoryEntry::pass(candidate, self.state.score));

            if self.state.consecutive_passes >= 2 || self.state.board.is_full() {
                self.state.current_player = candidate;
                self.state.legal_moves = Vec::new();
                self.state.is_game_over = true;
                return;
            }

            candidate = candidate.opposite();
        }
    }

    /// Restores the state from just before the last successful move.
    ///
    /// Only one level is retained: the snapshot is discarded on use, so a
    /// second consecutive undo fails.
    ///
    /// # Returns
    ///
    /// `true` if a snapshot was restored, `false` when none exists.
    pub fn undo(&mut self) -> bool {
        match self.undo_snapshot.take() {
            Some(snapshot) => {
                self.state = snapshot;
                self.broadcast();
                true
            }
            None => false,
        }
    }

    /// Toggles the legal-move highlighting preference.
    ///
    /// Display-only: the rules are unaffected. The retained undo snapshot
    /// is patched to match so an undo does not revert the toggle.
    ///
    /// # Returns
    ///
    /// The new value of the setting.
    pub fn toggle_highlight(&mut self) -> bool {
        self.state.settings.highlight_legal_moves = !self.state.settings.highlight_legal_moves;
        if let Some(snapshot) = self.undo_snapshot.as_mut() {
            snapshot.settings.highlight_legal_moves = self.state.settings.highlight_legal_moves;
        }
        self.broadcast();
        self.state.settings.highlight_legal_moves
    }

    /// Starts a new game with the given fields overlaid on the current
    /// settings. Clears the undo snapshot.
    pub fn reset(&mut self, patch: SettingsPatch) {
        let merged = self.state.settings.merged(patch);
        self.state = GameState::new_game(merged);
        self.undo_snapshot = None;
        self.broadcast();
    }

    /// Changes which color opens the game, restarting it.
    ///
    /// # Returns
    ///
    /// `false` when `player` is not a player token or already opens the
    /// game; `true` after a successful reset.
    pub fn set_first_player(&mut self, player: Piece) -> bool {
        if !player.is_player() || self.state.settings.first_player == player {
            return false;
        }
        self.reset(SettingsPatch {
            first_player: Some(player),
            ..SettingsPatch::default()
        });
        true
    }

    /// Changes the board size, restarting the game.
    ///
    /// # Returns
    ///
    /// `false` when `size` is unsupported or unchanged; `true` after a
    /// successful reset.
    pub fn set_board_size(&mut self, size: usize) -> bool {
        if !settings::is_supported_board_size(size) || self.state.settings.board_size == size {
            return false;
        }
        self.reset(SettingsPatch {
            board_size: Some(size),
            ..SettingsPatch::default()
        });
        true
    }

    /// Registers a snapshot listener.
    ///
    /// The listener is called synchronously with the current snapshot right
    /// away, so late subscribers do not miss the initial state, and then
    /// once after every state-changing command.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));

        let snapshot = self.state.clone();
        if let Some((id, listener)) = self.listeners.last_mut() {
            deliver(*id, listener, &snapshot);
        }
        id
    }

    /// Removes a previously registered listener.
    ///
    /// # Returns
    ///
    /// `true` if the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(handle, _)| *handle != id);
        self.listeners.len() != before
    }

    /// Delivers one snapshot of the fully applied transition to every
    /// listener.
    fn broadcast(&mut self) {
        let snapshot = self.state.clone();
        for (id, listener) in &mut self.listeners {
            deliver(*id, listener, &snapshot);
        }
    }
}

/// Calls a listener, isolating panics so one faulty observer cannot block
/// delivery to the others or corrupt controller state.
fn deliver(id: SubscriptionId, listener: &mut Listener, snapshot: &GameState) {
    if panic::catch_unwind(AssertUnwindSafe(|| (*listener)(snapshot))).is_err() {
        error!(subscription = id.0, "state listener panicked during notification");
    }
}
