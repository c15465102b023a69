use serde::Serialize;

use crate::piece::Piece;

/// Board sizes the controller accepts, in ascending order.
pub const SUPPORTED_BOARD_SIZES: [usize; 2] = [8, 10];

/// Default board edge length.
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Checks whether `size` is in the supported-size set.
#[inline]
pub fn is_supported_board_size(size: usize) -> bool {
    SUPPORTED_BOARD_SIZES.contains(&size)
}

/// Per-game settings.
///
/// `highlight_legal_moves` is a display preference only; it never affects
/// the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub first_player: Piece,
    pub highlight_legal_moves: bool,
    pub board_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            first_player: Piece::Black,
            highlight_legal_moves: true,
            board_size: DEFAULT_BOARD_SIZE,
        }
    }
}

impl Settings {
    /// Returns a fully valid copy of the settings.
    ///
    /// Each invalid field falls back to its default independently: a
    /// non-player `first_player` becomes Black, an unsupported `board_size`
    /// becomes [`DEFAULT_BOARD_SIZE`]. Valid fields pass through unchanged,
    /// so normalization never mixes defaults into valid input.
    pub fn normalized(self) -> Settings {
        let defaults = Settings::default();
        Settings {
            first_player: if self.first_player.is_player() {
                self.first_player
            } else {
                defaults.first_player
            },
            highlight_legal_moves: self.highlight_legal_moves,
            board_size: if is_supported_board_size(self.board_size) {
                self.board_size
            } else {
                defaults.board_size
            },
        }
    }

    /// Overlays the given fields of `patch` onto these settings.
    pub fn merged(self, patch: SettingsPatch) -> Settings {
        Settings {
            first_player: patch.first_player.unwrap_or(self.first_player),
            highlight_legal_moves: patch
                .highlight_legal_moves
                .unwrap_or(self.highlight_legal_moves),
            board_size: patch.board_size.unwrap_or(self.board_size),
        }
    }
}

/// Partial settings overlay used by [`crate::controller::GameController::reset`].
///
/// `None` fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub first_player: Option<Piece>,
    pub highlight_legal_moves: Option<bool>,
    pub board_size: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.first_player, Piece::Black);
        assert!(settings.highlight_legal_moves);
        assert_eq!(settings.board_size, 8);
    }

    #[test]
    fn test_normalized_falls_back_per_field() {
        let settings = Settings {
            first_player: Piece::Empty,
            highlight_legal_moves: false,
            board_size: 10,
        }
        .normalized();
        // Only the invalid field is replaced.
        assert_eq!(settings.first_player, Piece::Black);
        assert!(!settings.highlight_legal_moves);
        assert_eq!(settings.board_size, 10);

        let settings = Settings {
            first_player: Piece::White,
            highlight_legal_moves: true,
            board_size: 7,
        }
        .normalized();
        assert_eq!(settings.first_player, Piece::White);
        assert_eq!(settings.board_size, DEFAULT_BOARD_SIZE);
    }

    #[test]
    fn test_normalized_keeps_valid_settings() {
        let settings = Settings {
            first_player: Piece::White,
            highlight_legal_moves: false,
            board_size: 10,
        };
        assert_eq!(settings.normalized(), settings);
    }

    #[test]
    fn test_merged_patch() {
        let base = Settings::default();
        let merged = base.merged(SettingsPatch {
            board_size: Some(10),
            ..SettingsPatch::default()
        });
        assert_eq!(merged.board_size, 10);
        assert_eq!(merged.first_player, base.first_player);
        assert_eq!(merged.highlight_legal_moves, base.highlight_legal_moves);

        let merged = base.merged(SettingsPatch::default());
        assert_eq!(merged, base);
    }

    #[test]
    fn test_supported_sizes() {
        assert!(is_supported_board_size(8));
        assert!(is_supported_board_size(10));
        assert!(!is_supported_board_size(4));
        assert!(!is_supported_board_size(9));
        assert!(!is_supported_board_size(12));
    }
}
