//! Game settings loaded from TOML.

use crate::Player;
use crate::error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Timing and status-text settings for a game.
///
/// Every field has a default, so an empty file is a valid config.
/// Text templates substitute `{player}` with the symbol.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Minimum gap between accepted marker inputs, in milliseconds.
    debounce_ms: u64,

    /// How long transient messages stay up, in milliseconds.
    message_duration_ms: u64,

    /// Status while a game is running.
    turn_text: String,

    /// Transient text when the wrong marker is shown.
    not_your_turn_text: String,

    /// Transient text when the cell is occupied.
    position_taken_text: String,

    /// Status once a player has won.
    win_text: String,

    /// Status for a draw.
    draw_text: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce_ms: 1000,
            message_duration_ms: 2000,
            turn_text: "Player {player}'s turn".to_string(),
            not_your_turn_text: "Not your turn!".to_string(),
            position_taken_text: "Position already taken!".to_string(),
            win_text: "Player {player} wins!".to_string(),
            draw_text: "It's a draw!".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read settings file: {}", e)))?;

        let settings = Self::from_toml(&content)?;
        info!(
            debounce_ms = settings.debounce_ms,
            message_duration_ms = settings.message_duration_ms,
            "Settings loaded"
        );
        Ok(settings)
    }

    /// Parses settings from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))
    }

    /// Debounce window as a duration.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Transient message duration.
    pub fn message_duration(&self) -> Duration {
        Duration::from_millis(self.message_duration_ms)
    }

    /// Status text announcing whose turn it is.
    pub fn turn_status(&self, player: Player) -> String {
        self.turn_text.replace("{player}", &player.to_string())
    }

    /// Status text announcing the winner.
    pub fn win_status(&self, player: Player) -> String {
        self.win_text.replace("{player}", &player.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(*settings.debounce_ms(), 1000);
        assert_eq!(settings.turn_status(Player::O), "Player O's turn");
        assert_eq!(settings.win_status(Player::X), "Player X wins!");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml("debounce_ms = 250\n").expect("valid toml");
        assert_eq!(*settings.debounce_ms(), 250);
        assert_eq!(*settings.message_duration_ms(), 2000);
        assert_eq!(settings.draw_text(), "It's a draw!");
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = Settings::from_toml("debounce_ms = \"soon\"").unwrap_err();
        assert!(err.message.contains("Failed to parse settings"));
    }
}
