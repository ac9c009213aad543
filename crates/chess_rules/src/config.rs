//! Session configuration, read from TOML.
//!
//! ```toml
//! board_size = 8
//! player_white = "Alice"
//! player_black = "Bob"
//! echo_log = true
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::MIN_SIZE;
use crate::error::ConfigError;
use crate::types::{MAX_SIZE, STANDARD_SIZE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Size of boards created by reset and import. New games are always 8x8.
    pub board_size: u8,
    pub player_white: String,
    pub player_black: String,
    /// Whether front ends should print log entries as they arrive.
    pub echo_log: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: STANDARD_SIZE,
            player_white: "White".to_string(),
            player_black: "Black".to_string(),
            echo_log: true,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.board_size) {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        Ok(())
    }
}
