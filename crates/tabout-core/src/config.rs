//! Tabout configuration.
//!
//! The configuration is a JSON document whose keys mirror the five token
//! lists of a [`Vocabulary`]. Any key left out falls back to the built-in
//! LaTeX defaults, so `{}` is a valid configuration.
//!
//! ```json
//! {
//!   "openingSymbols": ["(", "[", "\\{"],
//!   "leftCommands": ["\\left", "\\bigl"]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vocabulary::{
    DEFAULT_CLOSING_SYMBOLS, DEFAULT_DELIMITERS, DEFAULT_LEFT_COMMANDS, DEFAULT_OPENING_SYMBOLS,
    DEFAULT_RIGHT_COMMANDS, TokenSet, Vocabulary,
};

/// Errors raised while loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("empty token in {0}")]
    EmptyToken(TokenSet),
}

/// User-facing token lists, as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TaboutConfig {
    pub opening_symbols: Vec<String>,
    pub closing_symbols: Vec<String>,
    pub left_commands: Vec<String>,
    pub right_commands: Vec<String>,
    pub delimiters: Vec<String>,
}

impl Default for TaboutConfig {
    fn default() -> Self {
        let owned =
            |tokens: &[&str]| -> Vec<String> { tokens.iter().map(|t| t.to_string()).collect() };
        Self {
            opening_symbols: owned(DEFAULT_OPENING_SYMBOLS),
            closing_symbols: owned(DEFAULT_CLOSING_SYMBOLS),
            left_commands: owned(DEFAULT_LEFT_COMMANDS),
            right_commands: owned(DEFAULT_RIGHT_COMMANDS),
            delimiters: owned(DEFAULT_DELIMITERS),
        }
    }
}

impl TaboutConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded tabout config from {}", path.display());
        Self::from_json_str(&json)
    }

    /// Validates the lists and sorts them into a scanning [`Vocabulary`].
    pub fn vocabulary(&self) -> Result<Vocabulary, ConfigError> {
        Vocabulary::from_config(self)
    }
}
