#![forbid(unsafe_code)]

//! Console configuration.
//!
//! Defaults match the classic console: a half-second caret blink and a
//! 14 px input font. With the `config` feature enabled, values load from
//! TOML, with absent keys falling back to the defaults.

use std::fmt;
use std::time::Duration;

use dcon_core::measure::FontId;

use crate::blink::BLINK_INTERVAL;

/// Tunable console parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsoleConfig {
    /// Interval between caret visibility flips.
    pub blink_interval: Duration,
    /// Text size applied to the input box at start.
    pub text_size: f32,
    /// Font applied to the input box at start.
    pub font: FontId,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            blink_interval: BLINK_INTERVAL,
            text_size: 14.0,
            font: FontId::default(),
        }
    }
}

/// Failure while loading a [`ConsoleConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io(std::io::Error),
    /// The contents were not valid config TOML.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config I/O: {err}"),
            Self::Parse(msg) => write!(f, "config parse: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(feature = "config")]
mod file {
    use super::*;

    #[derive(serde::Deserialize, Default)]
    #[serde(default, deny_unknown_fields)]
    struct ConfigFile {
        blink_interval_ms: Option<u64>,
        text_size: Option<f32>,
        font: Option<u32>,
    }

    impl ConsoleConfig {
        /// Parse a config from TOML text, defaulting absent keys.
        pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
            let file: ConfigFile =
                toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
            let defaults = Self::default();
            Ok(Self {
                blink_interval: file
                    .blink_interval_ms
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.blink_interval),
                text_size: file.text_size.unwrap_or(defaults.text_size),
                font: file.font.map(FontId).unwrap_or(defaults.font),
            })
        }

        /// Load a config from a TOML file.
        pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
            let text = std::fs::read_to_string(path)?;
            Self::from_toml_str(&text)
        }
    }
}
