//! Validation configuration.
//!
//! # Responsibility
//! - Hold product-specific validation data (clickbait marker phrases).
//! - Load that data from JSON files.
//!
//! # Invariants
//! - A loaded config always carries at least one non-blank marker.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Marker phrases accepted in post titles when no config is supplied.
pub const DEFAULT_CLICKBAIT_MARKERS: &[&str] = &["Won't Believe", "Secret", "Top", "Guess"];

/// Error returned when a validation config cannot be loaded.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    NoMarkers,
    BlankMarker { index: usize },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read validation config: {err}"),
            Self::Parse(err) => write!(f, "invalid validation config: {err}"),
            Self::NoMarkers => write!(f, "clickbait_markers must not be empty"),
            Self::BlankMarker { index } => {
                write!(f, "clickbait_markers[{index}] must not be blank")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::NoMarkers | Self::BlankMarker { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Data-driven validation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Post titles must contain at least one of these (case-sensitive).
    pub clickbait_markers: Vec<String>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            clickbait_markers: DEFAULT_CLICKBAIT_MARKERS
                .iter()
                .map(|marker| marker.to_string())
                .collect(),
        }
    }
}

impl ValidationConfig {
    /// Parses and checks a JSON config document.
    ///
    /// Expected shape: `{"clickbait_markers": ["Top", "Secret"]}`.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Reads a JSON config file from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.clickbait_markers.is_empty() {
            return Err(ConfigError::NoMarkers);
        }
        if let Some(index) = self
            .clickbait_markers
            .iter()
            .position(|marker| marker.trim().is_empty())
        {
            return Err(ConfigError::BlankMarker { index });
        }
        Ok(())
    }
}
