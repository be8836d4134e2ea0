//! Job configuration
//!
//! Every section falls back to its defaults when missing, so an empty file
//! is a valid configuration and reproduces the established output exactly.
//!
//! ```toml
//! [parse]
//! close_behavior = "legacy"   # or "origin"
//!
//! [storage]
//! alloc_failure = "drop"      # or "error"
//! max_segments_per_pass = 100000
//!
//! [tour.start]
//! x = 0.0
//! y = 0.0
//!
//! [output]
//! precision = 3
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use vecsort_core::{AllocFailurePolicy, Cursor, Point};
use vecsort_parser::{CloseBehavior, CommandParser};

use crate::error::{SettingsError, SettingsResult};

/// Largest accepted coordinate precision.
pub const MAX_PRECISION: usize = 9;

/// Command stream interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseSettings {
    /// Current point update after a `C` command
    pub close_behavior: CloseBehavior,
}

/// Segment storage limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Handling of segments that cannot be stored
    pub alloc_failure: AllocFailurePolicy,
    /// Optional cap on stored segments per pass
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_segments_per_pass: Option<usize>,
}

/// Tour construction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TourSettings {
    /// Tool position the first pass is searched from
    pub start: Point,
}

/// Device stream formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Decimals per emitted coordinate
    pub precision: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { precision: 3 }
    }
}

/// Complete job configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parse: ParseSettings,
    pub storage: StorageSettings,
    pub tour: TourSettings,
    pub output: OutputSettings,
}

impl Config {
    /// Create default config
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> SettingsResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> SettingsResult<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file (JSON or TOML, by extension)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config = match extension(path).as_deref() {
            Some("json") => Self::from_json_str(&content)?,
            Some("toml") => Self::from_toml_str(&content)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("none").to_string(),
                ))
            }
        };

        debug!(path = %path.display(), ?config, "configuration loaded");
        Ok(config)
    }

    /// Save config to file (JSON or TOML, by extension)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path).as_deref() {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)?,
            other => {
                return Err(SettingsError::UnsupportedFormat(
                    other.unwrap_or("none").to_string(),
                ))
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.output.precision > MAX_PRECISION {
            return Err(invalid(
                "output.precision",
                format!("must be at most {}", MAX_PRECISION),
            ));
        }

        if !(self.tour.start.x.is_finite() && self.tour.start.y.is_finite()) {
            return Err(invalid("tour.start", "must be a finite point".to_string()));
        }

        if self.storage.max_segments_per_pass == Some(0) {
            return Err(invalid(
                "storage.max_segments_per_pass",
                "must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// A parser set up with this configuration's parse and storage sections.
    pub fn command_parser(&self) -> CommandParser {
        CommandParser::new()
            .with_close_behavior(self.parse.close_behavior)
            .with_alloc_policy(self.storage.alloc_failure)
            .with_capacity_limit(self.storage.max_segments_per_pass)
    }

    /// The cursor the first pass is optimized from.
    pub fn start_cursor(&self) -> Cursor {
        Cursor::new(self.tour.start)
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

fn invalid(key: &str, reason: String) -> SettingsError {
    SettingsError::InvalidSetting {
        key: key.to_string(),
        reason,
    }
}
