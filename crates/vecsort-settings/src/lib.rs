//! vecsort Settings Crate
//!
//! Handles job configuration: how the parser treats `C` and storage
//! exhaustion, where the tool starts and how coordinates are printed.
//! Supports JSON and TOML files.

pub mod config;
pub mod error;

pub use config::{Config, OutputSettings, ParseSettings, StorageSettings, TourSettings};
pub use error::{SettingsError, SettingsResult};
