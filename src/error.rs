//! Top-level error type for a vecsort job.

use std::io;
use thiserror::Error;
use vecsort_parser::ParseError;
use vecsort_settings::SettingsError;

/// Errors that stop a job before it completes.
#[derive(Error, Debug)]
pub enum VecsortError {
    /// The command stream was rejected. Nothing has been emitted.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Settings(#[from] SettingsError),

    /// Writing the device stream or diagnostics failed.
    #[error("Output error: {0}")]
    Output(#[from] io::Error),
}

/// Result type alias for job execution.
pub type Result<T> = std::result::Result<T, VecsortError>;
