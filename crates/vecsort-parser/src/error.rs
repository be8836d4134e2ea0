//! Error types for the parser crate.
//!
//! Every variant is fatal for the job: no device output may be produced once
//! one of these is returned. An unknown command letter is not an error, see
//! [`Termination::UnknownCommand`](crate::Termination::UnknownCommand).

use std::io;
use thiserror::Error;
use vecsort_core::SegmentSetError;

/// Errors that abort parsing of a command stream.
#[derive(Error, Debug)]
pub enum ParseError {
    /// A `P` command whose triple does not select exactly one channel.
    #[error("Line {line_number}: non-red/green/blue vector? {r},{g},{b}")]
    MixedColor {
        /// 1-based line number.
        line_number: usize,
        r: i64,
        g: i64,
        b: i64,
    },

    /// A `P` command whose payload is not three integers.
    #[error("Line {line_number}: invalid color triple '{text}'")]
    InvalidColor {
        /// 1-based line number.
        line_number: usize,
        /// The payload after the command letter.
        text: String,
    },

    /// An `M` or `L` command whose payload is not two finite numbers.
    ///
    /// Stricter than the `sscanf` reading the payload grammar follows, which
    /// leaves the previous coordinates in place on a bad payload. Here the
    /// job is aborted instead.
    #[error("Line {line_number}: invalid coordinates for '{command}': '{text}'")]
    MalformedCoordinates {
        /// 1-based line number.
        line_number: usize,
        /// The command letter.
        command: char,
        /// The payload after the command letter.
        text: String,
    },

    /// Segment storage failed under the error policy.
    #[error("Line {line_number}: {source}")]
    Storage {
        /// 1-based line number.
        line_number: usize,
        #[source]
        source: SegmentSetError,
    },

    /// Reading the command stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ParseError {
    /// True for both color variants.
    pub fn is_malformed_color(&self) -> bool {
        matches!(self, Self::MixedColor { .. } | Self::InvalidColor { .. })
    }
}

/// Result type alias for parsing.
pub type ParseResult<T> = Result<T, ParseError>;
