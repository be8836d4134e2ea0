//! # vecsort
//!
//! Reorders a laser cutter / plotter vector job to cut down on the distance
//! the head travels with the laser off.
//!
//! ## Architecture
//!
//! vecsort is organized as a workspace with multiple crates:
//!
//! 1. **vecsort-core** - Segments, per-pass segment sets, greedy tour builder, statistics
//! 2. **vecsort-parser** - Command stream (`P`/`M`/`L`/`C`/`X`) parsing
//! 3. **vecsort-output** - Device command emitter and diagnostics reporter
//! 4. **vecsort-settings** - TOML/JSON job configuration
//! 5. **vecsort** - Job driver and the stdin-to-stdout binary
//!
//! ## Data flow
//!
//! text stream → parser → three segment sets → tour builder (once per pass,
//! sharing one cursor) → emitter → device command stream

pub mod error;
pub mod pipeline;

use std::path::Path;

pub use error::{Result, VecsortError};
pub use pipeline::{run, PassReport, RunSummary};

pub use vecsort_core::{
    AllocFailurePolicy, Cursor, CutStats, InsertOutcome, Pass, PassSets, Point, Segment,
    SegmentSet, Tour, TourBuilder,
};
pub use vecsort_output::{Emitter, StatsReporter};
pub use vecsort_parser::{CloseBehavior, Command, CommandParser, ParseError, Termination};
pub use vecsort_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compile date, `YYYY-MM-DD`.
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Environment variable naming an optional configuration file.
pub const CONFIG_ENV: &str = "VECSORT_CONFIG";

/// Loads the configuration at `path`, or the defaults when there is none.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::load_from_file(path)?),
        None => Ok(Config::default()),
    }
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, since stdout carries the device stream
/// - RUST_LOG environment variable support, warnings only by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
