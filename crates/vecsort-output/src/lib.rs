//! # vecsort Output
//!
//! Serializes ordered tours into the device's pen-up/pen-down command language
//! and writes the human-readable cut/transit diagnostics.

pub mod emitter;
pub mod report;

pub use emitter::Emitter;
pub use report::StatsReporter;
