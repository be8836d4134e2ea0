//! Vector command stream parser for vecsort
//!
//! This crate provides:
//! - Line-level command decoding (`P`, `M`, `L`, `C`, `X`)
//! - The drawing state machine that splits paths into per-pass segments
//! - Typed termination status so the caller decides how to exit

pub mod command;
pub mod error;
pub mod parser;

pub use command::{ColorTriple, Command};
pub use error::{ParseError, ParseResult};
pub use parser::{CloseBehavior, CommandParser, ParseOutcome, Termination};
