//! Drawing state machine.
//!
//! Tracks the active pass, the subpath origin set by `M` and the current
//! point, and feeds every `L`/`C` edge into the active pass's segment set.

use serde::{Deserialize, Serialize};
use std::io::BufRead;
use tracing::{debug, warn};
use vecsort_core::{AllocFailurePolicy, Pass, PassSets, Point};

use crate::command::Command;
use crate::error::{ParseError, ParseResult};

/// Where the current point lands after a `C` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloseBehavior {
    /// Established output: x takes the origin's y and y is left as it was.
    #[default]
    Legacy,
    /// Current point returns to the subpath origin.
    Origin,
}

/// Why parsing stopped without a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// An `X` line was read.
    EndMarker,
    /// The stream ran out.
    EndOfInput,
    /// A line started with an unrecognised character. Segments read up to
    /// that line are kept.
    UnknownCommand(char),
}

impl Termination {
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::UnknownCommand(_))
    }
}

/// Everything a successful parse produced.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub sets: PassSets,
    /// Number of `L` commands read, counted before deduplication.
    pub segments_read: usize,
    pub termination: Termination,
}

#[derive(Debug, Clone, Copy)]
struct DrawState {
    pass: Pass,
    origin: Point,
    current: Point,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            pass: Pass::Green,
            origin: Point::ORIGIN,
            current: Point::ORIGIN,
        }
    }
}

/// Parses a command stream into per-pass segment sets.
#[derive(Debug, Clone, Default)]
pub struct CommandParser {
    close_behavior: CloseBehavior,
    alloc_policy: AllocFailurePolicy,
    capacity_limit: Option<usize>,
}

impl CommandParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_close_behavior(mut self, behavior: CloseBehavior) -> Self {
        self.close_behavior = behavior;
        self
    }

    pub fn with_alloc_policy(mut self, policy: AllocFailurePolicy) -> Self {
        self.alloc_policy = policy;
        self
    }

    /// Caps each pass's segment count; see [`SegmentSet::with_capacity_limit`](vecsort_core::SegmentSet::with_capacity_limit).
    pub fn with_capacity_limit(mut self, limit: Option<usize>) -> Self {
        self.capacity_limit = limit;
        self
    }

    /// Reads `reader` until `X`, end of input or an unknown command.
    ///
    /// Lines are decoded lossily, so stray non-UTF-8 bytes only matter if
    /// they lead a line.
    pub fn parse<R: BufRead>(&self, mut reader: R) -> ParseResult<ParseOutcome> {
        let mut sets = PassSets::new(self.alloc_policy, self.capacity_limit);
        let mut state = DrawState::default();
        let mut segments_read = 0;
        let mut buf = Vec::new();
        let mut line_number = 0;

        let termination = loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break Termination::EndOfInput;
            }
            line_number += 1;

            let decoded = String::from_utf8_lossy(&buf);
            let raw: &str = &decoded;
            let line = raw.strip_suffix('\n').unwrap_or(raw);

            match Command::parse(line, line_number)? {
                Command::SelectPass(pass) => state.pass = pass,
                Command::MoveTo(point) => {
                    state.origin = point;
                    state.current = point;
                }
                Command::LineTo(point) => {
                    self.add_edge(&mut sets, &state, point, line_number)?;
                    segments_read += 1;
                    state.current = point;
                }
                Command::Close => {
                    self.add_edge(&mut sets, &state, state.origin, line_number)?;
                    match self.close_behavior {
                        CloseBehavior::Legacy => state.current.x = state.origin.y,
                        CloseBehavior::Origin => state.current = state.origin,
                    }
                }
                Command::End => break Termination::EndMarker,
                Command::Unknown(letter) => {
                    warn!(line_number, command = ?letter, "unknown command, stopping");
                    break Termination::UnknownCommand(letter);
                }
            }
        };

        debug!(
            lines = line_number,
            segments_read,
            stored = sets.total_len(),
            dropped = sets.total_dropped(),
            ?termination,
            "command stream parsed"
        );

        Ok(ParseOutcome {
            sets,
            segments_read,
            termination,
        })
    }

    fn add_edge(
        &self,
        sets: &mut PassSets,
        state: &DrawState,
        to: Point,
        line_number: usize,
    ) -> ParseResult<()> {
        let from = state.current;
        sets.get_mut(state.pass)
            .insert(from.x, from.y, to.x, to.y)
            .map_err(|source| ParseError::Storage {
                line_number,
                source,
            })?;
        Ok(())
    }
}
