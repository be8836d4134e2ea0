//! Job driver: parse, optimize each pass in order, emit.
//!
//! The three passes share one [`Cursor`], so they must run sequentially and
//! in pass order; the end of the green tour seeds the red search and so on.

use std::io::{BufRead, Write};
use tracing::{debug, info};
use vecsort_core::{Cursor, CutStats, Pass, TourBuilder};
use vecsort_output::{Emitter, StatsReporter};
use vecsort_parser::Termination;
use vecsort_settings::Config;

use crate::error::Result;

/// Statistics for one pass before and after reordering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassReport {
    pub pass: Pass,
    /// Measured in stored (insertion) order.
    pub before: CutStats,
    /// Measured in tour order.
    pub after: CutStats,
}

/// What a completed job did.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub termination: Termination,
    pub segments_read: usize,
    pub dropped: usize,
    pub passes: Vec<PassReport>,
    /// Cursor after the last pass.
    pub cursor: Cursor,
}

impl RunSummary {
    pub fn total_transit_before(&self) -> f64 {
        self.passes.iter().map(|p| p.before.transit_length).sum()
    }

    pub fn total_transit_after(&self) -> f64 {
        self.passes.iter().map(|p| p.after.transit_length).sum()
    }
}

/// Runs one job from `input` to `output`, writing statistics to
/// `diagnostics`.
///
/// Fatal parse errors are returned before anything is written to `output`.
/// An unknown command ends parsing early but the job still completes with
/// whatever was read.
pub fn run<R, W, D>(input: R, output: W, diagnostics: D, config: &Config) -> Result<RunSummary>
where
    R: BufRead,
    W: Write,
    D: Write,
{
    let mut parsed = config.command_parser().parse(input)?;

    let mut reporter = StatsReporter::new(diagnostics);
    reporter.termination(parsed.termination)?;
    reporter.segments_read(parsed.segments_read)?;

    let before: Vec<CutStats> = parsed.sets.iter().map(CutStats::measure).collect();
    for (pass, stats) in Pass::ALL.iter().zip(&before) {
        reporter.pass_stats(*pass, stats)?;
    }
    reporter.separator()?;

    let builder = TourBuilder::new();
    let mut cursor = config.start_cursor();
    let mut emitter = Emitter::new(output).with_precision(config.output.precision);
    let mut passes = Vec::with_capacity(Pass::COUNT);

    for (pass, before) in Pass::ALL.into_iter().zip(before) {
        debug!(%pass, start_x = cursor.position().x, start_y = cursor.position().y, "optimizing pass");

        let tour = builder.optimize(parsed.sets.get_mut(pass), &mut cursor);
        let after = CutStats::measure(&tour);
        reporter.pass_stats(pass, &after)?;
        emitter.emit_tour(&tour)?;

        passes.push(PassReport {
            pass,
            before,
            after,
        });
    }

    emitter.flush()?;
    reporter.flush()?;

    let summary = RunSummary {
        termination: parsed.termination,
        segments_read: parsed.segments_read,
        dropped: parsed.sets.total_dropped(),
        passes,
        cursor,
    };

    info!(
        groups = emitter.groups(),
        transit_before = summary.total_transit_before(),
        transit_after = summary.total_transit_after(),
        "job complete"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vecsort_core::Point;

    fn run_str(input: &str) -> (RunSummary, String, String) {
        let mut out = Vec::new();
        let mut diag = Vec::new();
        let summary = run(input.as_bytes(), &mut out, &mut diag, &Config::default()).unwrap();
        (
            summary,
            String::from_utf8(out).unwrap(),
            String::from_utf8(diag).unwrap(),
        )
    }

    #[test]
    fn test_empty_input() {
        let (summary, out, diag) = run_str("");
        assert_eq!(out, "");
        assert_eq!(summary.termination, Termination::EndOfInput);
        assert_eq!(summary.passes.len(), 3);
        assert!(diag.starts_with("read 0 segments\n"));
    }

    #[test]
    fn test_cursor_is_threaded_across_passes() {
        let input = "P0,255,0\nM0,0\nL40,0\nP0,0,255\nM0,0\nL39,0\nX\n";
        let (summary, out, _) = run_str(input);

        // Red starts from (40,0), so (39,0) is taken first and the segment is reversed.
        assert_eq!(
            out,
            ";PU0.000,0.000;PD0.000,40.000;PU0.000,39.000;PD0.000,0.000"
        );
        assert_eq!(summary.cursor.position(), Point::ORIGIN);
    }

    #[test]
    fn test_reordering_reduces_transit() {
        let input = "M0,0\nL1,0\nM100,0\nL101,0\nM2,0\nL3,0\nX\n";
        let (summary, _, _) = run_str(input);
        let green = summary.passes[0];
        assert!(green.after.transit_length < green.before.transit_length);
        assert_eq!(green.after.cuts, green.before.cuts);
    }
}
