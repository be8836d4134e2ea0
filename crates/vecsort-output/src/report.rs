//! Diagnostic statistics written alongside the device stream.

use std::io::{self, Write};
use tracing::info;
use vecsort_core::{CutStats, Pass};
use vecsort_parser::Termination;

/// Writes the plain-text diagnostics block.
///
/// ```text
/// read 2 segments
/// Cuts: 3 len 34
/// Move: 0 len 0
/// ...
/// ---
/// Cuts: 3 len 34
/// Move: 0 len 0
/// ...
/// ```
#[derive(Debug)]
pub struct StatsReporter<W: Write> {
    writer: W,
}

impl<W: Write> StatsReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Notes an early stop. Written without a newline so the read count
    /// follows on the same line.
    pub fn termination(&mut self, termination: Termination) -> io::Result<()> {
        if let Termination::UnknownCommand(letter) = termination {
            write!(self.writer, "Unknown command '{}'", letter)?;
        }
        Ok(())
    }

    pub fn segments_read(&mut self, count: usize) -> io::Result<()> {
        writeln!(self.writer, "read {} segments", count)
    }

    pub fn pass_stats(&mut self, pass: Pass, stats: &CutStats) -> io::Result<()> {
        info!(
            %pass,
            cuts = stats.cuts,
            cut_length = stats.cut_length,
            transits = stats.transits,
            transit_length = stats.transit_length,
            "pass statistics"
        );
        writeln!(self.writer, "Cuts: {} len {:.0}", stats.cuts, stats.cut_length)?;
        writeln!(
            self.writer,
            "Move: {} len {:.0}",
            stats.transits, stats.transit_length
        )
    }

    /// Line between the before and after blocks.
    pub fn separator(&mut self) -> io::Result<()> {
        writeln!(self.writer, "---")
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(f: impl FnOnce(&mut StatsReporter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut reporter = StatsReporter::new(Vec::new());
        f(&mut reporter).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_pass_stats_lines() {
        let stats = CutStats {
            cuts: 3,
            cut_length: 34.142,
            transits: 2,
            transit_length: 7.9,
        };
        assert_eq!(
            report(|r| r.pass_stats(Pass::Green, &stats)),
            "Cuts: 3 len 34\nMove: 2 len 8\n"
        );
    }

    #[test]
    fn test_read_count_and_separator() {
        assert_eq!(
            report(|r| {
                r.segments_read(5)?;
                r.separator()
            }),
            "read 5 segments\n---\n"
        );
    }

    #[test]
    fn test_unknown_command_prefix() {
        assert_eq!(
            report(|r| {
                r.termination(Termination::UnknownCommand('Q'))?;
                r.segments_read(1)
            }),
            "Unknown command 'Q'read 1 segments\n"
        );
    }

    #[test]
    fn test_normal_termination_is_silent() {
        assert_eq!(report(|r| r.termination(Termination::EndMarker)), "");
    }
}
