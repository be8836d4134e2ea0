//! Pen-up/pen-down command emitter.
//!
//! Output groups look like `;PU<y1>,<x1>;PD<y2>,<x2>[,<y3>,<x3>...]`. Axes are
//! swapped relative to the input and every coordinate is fixed-point.
//! A new group starts with the first segment of every pass and whenever a
//! segment does not begin where the pen is; otherwise the segment's end is
//! appended to the running polyline.

use std::io::{self, Write};
use vecsort_core::{Point, Segment};

/// Default number of decimals per coordinate.
pub const DEFAULT_PRECISION: usize = 3;

/// Writes tours to a device command stream.
#[derive(Debug)]
pub struct Emitter<W: Write> {
    writer: W,
    precision: usize,
    groups: usize,
}

impl<W: Write> Emitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            precision: DEFAULT_PRECISION,
            groups: 0,
        }
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Number of pen-down groups written so far.
    pub fn groups(&self) -> usize {
        self.groups
    }

    /// Emits one pass. Pen state does not carry over from the previous pass.
    pub fn emit_tour(&mut self, tour: &[Segment]) -> io::Result<()> {
        let mut pen: Option<Point> = None;

        for segment in tour {
            if pen != Some(segment.start) {
                write!(self.writer, ";PU")?;
                self.write_point(segment.start)?;
                write!(self.writer, ";PD")?;
                self.write_point(segment.end)?;
                self.groups += 1;
            } else {
                write!(self.writer, ",")?;
                self.write_point(segment.end)?;
            }
            pen = Some(segment.end);
        }

        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_point(&mut self, point: Point) -> io::Result<()> {
        let precision = self.precision;
        write!(
            self.writer,
            "{:.*},{:.*}",
            precision, point.y, precision, point.x
        )
    }
}
