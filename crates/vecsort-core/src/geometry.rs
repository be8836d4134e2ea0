//! Points, color passes and directed cut segments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position on the work area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance, used for nearest-neighbor comparisons.
    pub fn distance_sq_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        self.distance_sq_to(other).sqrt()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Color pass a segment belongs to.
///
/// The discriminant is the pass index and the order in which passes are cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pass {
    Green = 0,
    Red = 1,
    Blue = 2,
}

impl Pass {
    /// Number of color passes.
    pub const COUNT: usize = 3;

    /// All passes in cutting order.
    pub const ALL: [Pass; Pass::COUNT] = [Pass::Green, Pass::Red, Pass::Blue];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Green => write!(f, "green"),
            Self::Red => write!(f, "red"),
            Self::Blue => write!(f, "blue"),
        }
    }
}

/// A directed straight cut from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub pass: Pass,
}

impl Segment {
    pub fn new(start: Point, end: Point, pass: Pass) -> Self {
        Self { start, end, pass }
    }

    /// True when both endpoints coincide exactly.
    pub fn is_degenerate(&self) -> bool {
        self.start == self.end
    }

    /// Exact endpoint match in either direction. The pass is not compared.
    pub fn matches(&self, start: Point, end: Point) -> bool {
        (self.start == start && self.end == end) || (self.start == end && self.end == start)
    }

    /// The same cut traversed the other way.
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            pass: self.pass,
        }
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}
