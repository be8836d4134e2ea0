//! # vecsort Core
//!
//! Core types and algorithms for vecsort.
//! Provides the segment storage used while parsing a vector job and the
//! nearest-neighbor tour construction that orders each color pass.
//!
//! ## Pipeline position
//!
//! 1. **Parser** fills one [`SegmentSet`] per [`Pass`]
//! 2. **TourBuilder** drains each set into a [`Tour`], threading one [`Cursor`]
//!    through all passes
//! 3. **Emitter** serializes the tours for the device

pub mod error;
pub mod geometry;
pub mod segment_set;
pub mod stats;
pub mod tour;

pub use error::{SegmentSetError, SegmentSetResult};
pub use geometry::{Pass, Point, Segment};
pub use segment_set::{AllocFailurePolicy, InsertOutcome, PassSets, SegmentSet};
pub use stats::CutStats;
pub use tour::{Cursor, Tour, TourBuilder};
