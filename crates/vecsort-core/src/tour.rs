//! Greedy nearest-neighbor ordering of a pass.
//!
//! The builder repeatedly pulls the segment with the endpoint closest to the
//! tool position, cuts it from that endpoint and moves the tool to its other
//! end. Picking a segment consumes both endpoints; segments are never split.
//! There is no improvement pass, so the result is a fast approximation rather
//! than an optimal tour.

use tracing::debug;

use crate::geometry::{Point, Segment};
use crate::segment_set::SegmentSet;

/// Tool position used as the reference for nearest-neighbor search.
///
/// A single cursor is carried through every pass of a job: the end of one
/// pass's tour is where the search for the next pass starts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cursor {
    position: Point,
}

impl Cursor {
    pub fn new(position: Point) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn move_to(&mut self, position: Point) {
        self.position = position;
    }
}

/// Ordered cut sequence for one pass.
pub type Tour = Vec<Segment>;

/// Builds tours by greedy nearest-neighbor extraction.
#[derive(Debug, Default, Clone, Copy)]
pub struct TourBuilder;

impl TourBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Drains `set` into a tour, advancing `cursor` to the end of every
    /// segment taken.
    ///
    /// # Panics
    ///
    /// Panics if the set reports members but the closest-point search finds
    /// none, which means the set's links are corrupted.
    pub fn optimize(&self, set: &mut SegmentSet, cursor: &mut Cursor) -> Tour {
        let pass = set.pass();
        let mut tour = Vec::with_capacity(set.len());

        while !set.is_empty() {
            let Some(segment) = set.extract_closest(cursor.position()) else {
                panic!(
                    "closest-point search found nothing in a {} pass set holding {} segments",
                    pass,
                    set.len()
                );
            };

            cursor.move_to(segment.end);
            tour.push(segment);
        }

        debug!(
            %pass,
            segments = tour.len(),
            cursor_x = cursor.position().x,
            cursor_y = cursor.position().y,
            "pass optimized"
        );

        tour
    }
}
