//! Per-pass segment storage with duplicate suppression.
//!
//! Segments live in a slot arena threaded by `prev`/`next` indices, so the
//! scan order is always the insertion order of the surviving members and any
//! member can be unlinked in O(1). Freed slots are recycled through a free list.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{SegmentSetError, SegmentSetResult};
use crate::geometry::{Pass, Point, Segment};

/// What to do when storage for a new segment cannot be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AllocFailurePolicy {
    /// Drop the segment, count it and keep going.
    #[default]
    Drop,
    /// Report [`SegmentSetError::StorageExhausted`] to the caller.
    Error,
}

/// Result of a successful [`SegmentSet::insert`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// An equal segment (same or reversed endpoints) is already stored.
    Duplicate,
    /// Both endpoints coincide.
    Degenerate,
    /// Storage was exhausted and the policy is [`AllocFailurePolicy::Drop`].
    Dropped,
}

#[derive(Debug, Clone)]
struct Slot {
    segment: Segment,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Unordered collection of distinct, non-degenerate segments for one pass.
#[derive(Debug, Clone)]
pub struct SegmentSet {
    pass: Pass,
    slots: Vec<Slot>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    policy: AllocFailurePolicy,
    capacity_limit: Option<usize>,
    dropped: usize,
}

impl SegmentSet {
    /// Creates an empty set for `pass` with the default drop policy.
    pub fn new(pass: Pass) -> Self {
        Self {
            pass,
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
            policy: AllocFailurePolicy::default(),
            capacity_limit: None,
            dropped: 0,
        }
    }

    /// Sets the storage exhaustion policy.
    pub fn with_policy(mut self, policy: AllocFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Caps the number of stored segments. Reaching the cap is handled
    /// exactly like a failed allocation.
    pub fn with_capacity_limit(mut self, limit: Option<usize>) -> Self {
        self.capacity_limit = limit;
        self
    }

    pub fn pass(&self) -> Pass {
        self.pass
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of segments lost to storage exhaustion under the drop policy.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Iterates members in scan order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            set: self,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Adds the segment `(x1,y1)-(x2,y2)` unless it is degenerate or already
    /// present in either direction. Comparisons are exact.
    pub fn insert(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> SegmentSetResult<InsertOutcome> {
        let start = Point::new(x1, y1);
        let end = Point::new(x2, y2);

        if start == end {
            return Ok(InsertOutcome::Degenerate);
        }

        if self.iter().any(|existing| existing.matches(start, end)) {
            return Ok(InsertOutcome::Duplicate);
        }

        let segment = Segment::new(start, end, self.pass);
        let Some(index) = self.allocate(segment) else {
            return self.storage_exhausted();
        };

        self.link_back(index);
        Ok(InsertOutcome::Inserted)
    }

    /// Removes and returns the member with the endpoint closest to `from`.
    ///
    /// Ties go to the first endpoint met in scan order. When the winning
    /// endpoint is the segment's end, the segment is returned reversed so
    /// that its start is always the chosen point.
    pub fn extract_closest(&mut self, from: Point) -> Option<Segment> {
        let mut best: Option<(usize, bool)> = None;
        let mut best_dist = f64::INFINITY;

        // The first endpoint scanned always wins its comparison: squared
        // distances of huge finite coordinates overflow to infinity.
        let mut cursor = self.head;
        while let Some(index) = cursor {
            let slot = &self.slots[index];

            let dist_start = from.distance_sq_to(&slot.segment.start);
            if best.is_none() || dist_start < best_dist {
                best = Some((index, false));
                best_dist = dist_start;
            }

            let dist_end = from.distance_sq_to(&slot.segment.end);
            if dist_end < best_dist {
                best = Some((index, true));
                best_dist = dist_end;
            }

            cursor = slot.next;
        }

        let (index, reverse) = best?;
        self.unlink(index);

        let segment = self.slots[index].segment;
        Some(if reverse { segment.reversed() } else { segment })
    }

    fn allocate(&mut self, segment: Segment) -> Option<usize> {
        if self.capacity_limit.is_some_and(|limit| self.len >= limit) {
            return None;
        }

        let slot = Slot {
            segment,
            prev: None,
            next: None,
        };

        if let Some(index) = self.free.pop() {
            self.slots[index] = slot;
            return Some(index);
        }

        // Reserve room in the free list too so unlinking never allocates.
        if self.slots.try_reserve(1).is_err() || self.free.try_reserve(self.slots.len() + 1).is_err()
        {
            return None;
        }
        self.slots.push(slot);
        Some(self.slots.len() - 1)
    }

    fn storage_exhausted(&mut self) -> SegmentSetResult<InsertOutcome> {
        match self.policy {
            AllocFailurePolicy::Drop => {
                self.dropped += 1;
                warn!(
                    pass = %self.pass,
                    stored = self.len,
                    dropped = self.dropped,
                    "segment storage exhausted, dropping segment"
                );
                Ok(InsertOutcome::Dropped)
            }
            AllocFailurePolicy::Error => Err(SegmentSetError::StorageExhausted {
                pass: self.pass,
                stored: self.len,
            }),
        }
    }

    fn link_back(&mut self, index: usize) {
        self.slots[index].prev = self.tail;
        self.slots[index].next = None;
        match self.tail {
            Some(tail) => self.slots[tail].next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
    }

    fn unlink(&mut self, index: usize) {
        let prev = self.slots[index].prev;
        let next = self.slots[index].next;

        match prev {
            Some(prev) => self.slots[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.slots[next].prev = prev,
            None => self.tail = prev,
        }

        self.slots[index].prev = None;
        self.slots[index].next = None;
        self.free.push(index);
        self.len -= 1;
    }
}

/// Scan-order iterator over a [`SegmentSet`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    set: &'a SegmentSet,
    next: Option<usize>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        let slot = &self.set.slots[index];
        self.next = slot.next;
        self.remaining -= 1;
        Some(&slot.segment)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a SegmentSet {
    type Item = &'a Segment;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One [`SegmentSet`] per color pass.
#[derive(Debug, Clone)]
pub struct PassSets {
    sets: [SegmentSet; Pass::COUNT],
}

impl PassSets {
    pub fn new(policy: AllocFailurePolicy, capacity_limit: Option<usize>) -> Self {
        let make = |pass| {
            SegmentSet::new(pass)
                .with_policy(policy)
                .with_capacity_limit(capacity_limit)
        };
        Self {
            sets: Pass::ALL.map(make),
        }
    }

    pub fn get(&self, pass: Pass) -> &SegmentSet {
        &self.sets[pass.index()]
    }

    pub fn get_mut(&mut self, pass: Pass) -> &mut SegmentSet {
        &mut self.sets[pass.index()]
    }

    /// Sets in pass order.
    pub fn iter(&self) -> impl Iterator<Item = &SegmentSet> {
        self.sets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SegmentSet> {
        self.sets.iter_mut()
    }

    pub fn total_len(&self) -> usize {
        self.sets.iter().map(SegmentSet::len).sum()
    }

    pub fn total_dropped(&self) -> usize {
        self.sets.iter().map(SegmentSet::dropped).sum()
    }
}

impl Default for PassSets {
    fn default() -> Self {
        Self::new(AllocFailurePolicy::default(), None)
    }
}
