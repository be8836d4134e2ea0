//! Cut and transit totals for a sequence of segments.

use crate::geometry::{Point, Segment};

/// Aggregate lengths and counts for one segment sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CutStats {
    /// Number of non-degenerate cuts.
    pub cuts: usize,
    /// Summed length of those cuts.
    pub cut_length: f64,
    /// Number of non-zero gaps the tool travels with the laser off.
    pub transits: usize,
    /// Summed length of those gaps.
    pub transit_length: f64,
}

impl CutStats {
    /// Measures `segments` in the given order, with the tool starting at the
    /// origin. Zero-length cuts and gaps are left out of both counts and sums.
    pub fn measure<'a, I>(segments: I) -> Self
    where
        I: IntoIterator<Item = &'a Segment>,
    {
        let mut stats = Self::default();
        let mut position = Point::ORIGIN;

        for segment in segments {
            let transit = position.distance_to(&segment.start);
            if transit != 0.0 {
                stats.transits += 1;
                stats.transit_length += transit;
            }

            let cut = segment.length();
            if cut != 0.0 {
                stats.cuts += 1;
                stats.cut_length += cut;
            }

            position = segment.end;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Pass;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::new(Point::new(x1, y1), Point::new(x2, y2), Pass::Green)
    }

    #[test]
    fn test_empty_sequence() {
        let stats = CutStats::measure(&Vec::<Segment>::new());
        assert_eq!(stats, CutStats::default());
    }

    #[test]
    fn test_contiguous_run_has_no_transits() {
        let path = vec![
            seg(0.0, 0.0, 3.0, 0.0),
            seg(3.0, 0.0, 3.0, 4.0),
            seg(3.0, 4.0, 0.0, 0.0),
        ];
        let stats = CutStats::measure(&path);
        assert_eq!(stats.cuts, 3);
        assert_eq!(stats.cut_length, 12.0);
        assert_eq!(stats.transits, 0);
        assert_eq!(stats.transit_length, 0.0);
    }

    #[test]
    fn test_transit_from_origin_and_between_cuts() {
        let path = vec![seg(3.0, 4.0, 3.0, 5.0), seg(3.0, 8.0, 3.0, 9.0)];
        let stats = CutStats::measure(&path);
        assert_eq!(stats.transits, 2);
        assert_eq!(stats.transit_length, 8.0);
        assert_eq!(stats.cuts, 2);
        assert_eq!(stats.cut_length, 2.0);
    }

    #[test]
    fn test_degenerate_cut_not_counted() {
        let path = vec![seg(0.0, 0.0, 0.0, 0.0)];
        let stats = CutStats::measure(&path);
        assert_eq!(stats.cuts, 0);
        assert_eq!(stats.transits, 0);
    }
}
