use glam::DVec3;

use crate::constellation::{Slot, POINT_COUNT};

/// C(4, 2) segments per constellation.
pub const SEGMENT_COUNT: usize = 6;

/// Endpoints of every segment, in enumeration order (i < j, lexicographic).
pub const SEGMENT_ENDPOINTS: [(Slot, Slot); SEGMENT_COUNT] = [
    (Slot::A, Slot::B),
    (Slot::A, Slot::C),
    (Slot::A, Slot::D),
    (Slot::B, Slot::C),
    (Slot::B, Slot::D),
    (Slot::C, Slot::D),
];

/// Line between two markers: `direction = to - from`, `length = |direction|`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Slot,
    pub to: Slot,
    pub direction: DVec3,
    pub length: f64,
}

impl Segment {
    pub fn new(from: Slot, to: Slot, points: &[DVec3; POINT_COUNT]) -> Self {
        let direction = points[to.index()] - points[from.index()];
        Self {
            from,
            to,
            direction,
            length: direction.length(),
        }
    }

    /// Two-letter name, e.g. `AB`.
    pub fn name(&self) -> String {
        format!("{}{}", self.from, self.to)
    }
}

/// All six segments of a constellation in [`SEGMENT_ENDPOINTS`] order.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSet {
    segments: [Segment; SEGMENT_COUNT],
}

impl SegmentSet {
    pub fn compute(points: &[DVec3; POINT_COUNT]) -> Self {
        Self {
            segments: SEGMENT_ENDPOINTS.map(|(from, to)| Segment::new(from, to, points)),
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> &Segment {
        &self.segments[index]
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        SEGMENT_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn lengths(&self) -> [f64; SEGMENT_COUNT] {
        self.segments.map(|segment| segment.length)
    }
}

/// Name of the segment at `index` in enumeration order.
pub fn segment_name(index: usize) -> String {
    let (from, to) = SEGMENT_ENDPOINTS[index];
    format!("{}{}", from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rectangle() -> [DVec3; POINT_COUNT] {
        [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(60.0, 0.0, 0.0),
            DVec3::new(60.0, 80.0, 0.0),
            DVec3::new(0.0, 80.0, 0.0),
        ]
    }

    #[test]
    fn test_enumerates_six_segments_in_lexicographic_order() {
        let set = SegmentSet::compute(&rectangle());
        let names: Vec<String> = set.iter().map(Segment::name).collect();
        assert_eq!(names, vec!["AB", "AC", "AD", "BC", "BD", "CD"]);
        for (index, segment) in set.iter().enumerate() {
            assert_eq!(segment_name(index), segment.name());
        }
    }

    #[test]
    fn test_direction_points_from_lower_to_higher_slot() {
        let set = SegmentSet::compute(&rectangle());
        // AC: C - A
        assert_eq!(set.get(1).direction, DVec3::new(60.0, 80.0, 0.0));
        // CD: D - C
        assert_eq!(set.get(5).direction, DVec3::new(-60.0, 0.0, 0.0));
    }

    #[test]
    fn test_lengths_are_euclidean_norms() {
        let set = SegmentSet::compute(&rectangle());
        let lengths = set.lengths();
        assert_eq!(lengths, [60.0, 100.0, 80.0, 80.0, 100.0, 60.0]);
    }

    #[test]
    fn test_lengths_include_z() {
        let points = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(0.0, 0.0, 50.0),
            DVec3::new(30.0, 0.0, 0.0),
            DVec3::new(0.0, 40.0, 0.0),
        ];
        let set = SegmentSet::compute(&points);
        assert!((set.get(0).length - 50.0).abs() < 1e-12);
        // BC: (30, 0, -50)
        assert!((set.get(3).length - 3400.0_f64.sqrt()).abs() < 1e-12);
    }
}
