use glam::DVec3;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

use crate::pair::PairSet;
use crate::segment::SegmentSet;

/// Number of markers in one constellation.
pub const POINT_COUNT: usize = 4;

/// Named position of a marker inside a constellation.
#[repr(usize)]
#[derive(
    Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Slot {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
}

impl Slot {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Slot> {
        Slot::iter().find(|slot| slot.index() == index)
    }
}

/// A rigid four-point marker body. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Constellation {
    name: String,
    points: [DVec3; POINT_COUNT],
}

impl Constellation {
    pub fn new(name: impl Into<String>, points: [DVec3; POINT_COUNT]) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn points(&self) -> &[DVec3; POINT_COUNT] {
        &self.points
    }

    #[inline]
    pub fn point(&self, slot: Slot) -> DVec3 {
        self.points[slot.index()]
    }

    pub fn segments(&self) -> SegmentSet {
        SegmentSet::compute(&self.points)
    }

    pub fn pairs(&self) -> PairSet {
        PairSet::compute(&self.segments())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_indices_follow_declaration_order() {
        let indices: Vec<usize> = Slot::iter().map(Slot::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        assert_eq!(Slot::from_index(2), Some(Slot::C));
        assert_eq!(Slot::from_index(4), None);
        assert_eq!(Slot::D.to_string(), "D");
    }

    #[test]
    fn test_point_lookup_by_slot() {
        let constellation = Constellation::new(
            "Gen Array 1",
            [
                DVec3::new(-30.0, 50.0, 0.0),
                DVec3::new(30.0, 60.0, 0.0),
                DVec3::new(25.0, -40.0, 0.0),
                DVec3::new(-20.0, -80.0, 0.0),
            ],
        );

        assert_eq!(constellation.name(), "Gen Array 1");
        assert_eq!(constellation.point(Slot::C), DVec3::new(25.0, -40.0, 0.0));
        assert_eq!(constellation.segments().len(), 6);
        assert_eq!(constellation.pairs().len(), 15);
    }
}
