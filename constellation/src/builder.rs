use glam::DVec3;
use rand::Rng;

use strum::IntoEnumIterator;

use crate::constellation::{Constellation, Slot, POINT_COUNT};
use crate::error::ConfigError;
use crate::point::sample_point;
use crate::region::RegionConstraint;

/// Samples a four-point candidate, one region per slot in order A, B, C, D.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstellationBuilder {
    regions: [RegionConstraint; POINT_COUNT],
}

impl ConstellationBuilder {
    pub fn new(regions: [RegionConstraint; POINT_COUNT]) -> Self {
        Self { regions }
    }

    /// Builder for a face that shares an edge with `base`: slot A is pinned to
    /// `base[links[0]]`, slot B to `base[links[1]]`, and C, D are drawn from
    /// `free`.
    pub fn linked(base: &Constellation, links: [Slot; 2], free: [RegionConstraint; 2]) -> Self {
        Self::new([
            RegionConstraint::fixed(base.point(links[0])),
            RegionConstraint::fixed(base.point(links[1])),
            free[0],
            free[1],
        ])
    }

    pub fn regions(&self) -> &[RegionConstraint; POINT_COUNT] {
        &self.regions
    }

    /// Checks every region before sampling. Errors are labelled with the
    /// `candidate` face.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (region, slot) in self.regions.iter().zip(Slot::iter()) {
            region.validate("candidate", slot)?;
        }
        Ok(())
    }

    pub fn build<R: Rng>(&self, rng: &mut R) -> [DVec3; POINT_COUNT] {
        let mut points = [DVec3::ZERO; POINT_COUNT];
        for (point, region) in points.iter_mut().zip(&self.regions) {
            *point = sample_point(region, rng);
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::region::Surface;

    fn flat_box() -> RegionConstraint {
        RegionConstraint::bounded((0.0, 40.0), (0.0, 70.0), Surface::Flat { z: 0.0 })
    }

    #[test]
    fn test_builds_one_point_per_region() {
        let builder = ConstellationBuilder::new([flat_box(); POINT_COUNT]);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let points = builder.build(&mut rng);

        for p in points {
            assert!((0.0..=40.0).contains(&p.x));
            assert!((0.0..=70.0).contains(&p.y));
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_linked_face_shares_edge_with_base() {
        let top = Constellation::new(
            "Gen Two Face Array 1 - Top",
            [
                DVec3::new(-31.2, 64.0, -31.77),
                DVec3::new(28.4, 88.1, -45.69),
                DVec3::new(40.3, 0.0, 6.0),
                DVec3::new(-22.7, 0.0, 6.0),
            ],
        );
        let free = [
            RegionConstraint::bounded((10.0, 50.0), (-100.0, -30.0), Surface::inclined(-60.0, -5.18)),
            RegionConstraint::bounded((-50.0, -10.0), (-100.0, -30.0), Surface::inclined(-60.0, -5.18)),
        ];
        let builder = ConstellationBuilder::linked(&top, [Slot::D, Slot::C], free);
        let mut rng = ChaCha8Rng::seed_from_u64(5);

        for _ in 0..20 {
            let bottom = builder.build(&mut rng);
            assert_eq!(bottom[Slot::A.index()], top.point(Slot::D));
            assert_eq!(bottom[Slot::B.index()], top.point(Slot::C));
            assert!((-100.0..=-30.0).contains(&bottom[Slot::C.index()].y));
            assert!((-100.0..=-30.0).contains(&bottom[Slot::D.index()].y));
        }
        assert!(builder.regions()[0].is_fixed() && builder.regions()[1].is_fixed());
        assert!(!builder.regions()[2].is_fixed());
        assert!(builder.validate().is_ok());
    }

    #[test]
    fn test_validate_names_the_broken_slot() {
        let inverted = RegionConstraint::bounded((50.0, 10.0), (0.0, 100.0), Surface::Flat { z: 0.0 });
        let builder = ConstellationBuilder::new([flat_box(), flat_box(), inverted, flat_box()]);
        assert!(matches!(
            builder.validate(),
            Err(ConfigError::InvertedBounds {
                face: "candidate",
                slot: Slot::C,
                axis: "x",
                ..
            })
        ));
    }
}
