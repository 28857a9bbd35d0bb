use common::float_ext::FloatExt;
use glam::DVec3;
use rand::Rng;

use crate::region::RegionConstraint;

/// Sampled x and y are rounded to this many decimals.
pub const COORDINATE_DECIMALS: u32 = 1;

/// Draws one point inside `region`.
///
/// Fixed regions return their point unchanged. Bounded regions draw x and y
/// uniformly from the inclusive bounds, round both to [`COORDINATE_DECIMALS`]
/// and lift the result onto the region's surface. Bounds must have passed
/// [`RegionConstraint::validate`]; inverted or overflowing bounds panic.
pub fn sample_point<R: Rng>(region: &RegionConstraint, rng: &mut R) -> DVec3 {
    match *region {
        RegionConstraint::Fixed { point } => point,
        RegionConstraint::Bounded {
            min_x,
            max_x,
            min_y,
            max_y,
            surface,
        } => {
            debug_assert!(min_x <= max_x && min_y <= max_y, "unvalidated region");

            let x = rng
                .random_range(min_x..=max_x)
                .round_to_decimals(COORDINATE_DECIMALS);
            let y = rng
                .random_range(min_y..=max_y)
                .round_to_decimals(COORDINATE_DECIMALS);
            DVec3::new(x, y, surface.z_at(x, y))
        }
    }
}
