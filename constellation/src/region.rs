use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constellation::Slot;
use crate::error::ConfigError;

/// Surface a sampled point is projected onto: gives `z` for a given `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Surface {
    /// Horizontal plane at height `z`.
    Flat { z: f64 },
    /// Plane tilted about the x axis: `z = slope * y + intercept`.
    LinearInY { slope: f64, intercept: f64 },
}

impl Surface {
    /// Plane inclined by `degrees` from the xy plane, passing through
    /// `z = intercept` at `y = 0`. Positive angles fall towards +y.
    pub fn inclined(degrees: f64, intercept: f64) -> Self {
        Surface::LinearInY {
            slope: -1.0 / degrees.to_radians().tan(),
            intercept,
        }
    }

    #[inline]
    pub fn z_at(&self, _x: f64, y: f64) -> f64 {
        match *self {
            Surface::Flat { z } => z,
            Surface::LinearInY { slope, intercept } => slope * y + intercept,
        }
    }

    fn is_finite(&self) -> bool {
        match *self {
            Surface::Flat { z } => z.is_finite(),
            Surface::LinearInY { slope, intercept } => slope.is_finite() && intercept.is_finite(),
        }
    }
}

/// Where a single marker may be placed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegionConstraint {
    /// Axis-aligned box in xy, projected onto `surface`. Equal bounds pin the
    /// coordinate.
    Bounded {
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
        surface: Surface,
    },
    /// Exact point, copied verbatim.
    Fixed { point: DVec3 },
}

impl RegionConstraint {
    pub fn bounded(x: (f64, f64), y: (f64, f64), surface: Surface) -> Self {
        RegionConstraint::Bounded {
            min_x: x.0,
            max_x: x.1,
            min_y: y.0,
            max_y: y.1,
            surface,
        }
    }

    pub fn fixed(point: DVec3) -> Self {
        RegionConstraint::Fixed { point }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, RegionConstraint::Fixed { .. })
    }

    /// Rejects inverted, non-finite or overflowing bounds. `face` and `slot` only label
    /// the error.
    pub fn validate(&self, face: &'static str, slot: Slot) -> Result<(), ConfigError> {
        match *self {
            RegionConstraint::Bounded {
                min_x,
                max_x,
                min_y,
                max_y,
                surface,
            } => {
                let finite = [min_x, max_x, min_y, max_y].iter().all(|v| v.is_finite());
                if !finite || !surface.is_finite() {
                    return Err(ConfigError::NonFiniteRegion { face, slot });
                }
                for (axis, min, max) in [("x", min_x, max_x), ("y", min_y, max_y)] {
                    if min > max {
                        return Err(ConfigError::InvertedBounds {
                            face,
                            slot,
                            axis,
                            min,
                            max,
                        });
                    }
                    // The sampler draws `min + t * (max - min)`.
                    if !(max - min).is_finite() {
                        return Err(ConfigError::NonFiniteRegion { face, slot });
                    }
                }
                Ok(())
            }
            RegionConstraint::Fixed { point } => {
                if point.is_finite() {
                    Ok(())
                } else {
                    Err(ConfigError::NonFiniteRegion { face, slot })
                }
            }
        }
    }
}
