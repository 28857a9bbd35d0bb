//! Run configuration and the built-in marker body presets.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, IntoStaticStr};

use crate::constellation::{Slot, POINT_COUNT};
use crate::error::ConfigError;
use crate::region::{RegionConstraint, Surface};
use crate::validator::Tolerances;

/// Upper bound on sampling attempts per face before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1_000_000;

/// Role of a face inside a body. Also selects the row name suffix.
#[derive(Debug, Display, IntoStaticStr, Clone, Copy, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum FaceKind {
    Single,
    Top,
    Bottom,
}

impl FaceKind {
    /// Persisted name of this face of body number `index` (1-based).
    pub fn face_name(self, base_name: &str, index: usize) -> String {
        match self {
            FaceKind::Single => format!("{} {}", base_name, index),
            FaceKind::Top => format!("{} {} - Top", base_name, index),
            FaceKind::Bottom => format!("{} {} - Bottom", base_name, index),
        }
    }
}

fn default_links() -> [Slot; 2] {
    [Slot::D, Slot::C]
}

/// Shape of one marker body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyLayout {
    /// One planar constellation per body.
    SingleFace {
        points: [RegionConstraint; POINT_COUNT],
    },
    /// Two constellations sharing an edge. The bottom face's A and B are the
    /// top face's `links[0]` and `links[1]`; its C and D come from `bottom`.
    TwoFace {
        top: [RegionConstraint; POINT_COUNT],
        bottom: [RegionConstraint; 2],
        #[serde(default = "default_links")]
        links: [Slot; 2],
    },
}

impl BodyLayout {
    pub fn face_count(&self) -> usize {
        match self {
            BodyLayout::SingleFace { .. } => 1,
            BodyLayout::TwoFace { .. } => 2,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            BodyLayout::SingleFace { points } => validate_regions(FaceKind::Single, points, Slot::A),
            BodyLayout::TwoFace { top, bottom, links } => {
                validate_regions(FaceKind::Top, top, Slot::A)?;
                validate_regions(FaceKind::Bottom, bottom, Slot::C)?;
                if links[0] == links[1] {
                    return Err(ConfigError::DuplicateLinks(links[0], links[1]));
                }
                Ok(())
            }
        }
    }
}

fn validate_regions(
    face: FaceKind,
    regions: &[RegionConstraint],
    first_slot: Slot,
) -> Result<(), ConfigError> {
    for (region, slot) in regions.iter().zip(Slot::iter().skip(first_slot.index())) {
        region.validate(face.into(), slot)?;
    }
    Ok(())
}

/// Everything a generation run needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of bodies to generate.
    pub num_arrays: usize,
    /// Prefix of every persisted constellation name.
    pub base_name: String,
    pub layout: BodyLayout,
    #[serde(default)]
    pub tolerances: Tolerances,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Seed for reproducible runs (None for OS entropy).
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

impl GeneratorConfig {
    /// Flat single-face bodies: A and B above the x axis, C and D below.
    pub fn single_face() -> Self {
        let flat = Surface::Flat { z: 0.0 };
        Self {
            num_arrays: 2,
            base_name: "Gen Array".to_string(),
            layout: BodyLayout::SingleFace {
                points: [
                    RegionConstraint::bounded((-50.0, -10.0), (30.0, 100.0), flat),
                    RegionConstraint::bounded((10.0, 50.0), (30.0, 100.0), flat),
                    RegionConstraint::bounded((10.0, 50.0), (-100.0, -30.0), flat),
                    RegionConstraint::bounded((-50.0, -10.0), (-100.0, -30.0), flat),
                ],
            },
            tolerances: Tolerances::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }

    /// Roof-shaped bodies: a top face on a 60 degree incline whose C-D edge
    /// lies on the ridge at `y = 0, z = 6`, and a bottom face hinged on that
    /// edge falling the other way.
    pub fn two_face() -> Self {
        let top_slope = Surface::inclined(60.0, 5.18);
        let ridge = Surface::Flat { z: 6.0 };
        let bottom_slope = Surface::inclined(-60.0, -5.18);
        Self {
            num_arrays: 4,
            base_name: "Gen Two Face Array".to_string(),
            layout: BodyLayout::TwoFace {
                top: [
                    RegionConstraint::bounded((-50.0, -10.0), (30.0, 100.0), top_slope),
                    RegionConstraint::bounded((10.0, 50.0), (30.0, 100.0), top_slope),
                    RegionConstraint::bounded((10.0, 50.0), (0.0, 0.0), ridge),
                    RegionConstraint::bounded((-50.0, -10.0), (0.0, 0.0), ridge),
                ],
                bottom: [
                    RegionConstraint::bounded((10.0, 50.0), (-100.0, -30.0), bottom_slope),
                    RegionConstraint::bounded((-50.0, -10.0), (-100.0, -30.0), bottom_slope),
                ],
                links: default_links(),
            },
            tolerances: Tolerances::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_arrays == 0 {
            return Err(ConfigError::NoArrays);
        }
        if self.base_name.trim().is_empty() {
            return Err(ConfigError::EmptyBaseName);
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        self.tolerances.validate()?;
        self.layout.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(GeneratorConfig::single_face().validate().is_ok());
        assert!(GeneratorConfig::two_face().validate().is_ok());
        assert_eq!(GeneratorConfig::single_face().layout.face_count(), 1);
        assert_eq!(GeneratorConfig::two_face().layout.face_count(), 2);
    }

    #[test]
    fn test_face_names() {
        assert_eq!(FaceKind::Single.face_name("Gen Array", 1), "Gen Array 1");
        assert_eq!(
            FaceKind::Top.face_name("Gen Two Face Array", 3),
            "Gen Two Face Array 3 - Top"
        );
        assert_eq!(
            FaceKind::Bottom.face_name("Gen Two Face Array", 3),
            "Gen Two Face Array 3 - Bottom"
        );
        assert_eq!(FaceKind::Bottom.to_string(), "bottom");
    }

    #[test]
    fn test_scalar_fields_are_validated() {
        let mut config = GeneratorConfig::single_face();
        config.num_arrays = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NoArrays)));

        let mut config = GeneratorConfig::single_face();
        config.base_name = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyBaseName)));

        let mut config = GeneratorConfig::single_face();
        config.max_attempts = 0;
        assert!(matches!(config.validate(), Err(ConfigError::NoAttempts)));
    }

    #[test]
    fn test_bottom_regions_are_labelled_c_and_d() {
        let mut config = GeneratorConfig::two_face();
        if let BodyLayout::TwoFace { bottom, .. } = &mut config.layout {
            bottom[1] = RegionConstraint::bounded((-10.0, -50.0), (-100.0, -30.0), Surface::Flat { z: 0.0 });
        }
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvertedBounds {
                face: "bottom",
                slot: Slot::D,
                axis: "x",
                ..
            }
        ));
    }

    #[test]
    fn test_overflowing_region_fails_validation() {
        let mut config = GeneratorConfig::single_face();
        if let BodyLayout::SingleFace { points } = &mut config.layout {
            points[0] = RegionConstraint::bounded((-1e308, 1e308), (30.0, 100.0), Surface::Flat { z: 0.0 });
        }
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteRegion {
                face: "single",
                slot: Slot::A
            })
        ));
    }

    #[test]
    fn test_duplicate_links_are_rejected() {
        let mut config = GeneratorConfig::two_face();
        if let BodyLayout::TwoFace { links, .. } = &mut config.layout {
            *links = [Slot::C, Slot::C];
        }
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateLinks(Slot::C, Slot::C))
        ));
    }

    #[test]
    fn test_yaml_defaults_fill_optional_fields() {
        let yaml = r#"
num_arrays: 3
base_name: Bench Array
layout:
  kind: single_face
  points:
    - { kind: bounded, min_x: -50, max_x: -10, min_y: 30, max_y: 100, surface: { kind: flat, z: 0 } }
    - { kind: bounded, min_x: 10, max_x: 50, min_y: 30, max_y: 100, surface: { kind: flat, z: 0 } }
    - { kind: bounded, min_x: 10, max_x: 50, min_y: -100, max_y: -30, surface: { kind: flat, z: 0 } }
    - { kind: bounded, min_x: -50, max_x: -10, min_y: -100, max_y: -30, surface: { kind: flat, z: 0 } }
"#;
        let config: GeneratorConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.num_arrays, 3);
        assert_eq!(config.tolerances, Tolerances::default());
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.seed, None);
        assert_eq!(config.layout, GeneratorConfig::single_face().layout);
    }

    #[test]
    fn test_two_face_links_default_to_d_and_c() {
        let json = serde_json::to_value(GeneratorConfig::two_face()).unwrap();
        let mut json = json;
        json["layout"].as_object_mut().unwrap().remove("links");
        let config: GeneratorConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config, GeneratorConfig::two_face());
    }
}
