//! Constellation - generation of distinguishable optical tracking markers.
//!
//! A constellation is a rigid body of four markers. New constellations are
//! drawn by rejection sampling inside per-marker regions and accepted only
//! when they are internally well conditioned and cannot be confused with any
//! constellation accepted before them:
//!
//! - every segment is at least 50 units long,
//! - no two segments of one constellation differ by less than 3.5,
//! - no (length, length, angle) pair signature lies within the joint
//!   tolerance window of a signature already in the corpus.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use constellation::{generate_into_store, GeneratorConfig};
//!
//! let mut config = GeneratorConfig::two_face();
//! config.num_arrays = 4;
//! let faces = generate_into_store(&config, "marker_geometries.csv".as_ref())?;
//! ```

mod builder;
mod config;
mod constellation;
mod corpus;
mod error;
mod generator;
mod pair;
mod point;
mod region;
pub mod report;
mod segment;
pub mod store;
mod validator;

// ============================================================================
// Geometry
// ============================================================================

pub use constellation::{Constellation, Slot, POINT_COUNT};
pub use pair::{free_vector_angle, PairSet, PairSignature, PAIR_COUNT, PAIR_INDICES};
pub use segment::{segment_name, Segment, SegmentSet, SEGMENT_COUNT, SEGMENT_ENDPOINTS};

// ============================================================================
// Sampling
// ============================================================================

pub use builder::ConstellationBuilder;
pub use point::{sample_point, COORDINATE_DECIMALS};
pub use region::{RegionConstraint, Surface};

// ============================================================================
// Validation
// ============================================================================

pub use corpus::{Corpus, CorpusFace};
pub use validator::{ExternalViolation, InternalViolation, Tolerances, UniquenessValidator};

// ============================================================================
// Generation
// ============================================================================

pub use config::{BodyLayout, FaceKind, GeneratorConfig, DEFAULT_MAX_ATTEMPTS};
pub use error::{ConfigError, GenerateError, StoreError};
pub use generator::{generate_into_store, Attempt, AttemptStats, Generator};
pub use store::{ConstellationSink, CsvStore};
