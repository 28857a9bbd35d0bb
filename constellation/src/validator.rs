//! Acceptance rules for candidate constellations.
//!
//! A candidate is accepted when it is internally well conditioned (every
//! segment long enough, no two segments of similar length) and externally
//! distinguishable (no pair signature falls inside the joint tolerance window
//! of a signature already in the corpus).

use std::fmt;

use common::float_ext::FloatExt;
use serde::{Deserialize, Serialize};

use crate::corpus::Corpus;
use crate::error::ConfigError;
use crate::pair::{PairSet, PairSignature};
use crate::segment::{segment_name, SegmentSet};

// =============================================================================
// Tolerances
// =============================================================================

/// Thresholds of the acceptance rules, in length units (mm) and radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Shortest allowed segment.
    pub min_segment_length: f64,
    /// Smallest allowed length difference between two segments of one
    /// constellation.
    pub min_length_delta: f64,
    /// Signatures closer than this in both lengths may be ambiguous.
    pub length_window: f64,
    /// Signatures closer than this in angle may be ambiguous. Two degrees.
    pub angle_window: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            min_segment_length: 50.0,
            min_length_delta: 3.5,
            length_window: 3.5,
            angle_window: 0.0349066,
        }
    }
}

impl Tolerances {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("min_segment_length", self.min_segment_length),
            ("min_length_delta", self.min_length_delta),
            ("length_window", self.length_window),
            ("angle_window", self.angle_window),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidTolerance { name, value });
            }
        }
        Ok(())
    }

    /// True when `a` and `b` are within both length windows and the angle
    /// window at once.
    #[inline]
    pub fn is_ambiguous(&self, a: &PairSignature, b: &PairSignature) -> bool {
        a.length_a.within(b.length_a, self.length_window)
            && a.length_b.within(b.length_b, self.length_window)
            && a.angle.within(b.angle, self.angle_window)
    }
}

// =============================================================================
// Violations
// =============================================================================

/// First self-consistency rule a constellation breaks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InternalViolation {
    ShortSegment {
        segment: usize,
        length: f64,
        min_length: f64,
    },
    SimilarLengths {
        first: usize,
        second: usize,
        delta: f64,
    },
}

impl fmt::Display for InternalViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            InternalViolation::ShortSegment {
                segment,
                min_length,
                ..
            } => write!(
                f,
                "segment {} is less than {}mm",
                segment_name(segment),
                min_length
            ),
            InternalViolation::SimilarLengths {
                first,
                second,
                delta,
            } => write!(
                f,
                "segment {} and segment {} are within {:.3} mm of one another",
                segment_name(first),
                segment_name(second),
                delta
            ),
        }
    }
}

/// A candidate signature that collides with a signature already accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalViolation {
    pub candidate: PairSignature,
    pub existing: PairSignature,
    /// Name of the constellation that owns `existing`.
    pub owner: String,
}

impl fmt::Display for ExternalViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Segment pair {} is similar to segment pair {} in {}",
            self.candidate.name(),
            self.existing.name(),
            self.owner
        )
    }
}

// =============================================================================
// Validator
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct UniquenessValidator {
    tolerances: Tolerances,
}

impl UniquenessValidator {
    pub fn new(tolerances: Tolerances) -> Self {
        Self { tolerances }
    }

    pub fn tolerances(&self) -> &Tolerances {
        &self.tolerances
    }

    /// Checks every segment against the minimum length and every segment
    /// pair against the minimum length delta, reporting the first failure in
    /// enumeration order.
    pub fn check_internal(&self, segments: &SegmentSet) -> Result<(), InternalViolation> {
        let lengths = segments.lengths();
        for (i, &length) in lengths.iter().enumerate() {
            // Negated so NaN lengths fail too.
            if !(length >= self.tolerances.min_segment_length) {
                return Err(InternalViolation::ShortSegment {
                    segment: i,
                    length,
                    min_length: self.tolerances.min_segment_length,
                });
            }
            for (j, &other) in lengths.iter().enumerate().skip(i + 1) {
                let delta = (length - other).abs();
                if !(delta >= self.tolerances.min_length_delta) {
                    return Err(InternalViolation::SimilarLengths {
                        first: i,
                        second: j,
                        delta,
                    });
                }
            }
        }
        Ok(())
    }

    /// Compares the full cross product of candidate and corpus signatures.
    /// Corpus faces are visited in commit order. An empty corpus always
    /// passes.
    pub fn check_external(&self, pairs: &PairSet, corpus: &Corpus) -> Result<(), ExternalViolation> {
        for face in corpus.faces() {
            for candidate in pairs.iter() {
                if let Some(existing) = face
                    .pairs()
                    .iter()
                    .find(|existing| self.tolerances.is_ambiguous(candidate, existing))
                {
                    return Err(ExternalViolation {
                        candidate: *candidate,
                        existing: *existing,
                        owner: face.name().to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
