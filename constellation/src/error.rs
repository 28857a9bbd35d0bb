//! Error types for configuration, persistence and generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::constellation::Slot;

/// Malformed run configuration. Reported before any sampling happens.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("num_arrays must be positive")]
    NoArrays,

    #[error("base_name must not be empty")]
    EmptyBaseName,

    #[error("max_attempts must be positive")]
    NoAttempts,

    #[error("Inverted {axis} bounds for point {slot} of {face} face: min {min} > max {max}")]
    InvertedBounds {
        face: &'static str,
        slot: Slot,
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Non-finite region for point {slot} of {face} face")]
    NonFiniteRegion { face: &'static str, slot: Slot },

    #[error("Two-face links must name two distinct points, got {0} and {1}")]
    DuplicateLinks(Slot, Slot),

    #[error("Tolerance {name} must be finite and non-negative, got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },
}

/// Failure reading or writing the persisted constellation store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access store '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unexpected store header '{found}'")]
    Header { found: String },

    #[error("Row {row}: expected {expected} fields, found {found}")]
    FieldCount {
        row: u64,
        expected: usize,
        found: usize,
    },

    #[error("Row {row}: invalid coordinate '{value}' in column {column}")]
    InvalidCoordinate {
        row: u64,
        column: String,
        value: String,
    },
}

/// Failure of a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(
        "Region infeasible for '{name}': nothing accepted after {attempts} attempts \
         ({internal_rejections} internal, {external_rejections} external rejections)"
    )]
    RegionInfeasible {
        name: String,
        attempts: usize,
        internal_rejections: usize,
        external_rejections: usize,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
