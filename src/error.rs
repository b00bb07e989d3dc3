//! Error types for catalog loading and coordinate validation.

use thiserror::Error;

/// Reference data that violates the catalog invariants.
///
/// These are configuration-integrity faults: they are raised once while the
/// catalog is built and are never recovered from at classification time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// A system lists a sub-region that has no polygon
    #[error("system '{system}' references unknown region '{region}'")]
    UnknownRegion { system: String, region: String },

    /// A system has no polygon of its own
    #[error("system '{0}' has no polygon")]
    MissingSystemPolygon(String),

    #[error("region '{0}' is defined more than once")]
    DuplicateRegion(String),

    #[error("system '{0}' is defined more than once")]
    DuplicateSystem(String),

    #[error("system '{system}' lists region '{region}' more than once")]
    RepeatedSubregion { system: String, region: String },

    /// A sub-region claimed by two systems
    #[error("region '{region}' belongs to both '{first}' and '{second}'")]
    SharedSubregion {
        region: String,
        first: String,
        second: String,
    },

    #[error("system '{0}' is also listed as a sub-region")]
    SystemAsSubregion(String),

    #[error("region '{0}' has no rings")]
    EmptyRegion(String),

    #[error("region '{region}' part {part} has {vertices} vertices (need at least 2)")]
    RingTooShort {
        region: String,
        part: usize,
        vertices: usize,
    },

    /// A vertex that is not `[lon, lat]` or `[lon, lat, elevation]`
    #[error("region '{region}' part {part} vertex {index} has {components} components")]
    MalformedVertex {
        region: String,
        part: usize,
        index: usize,
        components: usize,
    },

    #[error("region '{region}' part {part} vertex {index} is not finite")]
    NonFiniteVertex {
        region: String,
        part: usize,
        index: usize,
    },
}

/// Coordinates rejected before they reach the classifier.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("coordinate '{0}' is not numeric")]
    NotNumeric(String),

    #[error("coordinate {0} is not finite")]
    NotFinite(f64),

    #[error("{axis} {value} is outside [{min}, {max}]")]
    OutOfRange {
        axis: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Scan windows that would render nothing or never finish.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScanError {
    #[error("scan {field} {value} is not finite")]
    NotFinite { field: &'static str, value: f64 },

    #[error("scan step {0} must be positive")]
    NonPositiveStep(f64),

    /// Minimum not strictly below maximum
    #[error("scan {axis} range [{min}, {max}] is empty")]
    EmptyRange {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("scan grid of {cells:.0} cells exceeds the limit of {limit}")]
    TooManyCells { cells: f64, limit: usize },
}
