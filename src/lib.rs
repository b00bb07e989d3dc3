//! Ecoregion - classify coordinates into maritime ecosystems and ecoregions
//!
//! This library provides the region catalog, the point-in-polygon classifier
//! and the record tagging stage used by the `classify` binary.

pub mod config;
pub mod error;
pub mod models;
pub mod pip;
pub mod tagging;

pub use error::{CatalogError, InputError, ScanError};
pub use models::{Classification, EcoTags};
pub use pip::{ClassifierService, RegionCatalog};
