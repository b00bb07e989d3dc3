//! Core data models for region classification.

pub mod classification;
pub mod region;

pub use classification::{title_case, Classification, ClassifiedPoint, EcoTags, GeoPoint};
pub use region::{Region, Ring, SystemEntry};
