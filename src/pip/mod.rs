//! Point-in-Polygon (PIP) region classification.
//!
//! Checks a point against every system polygon by brute force, then against
//! the sub-regions of each system that matched.

mod catalog;
pub mod geometry;
mod scan;
mod service;

pub use catalog::{CatalogSummary, RegionCatalog};
pub use geometry::{any_part_contains, edge_hits_south_ray, ring_contains};
pub use scan::{render_scan, ScanWindow, MAX_SCAN_CELLS};
pub use service::ClassifierService;
