//! Record tagging stage.
//!
//! Validates observation coordinates, classifies them through a
//! [`LookupCache`], and writes the ecosystem/ecoregion tags back out.

mod cache;
mod records;

pub use cache::LookupCache;
pub use records::{
    check_coordinates, open_input, parse_coordinates, tag_records, TagStats, TaggingOptions,
    ECOREGION_COLUMN, ECOSYSTEM_COLUMN,
};
