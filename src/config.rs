//! Catalog reference data as read from disk.
//!
//! A catalog file lists the system hierarchy and the polygon table:
//!
//! ```toml
//! [[system]]
//! name = "gulf of mexico"
//! subregions = ["floridian"]
//!
//! [[region]]
//! name = "gulf of mexico"
//! parts = [[[-97.5, 30.0], [-88.0, 30.8], [-84.0, 30.2]]]
//! ```
//!
//! Files ending in `.json` are read as JSON with the same shape.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default catalog compiled into the crate.
const BUILTIN_CATALOG: &str = include_str!("../data/gulf_of_mexico.toml");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub system: Vec<SystemConfig>,
    #[serde(default)]
    pub region: Vec<RegionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    pub name: String,
    #[serde(default)]
    pub subregions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionConfig {
    pub name: String,
    /// Rings of `[lon, lat]` or `[lon, lat, elevation]` vertices
    pub parts: Vec<Vec<Vec<f64>>>,
}

impl CatalogConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;

        if path.extension().map_or(false, |e| e == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
        .with_context(|| format!("Failed to parse catalog file {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid TOML catalog")
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Invalid JSON catalog")
    }

    /// The embedded Gulf of Mexico catalog.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }
}
