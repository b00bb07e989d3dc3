//! Validated region catalog: polygon table plus system hierarchy.

use geo::Coord;
use hashbrown::{HashMap, HashSet};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{CatalogConfig, RegionConfig};
use crate::error::CatalogError;
use crate::models::{Region, Ring, SystemEntry};

/// Immutable reference data for classification.
///
/// Built once by [`RegionCatalog::from_config`], which rejects any hierarchy
/// entry without a polygon and any ring with fewer than two vertices.
#[derive(Debug, Clone)]
pub struct RegionCatalog {
    regions: HashMap<String, Region>,
    systems: Vec<SystemEntry>,
}

/// Counts reported by `validate` and logged on load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub systems: usize,
    pub subregions: usize,
    pub regions: usize,
    pub rings: usize,
    pub vertices: usize,
}

impl RegionCatalog {
    /// Validate `config` and build the catalog.
    ///
    /// Open rings are closed by repeating their first vertex. Elevation
    /// components are dropped.
    pub fn from_config(config: CatalogConfig) -> Result<Self, CatalogError> {
        let mut regions: HashMap<String, Region> = HashMap::with_capacity(config.region.len());
        for region in config.region {
            let region = build_region(region)?;
            if regions.contains_key(&region.name) {
                return Err(CatalogError::DuplicateRegion(region.name));
            }
            regions.insert(region.name.clone(), region);
        }

        let system_names: HashSet<&str> = config.system.iter().map(|s| s.name.as_str()).collect();
        let mut seen_systems: HashSet<&str> = HashSet::new();
        let mut owners: HashMap<&str, &str> = HashMap::new();

        for system in &config.system {
            if !seen_systems.insert(system.name.as_str()) {
                return Err(CatalogError::DuplicateSystem(system.name.clone()));
            }
            if !regions.contains_key(&system.name) {
                return Err(CatalogError::MissingSystemPolygon(system.name.clone()));
            }
            let mut listed: HashSet<&str> = HashSet::new();
            for sub in &system.subregions {
                if !listed.insert(sub.as_str()) {
                    return Err(CatalogError::RepeatedSubregion {
                        system: system.name.clone(),
                        region: sub.clone(),
                    });
                }
                if system_names.contains(sub.as_str()) {
                    return Err(CatalogError::SystemAsSubregion(sub.clone()));
                }
                if !regions.contains_key(sub) {
                    return Err(CatalogError::UnknownRegion {
                        system: system.name.clone(),
                        region: sub.clone(),
                    });
                }
                if let Some(first) = owners.insert(sub.as_str(), system.name.as_str()) {
                    return Err(CatalogError::SharedSubregion {
                        region: sub.clone(),
                        first: first.to_string(),
                        second: system.name.clone(),
                    });
                }
            }
        }

        let systems = config
            .system
            .iter()
            .map(|s| SystemEntry {
                name: s.name.clone(),
                subregions: s.subregions.clone(),
            })
            .collect();

        let catalog = Self { regions, systems };

        let summary = catalog.summary();
        info!(
            "Region catalog loaded: {} systems, {} sub-regions, {} rings, {} vertices",
            summary.systems, summary.subregions, summary.rings, summary.vertices
        );
        let unreferenced = summary
            .regions
            .saturating_sub(summary.systems + summary.subregions);
        if unreferenced > 0 {
            debug!("{} regions are not referenced by any system", unreferenced);
        }

        Ok(catalog)
    }

    /// Systems in catalog order
    pub fn systems(&self) -> &[SystemEntry] {
        &self.systems
    }

    pub fn system(&self, name: &str) -> Option<&SystemEntry> {
        self.systems.iter().find(|s| s.name == name)
    }

    /// Sub-region names of a system, empty for unknown systems
    pub fn subregions(&self, system: &str) -> &[String] {
        self.system(system)
            .map(|s| s.subregions.as_slice())
            .unwrap_or(&[])
    }

    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.get(name)
    }

    /// Rings of a region, empty for unknown names
    pub fn parts(&self, name: &str) -> &[Ring] {
        self.regions
            .get(name)
            .map(|r| r.parts.as_slice())
            .unwrap_or(&[])
    }

    /// Number of entries in the polygon table
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            systems: self.systems.len(),
            subregions: self.systems.iter().map(|s| s.subregions.len()).sum(),
            regions: self.regions.len(),
            rings: self.regions.values().map(|r| r.parts.len()).sum(),
            vertices: self.regions.values().map(Region::vertex_count).sum(),
        }
    }
}

fn build_region(config: RegionConfig) -> Result<Region, CatalogError> {
    if config.parts.is_empty() {
        return Err(CatalogError::EmptyRegion(config.name));
    }

    let mut parts = Vec::with_capacity(config.parts.len());
    for (part, vertices) in config.parts.iter().enumerate() {
        if vertices.len() < 2 {
            return Err(CatalogError::RingTooShort {
                region: config.name.clone(),
                part,
                vertices: vertices.len(),
            });
        }

        let mut coords = Vec::with_capacity(vertices.len() + 1);
        for (index, vertex) in vertices.iter().enumerate() {
            // [lon, lat] or [lon, lat, elevation]
            let (lon, lat) = match vertex.as_slice() {
                [lon, lat] | [lon, lat, _] => (*lon, *lat),
                _ => {
                    return Err(CatalogError::MalformedVertex {
                        region: config.name.clone(),
                        part,
                        index,
                        components: vertex.len(),
                    })
                }
            };
            if !lon.is_finite() || !lat.is_finite() {
                return Err(CatalogError::NonFiniteVertex {
                    region: config.name.clone(),
                    part,
                    index,
                });
            }
            coords.push(Coord { x: lon, y: lat });
        }

        parts.push(Ring::closed(coords));
    }

    Ok(Region::new(config.name, parts))
}
