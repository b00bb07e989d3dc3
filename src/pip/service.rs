//! Classification service: system first, then that system's sub-regions.

use geo::Coord;
use rayon::prelude::*;
use tracing::debug;

use super::geometry::any_part_contains;
use super::RegionCatalog;
use crate::models::{Classification, EcoTags};

/// Point-in-region lookup service over a fixed catalog.
///
/// The catalog is never mutated after construction, so one service can be
/// shared between threads without locking.
pub struct ClassifierService {
    catalog: RegionCatalog,
}

impl ClassifierService {
    /// Create a new classifier from a validated catalog
    pub fn new(catalog: RegionCatalog) -> Self {
        Self { catalog }
    }

    /// Find every system and sub-region containing the point.
    ///
    /// Sub-regions are only tested for systems that contain the point. Both
    /// lists come back sorted.
    pub fn classify(&self, lon: f64, lat: f64) -> Classification {
        let point = Coord { x: lon, y: lat };
        let mut result = Classification::default();

        for system in self.catalog.systems() {
            if !any_part_contains(point, self.catalog.parts(&system.name)) {
                continue;
            }
            result.systems.push(system.name.clone());

            for sub in &system.subregions {
                if any_part_contains(point, self.catalog.parts(sub)) {
                    result.regions.push(sub.clone());
                }
            }
        }

        result.systems.sort();
        result.regions.sort();

        debug!(
            "Classified ({}, {}): {} systems, {} regions",
            lon,
            lat,
            result.systems.len(),
            result.regions.len()
        );

        result
    }

    /// Classify many points in parallel; results follow input order.
    pub fn classify_many(&self, points: &[(f64, f64)]) -> Vec<Classification> {
        points
            .par_iter()
            .map(|&(lon, lat)| self.classify(lon, lat))
            .collect()
    }

    /// Record tags for a point
    pub fn tags(&self, lon: f64, lat: f64) -> EcoTags {
        self.classify(lon, lat).tags()
    }

    /// Get the catalog (for stats/debugging)
    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CatalogConfig, RegionConfig, SystemConfig};

    fn ring(points: &[(f64, f64)]) -> Vec<Vec<f64>> {
        points.iter().map(|&(x, y)| vec![x, y]).collect()
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Vec<f64>> {
        ring(&[(x0, y0), (x0, y1), (x1, y1), (x1, y0)])
    }

    fn service(
        systems: Vec<(&str, Vec<&str>)>,
        regions: Vec<(&str, Vec<Vec<Vec<f64>>>)>,
    ) -> ClassifierService {
        let config = CatalogConfig {
            system: systems
                .into_iter()
                .map(|(name, subs)| SystemConfig {
                    name: name.to_string(),
                    subregions: subs.into_iter().map(String::from).collect(),
                })
                .collect(),
            region: regions
                .into_iter()
                .map(|(name, parts)| RegionConfig {
                    name: name.to_string(),
                    parts,
                })
                .collect(),
        };
        ClassifierService::new(RegionCatalog::from_config(config).unwrap())
    }

    fn builtin() -> ClassifierService {
        let catalog = RegionCatalog::from_config(CatalogConfig::builtin().unwrap()).unwrap();
        ClassifierService::new(catalog)
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_open_rectangle() {
        let svc = service(
            vec![("square", vec![])],
            vec![("square", vec![rect(-10.0, -10.0, 10.0, 10.0)])],
        );
        assert_eq!(svc.classify(0.0, 0.0).systems, names(&["square"]));
        assert!(svc.classify(20.0, 0.0).is_empty());
    }

    #[test]
    fn test_antimeridian_region() {
        let svc = service(
            vec![("dateline", vec![])],
            vec![(
                "dateline",
                vec![ring(&[(170.0, -5.0), (170.0, 5.0), (-170.0, 5.0), (-170.0, -5.0)])],
            )],
        );
        assert_eq!(svc.classify(179.0, 0.0).systems, names(&["dateline"]));
        assert_eq!(svc.classify(-179.0, 0.0).systems, names(&["dateline"]));
        assert!(svc.classify(0.0, 0.0).systems.is_empty());
    }

    #[test]
    fn test_repeated_calls_are_stable() {
        let svc = builtin();
        let first = svc.classify(-90.0, 27.0);
        let second = svc.classify(-90.0, 27.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_results_are_sorted() {
        let svc = service(
            vec![("zulu", vec!["z-sub", "a-sub"]), ("alpha", vec![])],
            vec![
                ("zulu", vec![rect(0.0, 0.0, 10.0, 10.0)]),
                ("alpha", vec![rect(-5.0, -5.0, 5.0, 5.0)]),
                ("z-sub", vec![rect(0.0, 0.0, 3.0, 3.0)]),
                ("a-sub", vec![rect(0.0, 0.0, 2.0, 2.0)]),
            ],
        );
        let result = svc.classify(1.0, 1.0);
        assert_eq!(result.systems, names(&["alpha", "zulu"]));
        // Overlapping sub-regions are all reported
        assert_eq!(result.regions, names(&["a-sub", "z-sub"]));
    }

    #[test]
    fn test_subregion_requires_matching_system() {
        // "outside" lies beyond its system's polygon
        let svc = service(
            vec![("sys", vec!["inside", "outside"])],
            vec![
                ("sys", vec![rect(0.0, 0.0, 10.0, 10.0)]),
                ("inside", vec![rect(0.0, 0.0, 5.0, 5.0)]),
                ("outside", vec![rect(20.0, 20.0, 30.0, 30.0)]),
            ],
        );
        let result = svc.classify(25.0, 25.0);
        assert!(result.systems.is_empty());
        assert!(result.regions.is_empty());

        let result = svc.classify(2.0, 2.0);
        assert_eq!(result.systems, names(&["sys"]));
        assert_eq!(result.regions, names(&["inside"]));
    }

    #[test]
    fn test_subregion_of_other_system_not_reported() {
        let svc = service(
            vec![("east", vec!["shared-area"]), ("west", vec![])],
            vec![
                ("east", vec![rect(10.0, 0.0, 20.0, 10.0)]),
                ("west", vec![rect(-10.0, 0.0, 0.0, 10.0)]),
                ("shared-area", vec![rect(-10.0, 0.0, 20.0, 10.0)]),
            ],
        );
        let result = svc.classify(-5.0, 5.0);
        assert_eq!(result.systems, names(&["west"]));
        assert!(result.regions.is_empty());
    }

    #[test]
    fn test_multi_part_system() {
        let svc = service(
            vec![("islands", vec!["north isle"])],
            vec![
                (
                    "islands",
                    vec![
                        rect(0.0, 0.0, 1.0, 1.0),
                        rect(5.0, 5.0, 6.0, 6.0),
                        rect(0.0, 0.0, 6.0, 6.0),
                    ],
                ),
                ("north isle", vec![rect(5.0, 5.0, 6.0, 6.0)]),
            ],
        );
        // Inside two parts at once: still reported once
        let result = svc.classify(0.5, 0.5);
        assert_eq!(result.systems, names(&["islands"]));
        assert!(result.regions.is_empty());

        let result = svc.classify(5.5, 5.5);
        assert_eq!(result.systems, names(&["islands"]));
        assert_eq!(result.regions, names(&["north isle"]));

        assert!(svc.classify(10.0, 10.0).is_empty());
    }

    #[test]
    fn test_multi_part_subregion_reported_once() {
        let svc = service(
            vec![("sys", vec!["pair"])],
            vec![
                ("sys", vec![rect(0.0, 0.0, 10.0, 10.0)]),
                ("pair", vec![rect(0.0, 0.0, 4.0, 4.0), rect(1.0, 1.0, 3.0, 3.0)]),
            ],
        );
        assert_eq!(svc.classify(2.0, 2.0).regions, names(&["pair"]));
    }

    #[test]
    fn test_system_without_subregions() {
        let svc = service(
            vec![("atlantic basin", vec![])],
            vec![("atlantic basin", vec![rect(-80.0, 0.0, -10.0, 60.0)])],
        );
        let result = svc.classify(-40.0, 30.0);
        assert_eq!(result.systems, names(&["atlantic basin"]));
        assert!(result.regions.is_empty());
    }

    #[test]
    fn test_gulf_of_mexico_regions() {
        let svc = builtin();

        let result = svc.classify(-90.0, 27.0);
        assert_eq!(result.systems, names(&["gulf of mexico"]));
        assert_eq!(result.regions, names(&["north gulf of mexico"]));

        assert_eq!(svc.classify(-83.5, 26.0).regions, names(&["floridian"]));
        assert_eq!(svc.classify(-84.5, 28.0).regions, names(&["floridian"]));
        assert_eq!(svc.classify(-92.0, 22.0).regions, names(&["south gulf of mexico"]));
        assert_eq!(svc.classify(-86.0, 24.0).regions, names(&["south gulf of mexico"]));
    }

    #[test]
    fn test_far_point_is_empty() {
        let svc = builtin();
        let result = svc.classify(0.0, 0.0);
        assert!(result.systems.is_empty());
        assert!(result.regions.is_empty());

        // Atlantic side of Florida, inside the floridian box but not the gulf
        assert!(svc.classify(-79.0, 27.0).is_empty());
    }

    #[test]
    fn test_tags() {
        let svc = builtin();
        let tags = svc.tags(-90.0, 27.0);
        assert_eq!(tags.ecosystem.as_deref(), Some("Gulf Of Mexico"));
        assert_eq!(tags.ecoregion.as_deref(), Some("North Gulf Of Mexico"));
        assert_eq!(svc.tags(0.0, 0.0), EcoTags::default());
    }

    #[test]
    fn test_classify_many_keeps_order() {
        let svc = builtin();
        let points = vec![(-90.0, 27.0), (0.0, 0.0), (-83.5, 26.0)];
        let results = svc.classify_many(&points);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].regions, names(&["north gulf of mexico"]));
        assert!(results[1].is_empty());
        assert_eq!(results[2].regions, names(&["floridian"]));
    }

    #[test]
    fn test_service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClassifierService>();
    }
}
