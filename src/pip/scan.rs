//! ASCII map of classifications over a lon/lat grid.

use super::ClassifierService;
use crate::error::ScanError;

/// Grid window; rows run from `lat_max` down, columns from `lon_min` east.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanWindow {
    pub lon_min: f64,
    pub lon_max: f64,
    pub lat_min: f64,
    pub lat_max: f64,
    pub step: f64,
}

impl Default for ScanWindow {
    /// The northern Gulf of Mexico and Florida at one-degree spacing.
    fn default() -> Self {
        Self {
            lon_min: -100.0,
            lon_max: -80.0,
            lat_min: 20.0,
            lat_max: 35.0,
            step: 1.0,
        }
    }
}

/// Upper bound on rendered cells.
pub const MAX_SCAN_CELLS: usize = 1_000_000;

impl ScanWindow {
    /// Reject windows that are empty, unbounded or too dense to render.
    pub fn validate(&self) -> Result<(), ScanError> {
        for (field, value) in [
            ("lon_min", self.lon_min),
            ("lon_max", self.lon_max),
            ("lat_min", self.lat_min),
            ("lat_max", self.lat_max),
            ("step", self.step),
        ] {
            if !value.is_finite() {
                return Err(ScanError::NotFinite { field, value });
            }
        }
        if self.step <= 0.0 {
            return Err(ScanError::NonPositiveStep(self.step));
        }
        if self.lon_min >= self.lon_max {
            return Err(ScanError::EmptyRange {
                axis: "longitude",
                min: self.lon_min,
                max: self.lon_max,
            });
        }
        if self.lat_min >= self.lat_max {
            return Err(ScanError::EmptyRange {
                axis: "latitude",
                min: self.lat_min,
                max: self.lat_max,
            });
        }

        let cells = self.rows() * self.columns();
        if cells > MAX_SCAN_CELLS as f64 {
            return Err(ScanError::TooManyCells {
                cells,
                limit: MAX_SCAN_CELLS,
            });
        }
        Ok(())
    }

    fn rows(&self) -> f64 {
        ((self.lat_max - self.lat_min) / self.step).ceil()
    }

    fn columns(&self) -> f64 {
        ((self.lon_max - self.lon_min) / self.step).ceil()
    }
}

/// Render one two-character cell per grid point.
///
/// The first character is the initial of the first matching system (`+` if
/// none), the second the initial of the first matching region (`-` if none).
pub fn render_scan(service: &ClassifierService, window: &ScanWindow) -> Result<String, ScanError> {
    window.validate()?;

    // Both counts are bounded by MAX_SCAN_CELLS after validation
    let rows = window.rows() as usize;
    let columns = window.columns() as usize;

    let mut lines = Vec::with_capacity(rows);
    for row in 0..=rows {
        let lat = window.lat_max - row as f64 * window.step;
        if lat <= window.lat_min {
            break;
        }

        let mut line = String::with_capacity(columns * 2);
        for col in 0..=columns {
            let lon = window.lon_min + col as f64 * window.step;
            if lon >= window.lon_max {
                break;
            }
            let result = service.classify(lon, lat);
            line.push(initial(result.systems.first(), '+'));
            line.push(initial(result.regions.first(), '-'));
        }

        lines.push(line);
    }

    Ok(lines.join("\n"))
}

fn initial(name: Option<&String>, missing: char) -> char {
    name.and_then(|n| n.chars().next()).unwrap_or(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::pip::RegionCatalog;

    fn builtin() -> ClassifierService {
        let catalog = RegionCatalog::from_config(CatalogConfig::builtin().unwrap()).unwrap();
        ClassifierService::new(catalog)
    }

    #[test]
    fn test_default_window_shape() {
        let scan = render_scan(&builtin(), &ScanWindow::default()).unwrap();
        let lines: Vec<&str> = scan.lines().collect();
        assert_eq!(lines.len(), 15);
        assert!(lines.iter().all(|l| l.len() == 40));
        // Latitude 35 is north of the gulf
        assert_eq!(lines[0], "+-".repeat(20));
    }

    #[test]
    fn test_cells_show_system_and_region() {
        let window = ScanWindow {
            lon_min: -90.0,
            lon_max: -89.0,
            lat_min: 26.0,
            lat_max: 27.0,
            step: 1.0,
        };
        assert_eq!(render_scan(&builtin(), &window).unwrap(), "gn");

        let window = ScanWindow {
            lon_min: 0.0,
            lon_max: 2.0,
            lat_min: -1.0,
            lat_max: 0.0,
            step: 1.0,
        };
        assert_eq!(render_scan(&builtin(), &window).unwrap(), "+-+-");
    }

    #[test]
    fn test_rows_run_south() {
        let window = ScanWindow {
            lon_min: -92.0,
            lon_max: -91.0,
            lat_min: 21.0,
            lat_max: 27.0,
            step: 5.0,
        };
        // Latitude 27 then 22
        assert_eq!(render_scan(&builtin(), &window).unwrap(), "gn\ngs");
    }

    #[test]
    fn test_invalid_step() {
        let window = ScanWindow {
            step: 0.0,
            ..ScanWindow::default()
        };
        assert_eq!(
            render_scan(&builtin(), &window).unwrap_err(),
            ScanError::NonPositiveStep(0.0)
        );
    }

    #[test]
    fn test_nan_bounds_rejected() {
        let service = builtin();
        let window = ScanWindow {
            lon_max: f64::NAN,
            ..ScanWindow::default()
        };
        assert!(matches!(
            render_scan(&service, &window),
            Err(ScanError::NotFinite { field: "lon_max", .. })
        ));

        let window = ScanWindow {
            lat_min: f64::NEG_INFINITY,
            ..ScanWindow::default()
        };
        assert!(matches!(
            render_scan(&service, &window),
            Err(ScanError::NotFinite { field: "lat_min", .. })
        ));

        let window = ScanWindow {
            step: f64::NAN,
            ..ScanWindow::default()
        };
        assert!(matches!(
            render_scan(&service, &window),
            Err(ScanError::NotFinite { field: "step", .. })
        ));
    }

    #[test]
    fn test_inverted_window_rejected() {
        let window = ScanWindow {
            lon_min: -80.0,
            lon_max: -100.0,
            ..ScanWindow::default()
        };
        assert_eq!(
            render_scan(&builtin(), &window).unwrap_err(),
            ScanError::EmptyRange {
                axis: "longitude",
                min: -80.0,
                max: -100.0,
            }
        );

        let window = ScanWindow {
            lat_min: 27.0,
            lat_max: 27.0,
            ..ScanWindow::default()
        };
        assert!(matches!(
            render_scan(&builtin(), &window),
            Err(ScanError::EmptyRange { axis: "latitude", .. })
        ));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let window = ScanWindow {
            step: 1e-12,
            ..ScanWindow::default()
        };
        assert!(matches!(
            render_scan(&builtin(), &window),
            Err(ScanError::TooManyCells { limit: MAX_SCAN_CELLS, .. })
        ));

        // 1000 x 1000 is exactly at the limit
        let window = ScanWindow {
            lon_min: 0.0,
            lon_max: 1000.0,
            lat_min: 0.0,
            lat_max: 1000.0,
            step: 1.0,
        };
        assert!(window.validate().is_ok());
        let window = ScanWindow {
            lon_max: 1001.0,
            ..window
        };
        assert!(window.validate().is_err());
    }
}
