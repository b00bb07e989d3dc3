//! Attach ecosystem/ecoregion tags to delimited observation records.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use flate2::read::GzDecoder;
use indicatif::ProgressBar;
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{info, warn};

use super::LookupCache;
use crate::error::InputError;
use crate::pip::ClassifierService;

pub const ECOSYSTEM_COLUMN: &str = "ECOSYSTEM";
pub const ECOREGION_COLUMN: &str = "ECOREGION";

#[derive(Debug, Clone)]
pub struct TaggingOptions {
    pub lon_column: String,
    pub lat_column: String,
    pub delimiter: u8,
}

impl Default for TaggingOptions {
    fn default() -> Self {
        Self {
            lon_column: "LONGITUDE".to_string(),
            lat_column: "LATITUDE".to_string(),
            delimiter: b',',
        }
    }
}

/// Row counts from one tagging run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TagStats {
    pub rows: u64,
    /// Rows inside at least one system
    pub tagged: u64,
    pub unmatched: u64,
    /// Rows whose coordinates failed validation
    pub invalid: u64,
}

/// Validate raw longitude/latitude text.
///
/// Longitude must already be normalized to [-180, 180].
pub fn parse_coordinates(lon: &str, lat: &str) -> Result<(f64, f64), InputError> {
    check_coordinates(parse_degrees(lon)?, parse_degrees(lat)?)
}

/// Validate numeric coordinates: finite, lon in [-180, 180], lat in [-90, 90].
pub fn check_coordinates(lon: f64, lat: f64) -> Result<(f64, f64), InputError> {
    for value in [lon, lat] {
        if !value.is_finite() {
            return Err(InputError::NotFinite(value));
        }
    }
    check_range("longitude", lon, 180.0)?;
    check_range("latitude", lat, 90.0)?;
    Ok((lon, lat))
}

fn parse_degrees(raw: &str) -> Result<f64, InputError> {
    raw.trim()
        .parse()
        .map_err(|_| InputError::NotNumeric(raw.to_string()))
}

fn check_range(axis: &'static str, value: f64, limit: f64) -> Result<(), InputError> {
    if value < -limit || value > limit {
        return Err(InputError::OutOfRange {
            axis,
            value,
            min: -limit,
            max: limit,
        });
    }
    Ok(())
}

/// Open an input file, decompressing `.gz` files on the fly.
pub fn open_input(path: &Path) -> Result<Box<dyn Read>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file {}", path.display()))?;
    let reader: Box<dyn Read> = if path.extension().map_or(false, |e| e == "gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    Ok(reader)
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Copy CSV records from `reader` to `writer`, filling the ECOSYSTEM and
/// ECOREGION columns.
///
/// The tag columns are appended unless the input already has them, in
/// which case they are overwritten. Rows with unusable coordinates are
/// written with empty tags and counted as invalid.
pub fn tag_records<R: Read, W: Write>(
    service: &ClassifierService,
    reader: R,
    writer: W,
    options: &TaggingOptions,
    cache: &mut LookupCache,
    progress: &ProgressBar,
) -> Result<TagStats> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(options.delimiter)
        .from_reader(reader);
    let mut csv_writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(writer);

    let mut headers = csv_reader.headers()?.clone();

    let lon_idx = column_index(&headers, &options.lon_column)
        .with_context(|| format!("Column '{}' not found", options.lon_column))?;
    let lat_idx = column_index(&headers, &options.lat_column)
        .with_context(|| format!("Column '{}' not found", options.lat_column))?;

    let ecosystem_idx = column_index(&headers, ECOSYSTEM_COLUMN).unwrap_or_else(|| {
        headers.push_field(ECOSYSTEM_COLUMN);
        headers.len() - 1
    });
    let ecoregion_idx = column_index(&headers, ECOREGION_COLUMN).unwrap_or_else(|| {
        headers.push_field(ECOREGION_COLUMN);
        headers.len() - 1
    });
    let width = headers.len();

    csv_writer.write_record(&headers)?;

    let mut stats = TagStats::default();
    let mut fields: Vec<String> = Vec::with_capacity(width);

    for result in csv_reader.records() {
        let record = result.with_context(|| format!("Failed to read row {}", stats.rows + 1))?;
        stats.rows += 1;
        progress.inc(1);

        let parsed = match (record.get(lon_idx), record.get(lat_idx)) {
            (Some(lon), Some(lat)) => parse_coordinates(lon, lat),
            // Row lengths are checked by the reader
            _ => Err(InputError::NotNumeric(String::new())),
        };

        let tags = match parsed {
            Ok((lon, lat)) => {
                let classification = cache.lookup(service, lon, lat);
                if classification.systems.is_empty() {
                    stats.unmatched += 1;
                } else {
                    stats.tagged += 1;
                }
                classification.tags()
            }
            Err(e) => {
                warn!("Row {}: {}", stats.rows, e);
                stats.invalid += 1;
                Default::default()
            }
        };

        fields.clear();
        fields.extend(record.iter().map(str::to_string));
        fields.resize(width, String::new());
        fields[ecosystem_idx] = tags.ecosystem.unwrap_or_default();
        fields[ecoregion_idx] = tags.ecoregion.unwrap_or_default();
        csv_writer.write_record(&fields)?;
    }

    csv_writer.flush()?;

    info!(
        "Tagged {} rows: {} in a system, {} unmatched, {} invalid ({} cache hits)",
        stats.rows,
        stats.tagged,
        stats.unmatched,
        stats.invalid,
        cache.hits()
    );

    Ok(stats)
}
