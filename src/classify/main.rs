//! Command-line front end for ecoregion classification.
//!
//! Loads the region catalog once, then classifies a single point, tags a
//! CSV file of observations, renders a scan grid, or validates the catalog.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ecoregion::config::CatalogConfig;
use ecoregion::models::ClassifiedPoint;
use ecoregion::pip::{render_scan, ClassifierService, RegionCatalog, ScanWindow};
use ecoregion::tagging::{
    check_coordinates, open_input, tag_records, LookupCache, TaggingOptions,
};

#[derive(Parser, Debug)]
#[command(name = "classify")]
#[command(about = "Classify coordinates into maritime ecosystems and ecoregions")]
struct Args {
    /// Catalog file (TOML, or JSON by extension). Defaults to the built-in catalog.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify a single point
    Point {
        /// Longitude in degrees, normalized to [-180, 180]
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Tag a CSV file of observations with ECOSYSTEM/ECOREGION columns
    Batch {
        /// Input CSV file (.gz is decompressed)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Longitude column name
        #[arg(long, default_value = "LONGITUDE")]
        lon_column: String,

        /// Latitude column name
        #[arg(long, default_value = "LATITUDE")]
        lat_column: String,

        /// Field delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,
    },

    /// Render an ASCII map of classifications
    Scan {
        #[arg(long, default_value = "-100", allow_negative_numbers = true)]
        lon_min: f64,

        #[arg(long, default_value = "-80", allow_negative_numbers = true)]
        lon_max: f64,

        #[arg(long, default_value = "20", allow_negative_numbers = true)]
        lat_min: f64,

        #[arg(long, default_value = "35", allow_negative_numbers = true)]
        lat_max: f64,

        /// Grid spacing in degrees
        #[arg(long, default_value = "1")]
        step: f64,
    },

    /// Load the catalog and print its summary
    Validate,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for results
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let catalog = load_catalog(args.catalog.as_deref())?;
    let service = ClassifierService::new(catalog);

    match args.command {
        Command::Point { lon, lat, json } => run_point(&service, lon, lat, json),
        Command::Batch {
            input,
            output,
            lon_column,
            lat_column,
            delimiter,
        } => {
            if !delimiter.is_ascii() {
                anyhow::bail!("Delimiter must be a single ASCII character");
            }
            let options = TaggingOptions {
                lon_column,
                lat_column,
                delimiter: delimiter as u8,
            };
            run_batch(&service, &input, output.as_deref(), &options)
        }
        Command::Scan {
            lon_min,
            lon_max,
            lat_min,
            lat_max,
            step,
        } => {
            let window = ScanWindow {
                lon_min,
                lon_max,
                lat_min,
                lat_max,
                step,
            };
            println!("{}", render_scan(&service, &window)?);
            Ok(())
        }
        Command::Validate => {
            let summary = service.catalog().summary();
            println!("systems:    {}", summary.systems);
            println!("subregions: {}", summary.subregions);
            println!("regions:    {}", summary.regions);
            println!("rings:      {}", summary.rings);
            println!("vertices:   {}", summary.vertices);
            for system in service.catalog().systems() {
                println!("{}: [{}]", system.name, system.subregions.join(", "));
            }
            Ok(())
        }
    }
}

fn load_catalog(path: Option<&Path>) -> Result<RegionCatalog> {
    let config = match path {
        Some(path) => {
            info!("Loading catalog from {}", path.display());
            CatalogConfig::load_from_file(path)?
        }
        None => CatalogConfig::builtin()?,
    };
    RegionCatalog::from_config(config).context("Catalog failed integrity check")
}

fn run_point(service: &ClassifierService, lon: f64, lat: f64, json: bool) -> Result<()> {
    let (lon, lat) = check_coordinates(lon, lat)?;
    let classification = service.classify(lon, lat);

    if json {
        let report = ClassifiedPoint::new(lon, lat, classification);
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("systems: {}", classification.systems.join(", "));
        println!("regions: {}", classification.regions.join(", "));
    }

    Ok(())
}

fn run_batch(
    service: &ClassifierService,
    input: &Path,
    output: Option<&Path>,
    options: &TaggingOptions,
) -> Result<()> {
    info!("Tagging records from {}", input.display());

    let reader = open_input(input)?;
    let writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file {}", path.display())
        })?)),
        None => Box::new(io::stdout().lock()),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} rows ({per_sec})")?,
    );

    let mut cache = LookupCache::new();
    let stats = tag_records(service, reader, writer, options, &mut cache, &pb)?;
    pb.finish_and_clear();

    info!(
        "Batch complete: {} rows, {} distinct coordinates",
        stats.rows,
        cache.len()
    );

    Ok(())
}
