//! transectwalk CLI - Batch export of walked transect sub-paths
//!
//! Usage:
//!   transectwalk-cli extract --transects <csv> --paths <csv> [--output <file>]
//!
//! Reads the survey CSV exports (transects with their polylines, paths with
//! their recorded completeness percentages), runs the path-completeness
//! extraction, and writes the resulting line features as a WGS84 GeoJSON
//! FeatureCollection.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use transectwalk::{
    extract_all, feature_collection, SurveyPath, Transect, TransectStore, UtmPoint, UtmZone,
};

#[derive(Parser)]
#[command(name = "transectwalk-cli")]
#[command(about = "Batch export of walked transect sub-paths", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract walked sub-path features from transect and path records
    Extract {
        /// CSV file with transect records (id, province, length, geometry)
        #[arg(long)]
        transects: PathBuf,

        /// CSV file with path records (id, transect_id, date, completeness, ...)
        #[arg(long)]
        paths: PathBuf,

        /// Output GeoJSON file (omit to only print the summary)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// UTM zone of the transect coordinates
        #[arg(long, default_value = "32")]
        utm_zone: u8,

        /// Transect coordinates are in the southern hemisphere
        #[arg(long)]
        south: bool,
    },
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Extract {
            transects,
            paths,
            output,
            utm_zone,
            south,
        } => {
            if let Err(e) = run_extract(
                &transects,
                &paths,
                output.as_ref(),
                utm_zone,
                south,
                cli.verbose,
            ) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }
}

/// A transect row as exported from the survey database
#[derive(Debug, Deserialize)]
struct TransectRow {
    id: String,
    province: String,
    /// Precomputed length in meters; derived from the geometry when absent
    length: Option<f64>,
    /// Polyline as "easting northing; easting northing; ...", parts
    /// separated by "|"
    geometry: String,
}

/// A path row as exported from the survey database
#[derive(Debug, Deserialize)]
struct PathRow {
    id: String,
    transect_id: String,
    date: NaiveDate,
    completeness: Option<u8>,
    observer: String,
    institution: String,
    category: String,
}

impl From<PathRow> for SurveyPath {
    fn from(row: PathRow) -> Self {
        SurveyPath {
            id: row.id,
            transect_id: row.transect_id,
            date: row.date,
            completeness: row.completeness,
            observer: row.observer,
            institution: row.institution,
            category: row.category,
        }
    }
}

fn run_extract(
    transects_csv: &PathBuf,
    paths_csv: &PathBuf,
    output: Option<&PathBuf>,
    utm_zone: u8,
    south: bool,
    verbose: bool,
) -> Result<(), String> {
    let zone = UtmZone::new(utm_zone, south).map_err(|e| e.to_string())?;

    println!("\n{}", "=".repeat(60));
    println!("PATH-COMPLETENESS EXTRACTION");
    println!("{}", "=".repeat(60));

    let store = load_transects(transects_csv, verbose)?;
    let paths = load_paths(paths_csv, verbose)?;

    println!(
        "\nLoaded {} transects, {} paths",
        store.len(),
        paths.len()
    );

    let result = extract_all(&store, &paths);

    println!("\n{}", "=".repeat(60));
    println!("SUMMARY");
    println!("{}", "=".repeat(60));
    println!("  Features extracted: {}", result.features.len());
    println!("  Paths skipped:      {}", result.skipped.len());

    let counts = result.skip_counts();
    let mut reasons: Vec<_> = counts.iter().collect();
    reasons.sort();
    for (reason, count) in reasons {
        println!("    {reason}: {count}");
    }

    for rejected in &result.rejected {
        eprintln!("  [ERR] path {}: {}", rejected.path_id, rejected.error);
    }

    if let Some(output) = output {
        let collection =
            feature_collection(&result.features, zone).map_err(|e| e.to_string())?;
        let pretty = serde_json::to_string_pretty(&collection).map_err(|e| e.to_string())?;
        fs::write(output, pretty).map_err(|e| e.to_string())?;
        println!(
            "\nWrote {} features to {}",
            result.features.len(),
            output.display()
        );
    }

    Ok(())
}

/// Load transect records from CSV into a store
fn load_transects(path: &PathBuf, verbose: bool) -> Result<TransectStore, String> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;

    let mut store = TransectStore::new();

    for row in reader.deserialize() {
        let row: TransectRow = row.map_err(|e| format!("bad transect row: {e}"))?;
        match parse_geometry(&row.geometry) {
            Ok(parts) => {
                if verbose {
                    let points: usize = parts.iter().map(Vec::len).sum();
                    println!("  [OK] transect {} - {} points", row.id, points);
                }
                let mut transect = Transect::new(&row.id, &row.province, parts);
                if let Some(length) = row.length {
                    transect = transect.with_total_length(length);
                }
                store.insert(transect);
            }
            Err(e) => {
                eprintln!("  [ERR] transect {}: {e}", row.id);
            }
        }
    }

    Ok(store)
}

/// Load path records from CSV
fn load_paths(path: &PathBuf, verbose: bool) -> Result<Vec<SurveyPath>, String> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;

    let mut paths = Vec::new();

    for row in reader.deserialize() {
        let row: PathRow = row.map_err(|e| format!("bad path row: {e}"))?;
        if verbose {
            println!(
                "  [OK] path {} - transect {}, {}",
                row.id, row.transect_id, row.date
            );
        }
        paths.push(SurveyPath::from(row));
    }

    Ok(paths)
}

/// Parse a geometry string: points "easting northing" separated by ";",
/// parts separated by "|"
fn parse_geometry(geometry: &str) -> Result<Vec<Vec<UtmPoint>>, String> {
    let mut parts = Vec::new();

    for part_str in geometry.split('|') {
        let part_str = part_str.trim();
        if part_str.is_empty() {
            continue;
        }

        let mut part = Vec::new();
        for point_str in part_str.split(';') {
            let point_str = point_str.trim();
            if point_str.is_empty() {
                continue;
            }

            let mut coords = point_str.split_whitespace();
            let easting = coords
                .next()
                .ok_or_else(|| format!("missing easting in '{point_str}'"))?
                .parse::<f64>()
                .map_err(|e| format!("bad easting in '{point_str}': {e}"))?;
            let northing = coords
                .next()
                .ok_or_else(|| format!("missing northing in '{point_str}'"))?
                .parse::<f64>()
                .map_err(|e| format!("bad northing in '{point_str}': {e}"))?;

            let point = UtmPoint::new(easting, northing);
            if !point.is_valid() {
                return Err(format!("non-finite coordinates in '{point_str}'"));
            }
            part.push(point);
        }

        if !part.is_empty() {
            parts.push(part);
        }
    }

    Ok(parts)
}
