//! # Transectwalk
//!
//! Path-completeness extraction for wolf-monitoring field surveys.
//!
//! Field teams walk fixed survey routes ("transects") looking for wolf signs
//! and record, for each walk ("path"), how much of the transect was actually
//! covered as a completeness percentage. This library turns those records
//! back into geometry:
//!
//! - Completeness walk: truncate a transect polyline at the point where the
//!   cumulative walked length reaches the recorded percentage
//! - Typed records for transects, paths and the derived line features
//! - Batch extraction with skip-and-continue error accounting
//! - UTM ↔ WGS84 conversion for exporting features in geographic coordinates
//! - GeoJSON export of the extracted sub-paths
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel batch extraction with rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use transectwalk::{extract_path, ExtractOutcome, SurveyPath, Transect, TransectStore, UtmPoint};
//!
//! // A straight 2 km transect surveyed in UTM 32N, two 1 km legs
//! let mut store = TransectStore::new();
//! store.insert(Transect::new(
//!     "TR-012",
//!     "CN",
//!     vec![vec![
//!         UtmPoint::new(395_000.0, 4_991_000.0),
//!         UtmPoint::new(395_000.0, 4_992_000.0),
//!         UtmPoint::new(395_000.0, 4_993_000.0),
//!     ]],
//! ));
//!
//! // One walk of that transect, half completed
//! let path = SurveyPath {
//!     id: "P-0345".to_string(),
//!     transect_id: "TR-012".to_string(),
//!     date: NaiveDate::from_ymd_opt(2024, 3, 17).unwrap(),
//!     completeness: Some(50),
//!     observer: "M. Rossi".to_string(),
//!     institution: "Parco Alpi Marittime".to_string(),
//!     category: "volunteer".to_string(),
//! };
//!
//! match extract_path(&store, &path).unwrap() {
//!     ExtractOutcome::Feature(feature) => {
//!         // The walk stopped at the 50% mark, one leg in
//!         assert_eq!(feature.points.len(), 1);
//!         assert_eq!(feature.attributes.month, "03");
//!     }
//!     ExtractOutcome::Skipped(reason) => panic!("unexpected skip: {reason}"),
//! }
//! ```

use chrono::{Datelike, NaiveDate};
use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{ExtractError, Result};

// Completeness walk (core truncation algorithm)
pub mod completeness;
pub use completeness::{polyline_length, segment_length, walk_to_completeness, Walk};

// UTM <-> WGS84 conversion
pub mod crs;
pub use crs::{utm_to_wgs84, wgs84_to_utm, UtmZone};

// In-memory transect store
pub mod store;
pub use store::TransectStore;

// Per-path and batch extraction
pub mod extract;
#[cfg(feature = "parallel")]
pub use extract::extract_all_parallel;
pub use extract::{
    extract_all, extract_path, BatchResult, ExtractOutcome, RejectedPath, SkipReason, SkippedPath,
};

// GeoJSON feature export
pub mod export;
pub use export::feature_collection;

// ============================================================================
// Core Types
// ============================================================================

/// A projected planar coordinate in meters (UTM easting/northing).
///
/// # Example
/// ```
/// use transectwalk::UtmPoint;
/// let point = UtmPoint::new(395_000.0, 4_991_000.0); // Piedmont, zone 32N
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtmPoint {
    pub easting: f64,
    pub northing: f64,
}

impl UtmPoint {
    /// Create a new projected point.
    pub fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }

    /// Check that both coordinates are finite.
    pub fn is_valid(&self) -> bool {
        self.easting.is_finite() && self.northing.is_finite()
    }
}

/// A fixed ground survey route, represented as a polyline in a projected CRS.
///
/// The geometry is stored as parts because the upstream store can hand back
/// multi-part lines; exactly one part is the supported case, anything else is
/// skipped during extraction. A transect is immutable once surveyed — edits
/// replace the whole polyline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transect {
    /// Transect identifier (e.g. "TR-012")
    pub id: String,
    /// Province code the transect lies in (e.g. "CN")
    pub province: String,
    /// Geometry parts; a well-formed transect has exactly one
    pub parts: Vec<Vec<UtmPoint>>,
    /// Planar length of the full polyline in meters
    pub total_length: f64,
}

impl Transect {
    /// Create a transect, deriving `total_length` from the geometry.
    pub fn new(id: &str, province: &str, parts: Vec<Vec<UtmPoint>>) -> Self {
        let total_length = parts.iter().map(|p| polyline_length(p)).sum();
        Self {
            id: id.to_string(),
            province: province.to_string(),
            parts,
            total_length,
        }
    }

    /// Override the derived length with a precomputed one (e.g. from the
    /// originating spatial database).
    pub fn with_total_length(mut self, total_length: f64) -> Self {
        self.total_length = total_length;
        self
    }

    /// The polyline, if the geometry has exactly one part.
    pub fn single_part(&self) -> Option<&[UtmPoint]> {
        match self.parts.as_slice() {
            [part] => Some(part.as_slice()),
            _ => None,
        }
    }
}

/// One dated walk of a transect.
///
/// `completeness` is the recorded percentage of the transect actually
/// covered, an integer in 1..=100; walks recorded without one are skipped
/// during extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurveyPath {
    /// Path identifier (e.g. "P-0345")
    pub id: String,
    /// Identifier of the walked transect
    pub transect_id: String,
    /// Date of the walk
    pub date: NaiveDate,
    /// Recorded completeness percentage, if any
    pub completeness: Option<u8>,
    /// Observer who walked the transect
    pub observer: String,
    /// Institution the observer belongs to
    pub institution: String,
    /// Survey category (e.g. "volunteer", "ranger")
    pub category: String,
}

/// Attribute record carried by an extracted line feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathAttributes {
    pub province: String,
    pub transect_id: String,
    pub path_id: String,
    pub completeness: u8,
    /// Walk date, serialized as an ISO date
    pub date: NaiveDate,
    /// Two-digit month of the walk, derived from `date`
    pub month: String,
    pub observer: String,
    pub institution: String,
    pub category: String,
}

impl PathAttributes {
    /// Assemble the attribute record for one extracted walk.
    pub fn from_records(transect: &Transect, path: &SurveyPath, completeness: u8) -> Self {
        Self {
            province: transect.province.clone(),
            transect_id: transect.id.clone(),
            path_id: path.id.clone(),
            completeness,
            date: path.date,
            month: format!("{:02}", path.date.month()),
            observer: path.observer.clone(),
            institution: path.institution.clone(),
            category: path.category.clone(),
        }
    }
}

/// An extracted walked sub-path: the truncated transect geometry plus the
/// path's descriptive attributes. Derived on demand, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathFeature {
    /// Truncated polyline, in the transect's projected CRS
    pub points: Vec<UtmPoint>,
    /// Cumulative planar length of the sub-path in meters
    pub walked_length: f64,
    pub attributes: PathAttributes,
}

impl PathFeature {
    /// The sub-path as a `geo::LineString` in projected coordinates.
    pub fn to_line_string(&self) -> LineString {
        LineString::new(
            self.points
                .iter()
                .map(|p| Coord {
                    x: p.easting,
                    y: p.northing,
                })
                .collect(),
        )
    }

    /// The sub-path as a `geo::LineString` in WGS84 lon/lat.
    pub fn to_wgs84_line_string(&self, zone: UtmZone) -> LineString {
        LineString::new(
            self.points
                .iter()
                .map(|p| {
                    let (lon, lat) = utm_to_wgs84(p, zone);
                    Coord { x: lon, y: lat }
                })
                .collect(),
        )
    }
}
