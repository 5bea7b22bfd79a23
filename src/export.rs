//! GeoJSON export of extracted features.
//!
//! The originating batch tool writes walked sub-paths to an ESRI line layer;
//! that sink stays external. This module covers the debug/interchange case:
//! a GeoJSON `FeatureCollection` in WGS84, one `LineString` feature per
//! extracted path with the full attribute record as properties.

use serde_json::{json, Value};

use crate::crs::UtmZone;
use crate::error::Result;
use crate::PathFeature;

/// Build a GeoJSON `FeatureCollection` from extracted features.
///
/// Geometry is reprojected from the transect CRS into WGS84 lon/lat using
/// `zone`.
pub fn feature_collection(features: &[PathFeature], zone: UtmZone) -> Result<Value> {
    let features: Vec<Value> = features
        .iter()
        .map(|feature| feature_value(feature, zone))
        .collect::<Result<_>>()?;

    Ok(json!({
        "type": "FeatureCollection",
        "features": features,
    }))
}

fn feature_value(feature: &PathFeature, zone: UtmZone) -> Result<Value> {
    let line = feature.to_wgs84_line_string(zone);
    let coordinates: Vec<Value> = line.coords().map(|c| json!([c.x, c.y])).collect();

    Ok(json!({
        "type": "Feature",
        "geometry": {
            "type": "LineString",
            "coordinates": coordinates,
        },
        "properties": serde_json::to_value(&feature.attributes)?,
    }))
}
