//! Unified error handling for extraction.
//!
//! Only inputs that are corrupt rather than merely absent become errors:
//! an out-of-range completeness percentage, a non-positive transect length
//! handed to the walk, a degenerate polyline. Absent data (missing transect,
//! missing completeness value) is a skip, not an error — see
//! [`SkipReason`](crate::SkipReason).

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors raised by the extraction pipeline.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Completeness percentage outside 1..=100. Never clamped.
    #[error("completeness {value}% is outside the valid range 1-100")]
    InvalidCompleteness { value: u8 },

    /// Transect length that would make the percentage undefined.
    #[error("transect length {length} is not a positive finite number")]
    NonPositiveLength { length: f64 },

    /// Polyline too short to walk.
    #[error("polyline has {point_count} points, at least {minimum_required} required")]
    InsufficientPoints {
        point_count: usize,
        minimum_required: usize,
    },

    /// UTM zone outside 1..=60.
    #[error("UTM zone {zone} is outside the valid range 1-60")]
    InvalidUtmZone { zone: u8 },

    /// Feature serialization failure in the GeoJSON writer.
    #[error("feature serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}
