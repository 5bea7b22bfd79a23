//! The completeness walk: truncating a transect polyline at the point where
//! the cumulative walked length reaches a recorded percentage.
//!
//! This is the geometric core of the extraction pipeline. Distances are
//! planar Euclidean distances in the transect's projected CRS (meters for
//! UTM); no geodesic correction is applied.

use crate::error::{ExtractError, Result};
use crate::UtmPoint;

/// Minimum number of points for a walkable polyline.
pub const MIN_POLYLINE_POINTS: usize = 2;

/// Planar distance between two projected points in meters.
pub fn segment_length(a: &UtmPoint, b: &UtmPoint) -> f64 {
    (b.easting - a.easting).hypot(b.northing - a.northing)
}

/// Total planar length of a polyline in meters.
pub fn polyline_length(points: &[UtmPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| segment_length(&pair[0], &pair[1]))
        .sum()
}

/// Result of walking a transect polyline toward a completeness target.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk {
    /// Points covered by the walk, starting from (and excluding) the first
    /// polyline point
    pub points: Vec<UtmPoint>,
    /// Cumulative planar length of the walked prefix in meters
    pub walked_length: f64,
    /// Whether the rounded percentage reached the target. When false the
    /// caller should treat the walk as not complete and emit no feature.
    pub reached: bool,
}

/// Walk a transect polyline until the cumulative length reaches
/// `completeness_percent` of `total_length`.
///
/// Accumulation starts at the second polyline point: each step adds the
/// distance from the previous point and appends the current point to the
/// output, so the transect's first point is never itself a candidate
/// truncation point. After each step the walked fraction is rounded to a
/// whole percent (half away from zero) and compared against the target;
/// the walk stops at the first point at or past it.
///
/// If rounding or degenerate geometry keeps the ratio from ever reaching the
/// target, the returned [`Walk`] covers the full polyline with
/// `reached = false`.
///
/// # Errors
///
/// - [`ExtractError::InvalidCompleteness`] if the percentage is 0 or > 100
/// - [`ExtractError::NonPositiveLength`] if `total_length` is zero, negative
///   or not finite (the ratio would be undefined; checked before any division)
/// - [`ExtractError::InsufficientPoints`] if the polyline has < 2 points
///
/// # Example
/// ```
/// use transectwalk::{walk_to_completeness, UtmPoint};
///
/// let transect = vec![
///     UtmPoint::new(0.0, 0.0),
///     UtmPoint::new(0.0, 10.0),
///     UtmPoint::new(0.0, 20.0),
/// ];
/// let walk = walk_to_completeness(&transect, 20.0, 50).unwrap();
/// assert!(walk.reached);
/// assert_eq!(walk.points, vec![UtmPoint::new(0.0, 10.0)]);
/// ```
pub fn walk_to_completeness(
    points: &[UtmPoint],
    total_length: f64,
    completeness_percent: u8,
) -> Result<Walk> {
    if completeness_percent == 0 || completeness_percent > 100 {
        return Err(ExtractError::InvalidCompleteness {
            value: completeness_percent,
        });
    }
    if !total_length.is_finite() || total_length <= 0.0 {
        return Err(ExtractError::NonPositiveLength {
            length: total_length,
        });
    }
    if points.len() < MIN_POLYLINE_POINTS {
        return Err(ExtractError::InsufficientPoints {
            point_count: points.len(),
            minimum_required: MIN_POLYLINE_POINTS,
        });
    }

    let target = i64::from(completeness_percent);
    let mut cumulative = 0.0;
    let mut walked = Vec::with_capacity(points.len() - 1);

    for i in 1..points.len() {
        cumulative += segment_length(&points[i - 1], &points[i]);
        walked.push(points[i]);

        let ratio = (cumulative / total_length * 100.0).round() as i64;
        if ratio >= target {
            return Ok(Walk {
                points: walked,
                walked_length: cumulative,
                reached: true,
            });
        }
    }

    Ok(Walk {
        points: walked,
        walked_length: cumulative,
        reached: false,
    })
}
