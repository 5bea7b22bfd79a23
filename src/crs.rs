//! UTM ↔ WGS84 conversion.
//!
//! Transverse Mercator on the WGS84 ellipsoid using the USGS series
//! expansions, parameterized by UTM zone and hemisphere. Accuracy is well
//! under a meter anywhere inside a zone, which is far below the GPS noise in
//! the survey data this crate processes.

use crate::error::{ExtractError, Result};
use crate::UtmPoint;

// WGS84 ellipsoid
const SEMI_MAJOR_AXIS: f64 = 6_378_137.0;
const FLATTENING: f64 = 1.0 / 298.257_223_563;

// UTM projection constants
const SCALE_FACTOR: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// A UTM zone (1..=60) plus hemisphere.
///
/// # Example
/// ```
/// use transectwalk::UtmZone;
/// let zone = UtmZone::new(32, false).unwrap(); // northwestern Italy
/// assert_eq!(zone.central_meridian_deg(), 9.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UtmZone {
    zone: u8,
    south: bool,
}

impl UtmZone {
    /// Create a zone, rejecting numbers outside 1..=60.
    pub fn new(zone: u8, south: bool) -> Result<Self> {
        if zone == 0 || zone > 60 {
            return Err(ExtractError::InvalidUtmZone { zone });
        }
        Ok(Self { zone, south })
    }

    /// The zone number.
    pub fn zone(&self) -> u8 {
        self.zone
    }

    /// Whether the zone is in the southern hemisphere.
    pub fn is_south(&self) -> bool {
        self.south
    }

    /// Longitude of the zone's central meridian in degrees.
    pub fn central_meridian_deg(&self) -> f64 {
        f64::from(self.zone) * 6.0 - 183.0
    }
}

/// Convert a projected UTM point to WGS84 `(longitude, latitude)` degrees.
pub fn utm_to_wgs84(point: &UtmPoint, zone: UtmZone) -> (f64, f64) {
    let e2 = FLATTENING * (2.0 - FLATTENING);
    let ep2 = e2 / (1.0 - e2);
    let e4 = e2 * e2;
    let e6 = e4 * e2;

    let x = point.easting - FALSE_EASTING;
    let y = if zone.south {
        point.northing - FALSE_NORTHING_SOUTH
    } else {
        point.northing
    };

    // Footprint latitude from the rectifying meridian arc
    let m = y / SCALE_FACTOR;
    let mu = m / (SEMI_MAJOR_AXIS * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));
    let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());

    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1.powi(2) / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let sin_phi1 = phi1.sin();
    let cos_phi1 = phi1.cos();
    let tan_phi1 = phi1.tan();

    let c1 = ep2 * cos_phi1 * cos_phi1;
    let t1 = tan_phi1 * tan_phi1;
    let nu1 = SEMI_MAJOR_AXIS / (1.0 - e2 * sin_phi1 * sin_phi1).sqrt();
    let rho1 = SEMI_MAJOR_AXIS * (1.0 - e2) / (1.0 - e2 * sin_phi1 * sin_phi1).powf(1.5);
    let d = x / (nu1 * SCALE_FACTOR);

    let lat = phi1
        - (nu1 * tan_phi1 / rho1)
            * (d.powi(2) / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1)
                    * d.powi(6)
                    / 720.0);

    let lon = zone.central_meridian_deg().to_radians()
        + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1)
                * d.powi(5)
                / 120.0)
            / cos_phi1;

    (lon.to_degrees(), lat.to_degrees())
}

/// Convert WGS84 `(longitude, latitude)` degrees to a projected UTM point.
pub fn wgs84_to_utm(lon_deg: f64, lat_deg: f64, zone: UtmZone) -> UtmPoint {
    let e2 = FLATTENING * (2.0 - FLATTENING);
    let ep2 = e2 / (1.0 - e2);
    let e4 = e2 * e2;
    let e6 = e4 * e2;

    let phi = lat_deg.to_radians();
    let lambda = lon_deg.to_radians();
    let lambda0 = zone.central_meridian_deg().to_radians();

    let sin_phi = phi.sin();
    let cos_phi = phi.cos();
    let tan_phi = phi.tan();

    let nu = SEMI_MAJOR_AXIS / (1.0 - e2 * sin_phi * sin_phi).sqrt();
    let t = tan_phi * tan_phi;
    let c = ep2 * cos_phi * cos_phi;
    let a = cos_phi * (lambda - lambda0);

    // Meridian arc length from the equator
    let m = SEMI_MAJOR_AXIS
        * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * phi).sin());

    let easting = FALSE_EASTING
        + SCALE_FACTOR
            * nu
            * (a + (1.0 - t + c) * a.powi(3) / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a.powi(5) / 120.0);

    let mut northing = SCALE_FACTOR
        * (m + nu
            * tan_phi
            * (a.powi(2) / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a.powi(4) / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a.powi(6) / 720.0));

    if zone.south {
        northing += FALSE_NORTHING_SOUTH;
    }

    UtmPoint::new(easting, northing)
}
