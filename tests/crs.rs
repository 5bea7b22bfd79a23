//! Tests for UTM <-> WGS84 conversion

use transectwalk::error::ExtractError;
use transectwalk::{utm_to_wgs84, wgs84_to_utm, UtmPoint, UtmZone};

fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (a - b).abs() < epsilon
}

fn zone32n() -> UtmZone {
    UtmZone::new(32, false).unwrap()
}

#[test]
fn test_zone_validation() {
    assert!(matches!(
        UtmZone::new(0, false),
        Err(ExtractError::InvalidUtmZone { zone: 0 })
    ));
    assert!(matches!(
        UtmZone::new(61, true),
        Err(ExtractError::InvalidUtmZone { zone: 61 })
    ));
    assert!(UtmZone::new(1, false).is_ok());
    assert!(UtmZone::new(60, true).is_ok());
}

#[test]
fn test_central_meridians() {
    assert_eq!(UtmZone::new(1, false).unwrap().central_meridian_deg(), -177.0);
    assert_eq!(UtmZone::new(30, false).unwrap().central_meridian_deg(), -3.0);
    assert_eq!(UtmZone::new(31, false).unwrap().central_meridian_deg(), 3.0);
    assert_eq!(UtmZone::new(32, false).unwrap().central_meridian_deg(), 9.0);
    assert_eq!(UtmZone::new(60, false).unwrap().central_meridian_deg(), 177.0);
}

#[test]
fn test_central_meridian_equator_forward() {
    // On the central meridian at the equator the projection is the identity
    // up to the false easting
    let point = wgs84_to_utm(9.0, 0.0, zone32n());
    assert!(approx_eq(point.easting, 500_000.0, 1e-6));
    assert!(approx_eq(point.northing, 0.0, 1e-6));
}

#[test]
fn test_central_meridian_equator_inverse() {
    let zone31 = UtmZone::new(31, false).unwrap();
    let (lon, lat) = utm_to_wgs84(&UtmPoint::new(500_000.0, 0.0), zone31);
    assert!(approx_eq(lon, 3.0, 1e-9));
    assert!(approx_eq(lat, 0.0, 1e-9));
}

#[test]
fn test_known_northing_at_45_degrees() {
    // On the central meridian the northing is the scaled meridian arc:
    // S(45 deg) = 4984944 m on WGS84, times k0 = 0.9996
    let point = wgs84_to_utm(9.0, 45.0, zone32n());
    assert!(approx_eq(point.easting, 500_000.0, 1e-6));
    assert!(approx_eq(point.northing, 4_982_950.0, 20.0));
}

#[test]
fn test_round_trip_piedmont() {
    // Wolf-survey country: northwestern Italy, zone 32N
    let fixtures = [(7.56, 45.07), (7.02, 44.39), (8.61, 44.91), (9.0, 46.0)];

    for (lon, lat) in fixtures {
        let projected = wgs84_to_utm(lon, lat, zone32n());
        let (lon_back, lat_back) = utm_to_wgs84(&projected, zone32n());
        assert!(
            approx_eq(lon_back, lon, 1e-6),
            "lon {lon} -> {lon_back}"
        );
        assert!(
            approx_eq(lat_back, lat, 1e-6),
            "lat {lat} -> {lat_back}"
        );
    }
}

#[test]
fn test_round_trip_zone_edges() {
    // Points away from the central meridian, where the series terms matter
    let fixtures = [(6.2, 44.0), (11.8, 47.5)];

    for (lon, lat) in fixtures {
        let projected = wgs84_to_utm(lon, lat, zone32n());
        let (lon_back, lat_back) = utm_to_wgs84(&projected, zone32n());
        assert!(approx_eq(lon_back, lon, 1e-6));
        assert!(approx_eq(lat_back, lat, 1e-6));
    }
}

#[test]
fn test_round_trip_southern_hemisphere() {
    let zone19s = UtmZone::new(19, true).unwrap();
    let (lon, lat) = (-70.65, -33.45);

    let projected = wgs84_to_utm(lon, lat, zone19s);
    assert!(projected.northing > 0.0 && projected.northing < 10_000_000.0);

    let (lon_back, lat_back) = utm_to_wgs84(&projected, zone19s);
    assert!(approx_eq(lon_back, lon, 1e-6));
    assert!(approx_eq(lat_back, lat, 1e-6));
}

#[test]
fn test_northing_increases_with_latitude() {
    let low = wgs84_to_utm(7.5, 44.0, zone32n());
    let high = wgs84_to_utm(7.5, 46.0, zone32n());
    assert!(high.northing > low.northing);
}
