//! Tests for error module

use transectwalk::error::ExtractError;

#[test]
fn test_invalid_completeness_display() {
    let err = ExtractError::InvalidCompleteness { value: 150 };
    assert!(err.to_string().contains("150"));
    assert!(err.to_string().contains("1-100"));
}

#[test]
fn test_non_positive_length_display() {
    let err = ExtractError::NonPositiveLength { length: 0.0 };
    assert!(err.to_string().contains('0'));
}

#[test]
fn test_insufficient_points_display() {
    let err = ExtractError::InsufficientPoints {
        point_count: 1,
        minimum_required: 2,
    };
    assert!(err.to_string().contains("1 points"));
    assert!(err.to_string().contains('2'));
}

#[test]
fn test_invalid_utm_zone_display() {
    let err = ExtractError::InvalidUtmZone { zone: 70 };
    assert!(err.to_string().contains("70"));
}
