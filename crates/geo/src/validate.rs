//! Coordinate validation.
//!
//! Typed coordinates are checked for finiteness and range. Untyped payloads
//! (JSON records from a location provider or a database driver) are first
//! checked for shape, then converted and checked the same way.

use crate::{Coordinate, GeoError, Result};

/// Absolute tolerance, in degrees, under which two points are the same.
pub const COORDINATE_EPSILON: f64 = 1e-10;

/// Largest accepted latitude magnitude.
pub const MAX_LATITUDE: f64 = 90.0;

/// Largest accepted longitude magnitude.
pub const MAX_LONGITUDE: f64 = 180.0;

/// Returns true when both axes differ by less than [`COORDINATE_EPSILON`].
#[inline]
pub fn points_equal(a: &Coordinate, b: &Coordinate) -> bool {
    (a.latitude - b.latitude).abs() < COORDINATE_EPSILON
        && (a.longitude - b.longitude).abs() < COORDINATE_EPSILON
}

/// Validates a typed coordinate.
///
/// Errors are labeled `"{label}.latitude"` or `"{label}.longitude"`.
/// Finiteness of both axes is checked before either range.
pub fn validate_coordinate(point: &Coordinate, label: &str) -> Result<()> {
    if !point.latitude.is_finite() {
        return Err(GeoError::InvalidNumber {
            field: format!("{label}.latitude"),
            value: point.latitude,
        });
    }
    if !point.longitude.is_finite() {
        return Err(GeoError::InvalidNumber {
            field: format!("{label}.longitude"),
            value: point.longitude,
        });
    }
    if point.latitude.abs() > MAX_LATITUDE {
        return Err(GeoError::LatitudeOutOfRange {
            field: format!("{label}.latitude"),
            value: point.latitude,
        });
    }
    if point.longitude.abs() > MAX_LONGITUDE {
        return Err(GeoError::LongitudeOutOfRange {
            field: format!("{label}.longitude"),
            value: point.longitude,
        });
    }
    Ok(())
}

/// Parses and validates an untyped `{ "latitude": .., "longitude": .. }` record.
///
/// Anything that is not an object with exactly those two numeric fields is
/// an [`GeoError::InvalidType`].
///
/// # Example
/// ```
/// use walktrack_geo::parse_coordinate_value;
/// use serde_json::json;
///
/// let value = json!({"latitude": 35.68, "longitude": 139.76});
/// let coord = parse_coordinate_value(&value, "start").unwrap();
/// assert_eq!(coord.latitude, 35.68);
///
/// assert!(parse_coordinate_value(&json!([35.68, 139.76]), "start").is_err());
/// ```
pub fn parse_coordinate_value(value: &serde_json::Value, label: &str) -> Result<Coordinate> {
    let invalid_type = || GeoError::InvalidType {
        field: label.to_string(),
    };

    let record = value.as_object().ok_or_else(invalid_type)?;
    if record.len() != 2 {
        return Err(invalid_type());
    }

    let latitude = record
        .get("latitude")
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(invalid_type)?;
    let longitude = record
        .get("longitude")
        .and_then(serde_json::Value::as_f64)
        .ok_or_else(invalid_type)?;

    let coord = Coordinate::new(latitude, longitude);
    validate_coordinate(&coord, label)?;
    Ok(coord)
}
