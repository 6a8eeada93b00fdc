//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes.

use crate::{points_equal, validate_coordinate, Coordinate, Result};

/// Earth's mean radius in meters (IUGG mean radius R1).
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Calculates the validated great-circle distance between two coordinates in meters.
///
/// Returns exactly `0.0` when the points are equal within
/// [`COORDINATE_EPSILON`](crate::COORDINATE_EPSILON).
///
/// # Errors
/// Fails when either coordinate is non-finite or out of range. The error
/// field is labeled `from.*` or `to.*`.
///
/// # Example
/// ```
/// use walktrack_geo::{distance, Coordinate};
///
/// let tokyo = Coordinate::new(35.6812, 139.7671);
/// let shibuya = Coordinate::new(35.6580, 139.7016);
///
/// let meters = distance(&tokyo, &shibuya).unwrap();
/// assert!((meters - 6454.8044).abs() < 0.001);
/// ```
pub fn distance(from: &Coordinate, to: &Coordinate) -> Result<f64> {
    validate_coordinate(from, "from")?;
    validate_coordinate(to, "to")?;

    if points_equal(from, to) {
        return Ok(0.0);
    }

    Ok(haversine_distance_meters(from, to))
}

/// Calculates the great-circle distance between two coordinates in meters.
///
/// No validation is performed; use [`distance`] for untrusted input.
///
/// # Arguments
/// * `from` - Starting coordinate
/// * `to` - Ending coordinate
///
/// # Returns
/// Distance in meters
#[inline]
pub fn haversine_distance_meters(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, _) = from.to_radians();
    let (lat2, _) = to.to_radians();

    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}
