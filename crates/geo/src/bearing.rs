//! Initial bearing (forward azimuth) between two coordinates.

use crate::{points_equal, round_to_micro, validate_coordinate, Coordinate, GeoError, Result};

/// Calculates the initial compass bearing from `from` to `to` in degrees.
///
/// The result is normalized into `[0, 360)` and rounded to 6 decimal digits.
///
/// # Errors
/// * [`GeoError::IdenticalPoints`] when the points coincide
/// * coordinate errors when either point is non-finite or out of range
///
/// # Example
/// ```
/// use walktrack_geo::{bearing, Coordinate};
///
/// let tokyo = Coordinate::new(35.6812, 139.7671);
/// let ueno = Coordinate::new(35.7138, 139.7774);
///
/// let degrees = bearing(&tokyo, &ueno).unwrap();
/// assert!((degrees - 14.387869).abs() < 1e-9);
/// ```
pub fn bearing(from: &Coordinate, to: &Coordinate) -> Result<f64> {
    validate_coordinate(from, "from")?;
    validate_coordinate(to, "to")?;

    if points_equal(from, to) {
        return Err(GeoError::IdenticalPoints {
            field: "from/to".to_string(),
        });
    }

    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();
    let d_lon = lon2 - lon1;

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    let degrees = (y.atan2(x).to_degrees() + 360.0) % 360.0;
    let rounded = round_to_micro(degrees);

    // 359.9999996 rounds up to 360
    Ok(if rounded >= 360.0 { 0.0 } else { rounded })
}
