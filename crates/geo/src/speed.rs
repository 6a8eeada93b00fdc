//! Speed from distance and elapsed time.

use crate::{round_to_micro, GeoError, Result};

const MPS_TO_KMH: f64 = 3.6;

/// Converts a distance in meters covered in `seconds` into km/h.
///
/// The result is rounded to 6 decimal digits.
///
/// # Errors
/// * [`GeoError::InvalidNumber`] if either input is NaN or infinite
/// * [`GeoError::NegativeValue`] if `distance_meters < 0`
/// * [`GeoError::NonPositiveValue`] if `seconds <= 0`
///
/// # Example
/// ```
/// use walktrack_geo::speed_kmh;
///
/// // 1 km in 10 minutes
/// assert_eq!(speed_kmh(1000.0, 600.0).unwrap(), 6.0);
/// ```
pub fn speed_kmh(distance_meters: f64, seconds: f64) -> Result<f64> {
    if !distance_meters.is_finite() {
        return Err(GeoError::InvalidNumber {
            field: "distance".to_string(),
            value: distance_meters,
        });
    }
    if !seconds.is_finite() {
        return Err(GeoError::InvalidNumber {
            field: "seconds".to_string(),
            value: seconds,
        });
    }
    if distance_meters < 0.0 {
        return Err(GeoError::NegativeValue {
            field: "distance".to_string(),
            value: distance_meters,
        });
    }
    if seconds <= 0.0 {
        return Err(GeoError::NonPositiveValue {
            field: "seconds".to_string(),
            value: seconds,
        });
    }

    Ok(round_to_micro(distance_meters / seconds * MPS_TO_KMH))
}
