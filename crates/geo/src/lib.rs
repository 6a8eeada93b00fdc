//! Geometry engine for walking routes.
//!
//! This crate provides:
//! - Haversine great-circle distance in meters
//! - Initial bearing (forward azimuth) between two points
//! - Speed in km/h from a distance and a duration
//! - Coordinate validation for typed and untyped inputs
//! - Batch path-length calculation with optional parallelism
//!
//! All functions are pure and deterministic. Invalid input is always an
//! error, never clamped.
//!
//! # Example
//!
//! ```
//! use walktrack_geo::{bearing, distance, speed_kmh, Coordinate};
//!
//! let tokyo = Coordinate::new(35.6812, 139.7671);
//! let shibuya = Coordinate::new(35.6580, 139.7016);
//!
//! let meters = distance(&tokyo, &shibuya).unwrap();
//! assert!((meters - 6454.804).abs() < 0.01);
//!
//! let degrees = bearing(&tokyo, &shibuya).unwrap();
//! assert!((0.0..360.0).contains(&degrees));
//!
//! assert_eq!(speed_kmh(1000.0, 600.0).unwrap(), 6.0);
//! ```

mod bearing;
mod error;
mod haversine;
mod speed;
mod validate;
pub mod batch;

pub use batch::{calculate_path_lengths, path_length, PathItem, PathLength};
pub use bearing::bearing;
pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{distance, haversine_distance_meters, EARTH_RADIUS_M};
pub use speed::speed_kmh;
pub use validate::{
    parse_coordinate_value, points_equal, validate_coordinate, COORDINATE_EPSILON, MAX_LATITUDE,
    MAX_LONGITUDE,
};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if both values are finite and within range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude.abs() <= MAX_LATITUDE
            && self.longitude.abs() <= MAX_LONGITUDE
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// Rounds to 6 decimal digits.
///
/// Bearings and speeds are rounded so that values computed on different
/// platforms compare equal.
#[inline]
pub fn round_to_micro(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
