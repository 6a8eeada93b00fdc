//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
///
/// Every variant carries the label of the offending field so callers can
/// surface a field-labeled message without re-deriving which input failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoError {
    /// Input is not a coordinate record with numeric latitude and longitude
    #[error("{field} must be a record with numeric latitude and longitude")]
    InvalidType { field: String },

    /// NaN or infinite value
    #[error("{field} must be a finite number, got {value}")]
    InvalidNumber { field: String, value: f64 },

    /// Latitude magnitude above 90 degrees
    #[error("{field} must be between -90 and 90 degrees, got {value}")]
    LatitudeOutOfRange { field: String, value: f64 },

    /// Longitude magnitude above 180 degrees
    #[error("{field} must be between -180 and 180 degrees, got {value}")]
    LongitudeOutOfRange { field: String, value: f64 },

    /// Bearing between coincident points
    #[error("bearing is undefined for identical points ({field})")]
    IdenticalPoints { field: String },

    /// Negative value where only zero or more is accepted
    #[error("{field} must not be negative, got {value}")]
    NegativeValue { field: String, value: f64 },

    /// Zero or negative value where only positive is accepted
    #[error("{field} must be greater than zero, got {value}")]
    NonPositiveValue { field: String, value: f64 },
}

/// Error code for integration with walktrack-core error handling.
/// Range: 4xxx for geometry errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    InvalidType = 4001,
    InvalidNumber = 4002,
    LatitudeOutOfRange = 4003,
    LongitudeOutOfRange = 4004,
    IdenticalPoints = 4005,
    NegativeValue = 4006,
    NonPositiveValue = 4007,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::InvalidType { .. } => GeoErrorCode::InvalidType,
            GeoError::InvalidNumber { .. } => GeoErrorCode::InvalidNumber,
            GeoError::LatitudeOutOfRange { .. } => GeoErrorCode::LatitudeOutOfRange,
            GeoError::LongitudeOutOfRange { .. } => GeoErrorCode::LongitudeOutOfRange,
            GeoError::IdenticalPoints { .. } => GeoErrorCode::IdenticalPoints,
            GeoError::NegativeValue { .. } => GeoErrorCode::NegativeValue,
            GeoError::NonPositiveValue { .. } => GeoErrorCode::NonPositiveValue,
        }
    }

    /// Returns the label of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            GeoError::InvalidType { field }
            | GeoError::InvalidNumber { field, .. }
            | GeoError::LatitudeOutOfRange { field, .. }
            | GeoError::LongitudeOutOfRange { field, .. }
            | GeoError::IdenticalPoints { field }
            | GeoError::NegativeValue { field, .. }
            | GeoError::NonPositiveValue { field, .. } => field,
        }
    }
}
