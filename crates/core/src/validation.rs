//! GPS sample validation
//!
//! Checks a [`LocationPoint`] field by field and stops at the first failure,
//! always in the same order so the reported error is deterministic:
//!
//! 1. latitude in `[-90, 90]`
//! 2. longitude in `[-180, 180]`
//! 3. accuracy `>= 0`
//! 4. speed absent or `>= 0`
//! 5. heading absent or in `[0, 360]`
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use walktrack_core::sample::LocationPoint;
//! use walktrack_core::validation::{validate_sample, ValidationErrorKind};
//!
//! let sample = LocationPoint::new(35.6812, 139.7671, Utc::now(), 5.0).with_speed(-1.0);
//! let result = validate_sample(&sample);
//!
//! assert!(!result.is_valid());
//! assert_eq!(result.error().unwrap().kind, ValidationErrorKind::NegativeSpeed);
//! ```

use crate::sample::LocationPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use walktrack_geo::{GeoError, MAX_LATITUDE, MAX_LONGITUDE};

/// Kind of validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorKind {
    InvalidType,
    InvalidNumber,
    LatitudeOutOfRange,
    LongitudeOutOfRange,
    NegativeAccuracy,
    NegativeSpeed,
    InvalidHeading,
    IdenticalPoints,
    NegativeValue,
    NonPositiveValue,
    InvalidGpsAccuracyLevel,
    InvalidTimestamp,
    InvalidLabel,
}

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationError {
    /// Kind of failure
    pub kind: ValidationErrorKind,
    /// Field that failed validation
    pub field: String,
    /// Message embedding the actual value and the accepted range
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(
        kind: ValidationErrorKind,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<GeoError> for ValidationError {
    fn from(err: GeoError) -> Self {
        let kind = match err {
            GeoError::InvalidType { .. } => ValidationErrorKind::InvalidType,
            GeoError::InvalidNumber { .. } => ValidationErrorKind::InvalidNumber,
            GeoError::LatitudeOutOfRange { .. } => ValidationErrorKind::LatitudeOutOfRange,
            GeoError::LongitudeOutOfRange { .. } => ValidationErrorKind::LongitudeOutOfRange,
            GeoError::IdenticalPoints { .. } => ValidationErrorKind::IdenticalPoints,
            GeoError::NegativeValue { .. } => ValidationErrorKind::NegativeValue,
            GeoError::NonPositiveValue { .. } => ValidationErrorKind::NonPositiveValue,
        };
        ValidationError::new(kind, err.field(), err.to_string())
    }
}

/// Validation result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    is_valid: bool,
    error: Option<ValidationError>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

impl ValidationResult {
    /// A passing result
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    /// A failing result carrying the first error found
    pub fn invalid(error: ValidationError) -> Self {
        Self {
            is_valid: false,
            error: Some(error),
        }
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Get the error, if any
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Convert to Result type
    pub fn into_result(self) -> Result<(), ValidationError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl From<Result<(), ValidationError>> for ValidationResult {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => ValidationResult::valid(),
            Err(error) => ValidationResult::invalid(error),
        }
    }
}

/// Validate a GPS sample, reporting the first failing field.
pub fn validate_sample(sample: &LocationPoint) -> ValidationResult {
    check_sample(sample).into()
}

/// Boolean-only form of [`validate_sample`].
pub fn is_valid_sample(sample: &LocationPoint) -> bool {
    validate_sample(sample).is_valid()
}

fn check_sample(sample: &LocationPoint) -> Result<(), ValidationError> {
    check_range(
        "latitude",
        sample.latitude,
        -MAX_LATITUDE,
        MAX_LATITUDE,
        ValidationErrorKind::LatitudeOutOfRange,
    )?;
    check_range(
        "longitude",
        sample.longitude,
        -MAX_LONGITUDE,
        MAX_LONGITUDE,
        ValidationErrorKind::LongitudeOutOfRange,
    )?;
    check_non_negative("accuracy", sample.accuracy, ValidationErrorKind::NegativeAccuracy)?;
    if let Some(speed) = sample.speed {
        check_non_negative("speed", speed, ValidationErrorKind::NegativeSpeed)?;
    }
    if let Some(heading) = sample.heading {
        check_range("heading", heading, 0.0, 360.0, ValidationErrorKind::InvalidHeading)?;
    }
    Ok(())
}

fn check_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new(
            ValidationErrorKind::InvalidNumber,
            field,
            format!("{} must be a finite number, got {}", capitalize(field), value),
        ))
    }
}

fn check_range(
    field: &str,
    value: f64,
    min: f64,
    max: f64,
    kind: ValidationErrorKind,
) -> Result<(), ValidationError> {
    check_finite(field, value)?;
    if value < min || value > max {
        return Err(ValidationError::new(
            kind,
            field,
            format!("{} must be between {} and {}, got {}", capitalize(field), min, max, value),
        ));
    }
    Ok(())
}

fn check_non_negative(
    field: &str,
    value: f64,
    kind: ValidationErrorKind,
) -> Result<(), ValidationError> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::new(
            kind,
            field,
            format!("{} must be 0 or greater, got {}", capitalize(field), value),
        ));
    }
    Ok(())
}

/// Validate a user-chosen route label.
///
/// The data model accepts any string; blank labels are rejected by the
/// layers that persist routes.
pub fn validate_label(label: &str) -> ValidationResult {
    if label.trim().is_empty() {
        ValidationResult::invalid(ValidationError::new(
            ValidationErrorKind::InvalidLabel,
            "label",
            "Route label must not be empty",
        ))
    } else {
        ValidationResult::valid()
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use proptest::prelude::*;

    fn sample() -> LocationPoint {
        let ts = DateTime::<Utc>::from_timestamp(1_714_550_400, 0).unwrap();
        LocationPoint::new(35.6812, 139.7671, ts, 5.0)
            .with_speed(1.4)
            .with_heading(42.0)
    }

    fn kind_of(sample: &LocationPoint) -> Option<ValidationErrorKind> {
        validate_sample(sample).error().map(|e| e.kind)
    }

    #[test]
    fn test_valid_sample() {
        let result = validate_sample(&sample());
        assert!(result.is_valid());
        assert!(result.error().is_none());
        assert!(is_valid_sample(&sample()));
    }

    #[test]
    fn test_optional_fields_absent() {
        let mut s = sample();
        s.speed = None;
        s.heading = None;
        assert!(is_valid_sample(&s));
    }

    #[test]
    fn test_latitude_out_of_range() {
        let mut s = sample();
        s.latitude = 90.5;
        let result = validate_sample(&s);
        let err = result.error().unwrap();
        assert_eq!(err.kind, ValidationErrorKind::LatitudeOutOfRange);
        assert_eq!(err.field, "latitude");
        assert_eq!(err.message, "Latitude must be between -90 and 90, got 90.5");
    }

    #[test]
    fn test_longitude_out_of_range() {
        let mut s = sample();
        s.longitude = -180.1;
        assert_eq!(kind_of(&s), Some(ValidationErrorKind::LongitudeOutOfRange));
    }

    #[test]
    fn test_negative_accuracy() {
        let mut s = sample();
        s.accuracy = -0.5;
        let result = validate_sample(&s);
        assert_eq!(result.error().unwrap().kind, ValidationErrorKind::NegativeAccuracy);
        assert!(result.error().unwrap().message.contains("-0.5"));
    }

    #[test]
    fn test_negative_speed() {
        let s = sample().with_speed(-1.0);
        assert_eq!(kind_of(&s), Some(ValidationErrorKind::NegativeSpeed));
    }

    #[test]
    fn test_heading_bounds() {
        assert!(is_valid_sample(&sample().with_heading(0.0)));
        assert!(is_valid_sample(&sample().with_heading(360.0)));
        assert_eq!(
            kind_of(&sample().with_heading(360.5)),
            Some(ValidationErrorKind::InvalidHeading)
        );
        assert_eq!(
            kind_of(&sample().with_heading(-1.0)),
            Some(ValidationErrorKind::InvalidHeading)
        );
    }

    #[test]
    fn test_non_finite_values() {
        let mut s = sample();
        s.latitude = f64::NAN;
        let result = validate_sample(&s);
        assert_eq!(result.error().unwrap().kind, ValidationErrorKind::InvalidNumber);
        assert_eq!(result.error().unwrap().field, "latitude");

        let s = sample().with_speed(f64::INFINITY);
        assert_eq!(kind_of(&s), Some(ValidationErrorKind::InvalidNumber));
    }

    #[test]
    fn test_first_failure_wins() {
        let mut s = sample().with_speed(-3.0).with_heading(500.0);
        s.accuracy = -1.0;
        s.longitude = 999.0;
        assert_eq!(kind_of(&s), Some(ValidationErrorKind::LongitudeOutOfRange));

        s.longitude = 0.0;
        assert_eq!(kind_of(&s), Some(ValidationErrorKind::NegativeAccuracy));

        s.accuracy = 0.0;
        assert_eq!(kind_of(&s), Some(ValidationErrorKind::NegativeSpeed));
    }

    #[test]
    fn test_into_result() {
        assert!(validate_sample(&sample()).into_result().is_ok());
        let err = validate_sample(&sample().with_speed(-2.0))
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), "speed: Speed must be 0 or greater, got -2");
    }

    #[test]
    fn test_label_validation() {
        assert!(validate_label("Morning Walk").is_valid());
        assert!(!validate_label("").is_valid());
        assert_eq!(
            validate_label("  \t").error().unwrap().kind,
            ValidationErrorKind::InvalidLabel
        );
    }

    #[test]
    fn test_from_geo_error() {
        let err: ValidationError = GeoError::IdenticalPoints {
            field: "from/to".to_string(),
        }
        .into();
        assert_eq!(err.kind, ValidationErrorKind::IdenticalPoints);
        assert_eq!(err.field, "from/to");
    }

    proptest! {
        #[test]
        fn prop_validation_is_idempotent(
            lat in -100.0f64..100.0,
            lon in -200.0f64..200.0,
            accuracy in -5.0f64..50.0,
            speed in proptest::option::of(-2.0f64..10.0),
            heading in proptest::option::of(-10.0f64..370.0),
        ) {
            let mut s = sample();
            s.latitude = lat;
            s.longitude = lon;
            s.accuracy = accuracy;
            s.speed = speed;
            s.heading = heading;

            prop_assert_eq!(validate_sample(&s), validate_sample(&s));
        }
    }
}
