//! GPS samples and the location-provider transfer record.
//!
//! [`LocationEvent`] mirrors the loosely-typed payload pushed by a platform
//! location provider. It is converted into a [`LocationPoint`] at the
//! boundary so that nothing untyped reaches geometry, validation or session
//! logic.

use crate::validation::{ValidationError, ValidationErrorKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use walktrack_geo::{validate_coordinate, Coordinate};

/// A single GPS fix.
///
/// Immutable once created. Use
/// [`validate_sample`](crate::validation::validate_sample) before accepting
/// a sample from an untrusted source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
    /// Horizontal accuracy radius in meters
    pub accuracy: f64,
    /// Ground speed in m/s, if reported
    pub speed: Option<f64>,
    /// Direction of travel in degrees from true north, if reported
    pub heading: Option<f64>,
}

impl LocationPoint {
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>, accuracy: f64) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
            accuracy,
            speed: None,
            heading: None,
        }
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = Some(heading);
        self
    }

    /// Projects the sample onto a geometry coordinate.
    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Raw `coords` block of a provider location event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCoords {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub heading: Option<f64>,
}

/// Location event as pushed by the platform provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationEvent {
    pub coords: LocationCoords,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl TryFrom<LocationEvent> for LocationPoint {
    type Error = ValidationError;

    /// Rejects non-finite or out-of-range coordinates and non-positive
    /// timestamps. A missing accuracy becomes `0.0`; speed and heading are
    /// passed through and left to [`validate_sample`](crate::validation::validate_sample).
    fn try_from(event: LocationEvent) -> Result<Self, Self::Error> {
        let LocationEvent { coords, timestamp } = event;

        validate_coordinate(&Coordinate::new(coords.latitude, coords.longitude), "coords")?;

        if timestamp <= 0 {
            return Err(invalid_timestamp(timestamp));
        }
        let timestamp = DateTime::<Utc>::from_timestamp_millis(timestamp)
            .ok_or_else(|| invalid_timestamp(timestamp))?;

        Ok(Self {
            latitude: coords.latitude,
            longitude: coords.longitude,
            timestamp,
            accuracy: coords.accuracy.unwrap_or(0.0),
            speed: coords.speed,
            heading: coords.heading,
        })
    }
}

fn invalid_timestamp(millis: i64) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::InvalidTimestamp,
        "timestamp",
        format!("Timestamp must be a positive epoch-millisecond value, got {millis}"),
    )
}
