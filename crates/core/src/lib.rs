//! Core types for walktrack
//!
//! This crate provides the pieces shared by every walktrack component:
//!
//! - **GPS samples**: the immutable [`LocationPoint`] and the provider
//!   transfer record it is converted from
//! - **Validation**: deterministic, first-failure sample validation with
//!   typed error kinds
//! - **Accuracy tiers**: the closed set of location-provider accuracy levels
//! - **Error handling**: coded errors with context and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//!
//! # Example
//!
//! ```rust
//! use walktrack_core::sample::{LocationCoords, LocationEvent, LocationPoint};
//! use walktrack_core::validation::is_valid_sample;
//!
//! let event = LocationEvent {
//!     coords: LocationCoords {
//!         latitude: 35.6812,
//!         longitude: 139.7671,
//!         accuracy: Some(5.0),
//!         speed: Some(1.4),
//!         heading: None,
//!     },
//!     timestamp: 1_714_550_400_000,
//! };
//!
//! let sample = LocationPoint::try_from(event).expect("well-formed event");
//! assert!(is_valid_sample(&sample));
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod accuracy;
pub mod config;
pub mod error;
pub mod sample;
pub mod validation;

pub use accuracy::GpsAccuracy;
pub use error::{Error, ErrorCode, Result, ResultExt};
pub use sample::LocationPoint;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::accuracy::{is_valid_accuracy_level, validate_accuracy_level, GpsAccuracy};
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{Error, ErrorCode, Result, ResultExt};
    pub use crate::sample::{LocationEvent, LocationPoint};
    pub use crate::validation::{
        is_valid_sample, validate_sample, ValidationError, ValidationErrorKind, ValidationResult,
    };
}
