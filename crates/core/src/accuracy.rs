//! GPS accuracy tiers.
//!
//! A tier trades positional precision for power consumption when the
//! location provider is watching. The set is closed: unknown names are
//! rejected, never mapped to a nearby tier.

use crate::validation::{ValidationError, ValidationErrorKind, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Requested accuracy of the location provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GpsAccuracy {
    #[default]
    BestForNavigation,
    Best,
    NearestTenMeters,
    HundredMeters,
    Kilometer,
    ThreeKilometers,
}

impl GpsAccuracy {
    /// Every tier, most precise first.
    pub const ALL: [GpsAccuracy; 6] = [
        GpsAccuracy::BestForNavigation,
        GpsAccuracy::Best,
        GpsAccuracy::NearestTenMeters,
        GpsAccuracy::HundredMeters,
        GpsAccuracy::Kilometer,
        GpsAccuracy::ThreeKilometers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GpsAccuracy::BestForNavigation => "best-for-navigation",
            GpsAccuracy::Best => "best",
            GpsAccuracy::NearestTenMeters => "nearest-ten-meters",
            GpsAccuracy::HundredMeters => "hundred-meters",
            GpsAccuracy::Kilometer => "kilometer",
            GpsAccuracy::ThreeKilometers => "three-kilometers",
        }
    }
}

impl fmt::Display for GpsAccuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GpsAccuracy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GpsAccuracy::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = GpsAccuracy::ALL.iter().map(GpsAccuracy::as_str).collect();
                ValidationError::new(
                    ValidationErrorKind::InvalidGpsAccuracyLevel,
                    "accuracy",
                    format!(
                        "Unknown GPS accuracy level '{}', must be one of: {}",
                        s,
                        allowed.join(", ")
                    ),
                )
            })
    }
}

/// Checks that `level` names one of the accuracy tiers.
pub fn validate_accuracy_level(level: &str) -> ValidationResult {
    match level.parse::<GpsAccuracy>() {
        Ok(_) => ValidationResult::valid(),
        Err(err) => ValidationResult::invalid(err),
    }
}

/// Boolean-only form of [`validate_accuracy_level`].
pub fn is_valid_accuracy_level(level: &str) -> bool {
    validate_accuracy_level(level).is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for tier in GpsAccuracy::ALL {
            assert_eq!(tier.as_str().parse::<GpsAccuracy>().unwrap(), tier);
            assert_eq!(tier.to_string(), tier.as_str());
        }
    }

    #[test]
    fn test_unknown_level_rejected() {
        let result = validate_accuracy_level("ultra");
        assert!(!result.is_valid());
        let err = result.error().unwrap();
        assert_eq!(err.kind, ValidationErrorKind::InvalidGpsAccuracyLevel);
        assert!(err.message.contains("ultra"));
        assert!(err.message.contains("three-kilometers"));
    }

    #[test]
    fn test_no_coercion() {
        assert!(!is_valid_accuracy_level("Best"));
        assert!(!is_valid_accuracy_level(" best"));
        assert!(!is_valid_accuracy_level(""));
        assert!(is_valid_accuracy_level("best"));
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let json = serde_json::to_string(&GpsAccuracy::NearestTenMeters).unwrap();
        assert_eq!(json, "\"nearest-ten-meters\"");
        assert!(serde_json::from_str::<GpsAccuracy>("\"nearestTenMeters\"").is_err());
    }
}
