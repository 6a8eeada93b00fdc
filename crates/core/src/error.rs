//! Application error handling with codes, context and recovery suggestions
//!
//! This module provides structured error types with:
//! - Error codes for programmatic handling
//! - Detailed error context
//! - Recovery suggestions
//! - Serializable error reports
//!
//! Geometry and sample-validation failures keep their own precise types
//! ([`GeoError`], [`ValidationError`]) and convert into [`Error`] at the
//! storage, configuration and export boundaries.

use crate::validation::{ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use walktrack_geo::GeoError;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // IO errors (2xxx)
    IoError = 2000,
    FileNotFound = 2001,
    PermissionDenied = 2002,

    // Configuration errors (3xxx)
    ConfigParseError = 3002,
    InvalidConfigValue = 3004,

    // Geometry errors (4xxx)
    InvalidCoordinate = 4001,
    IdenticalPoints = 4002,
    InvalidMeasurement = 4003,

    // Storage errors (5xxx)
    StorageError = 5000,
    NotInitialized = 5001,
    EmptyRoute = 5002,

    // Validation errors (6xxx)
    InvalidSample = 6001,
    InvalidAccuracyLevel = 6002,
    InvalidLabel = 6003,

    // Export errors (7xxx)
    CsvWriteFailed = 7001,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            2 => "IO",
            3 => "Configuration",
            4 => "Geometry",
            5 => "Storage",
            6 => "Validation",
            7 => "Export",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    // Convenience constructors

    pub fn invalid_config_value(key: &str, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InvalidConfigValue,
            format!("Invalid value for {}: {}", key, message.into()),
        )
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    pub fn not_initialized() -> Self {
        Self::new(ErrorCode::NotInitialized, "Route storage is not initialized")
            .with_suggestion("Call initialize() with a point store before using route storage")
    }

    pub fn empty_route(label: &str) -> Self {
        Self::new(
            ErrorCode::EmptyRoute,
            format!("Route '{}' has no location points to save", label),
        )
    }

    /// Returns true if this is the "store handle missing" precondition failure
    pub fn is_not_initialized(&self) -> bool {
        self.code == ErrorCode::NotInitialized
    }
}

/// Serializable error report for logging and API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub code_str: String,
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

// Implement From for common error types

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::PermissionDenied,
            _ => ErrorCode::IoError,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

impl From<GeoError> for Error {
    fn from(err: GeoError) -> Self {
        let code = match err {
            GeoError::IdenticalPoints { .. } => ErrorCode::IdenticalPoints,
            GeoError::NegativeValue { .. } | GeoError::NonPositiveValue { .. } => {
                ErrorCode::InvalidMeasurement
            }
            _ => ErrorCode::InvalidCoordinate,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        let code = match err.kind {
            ValidationErrorKind::InvalidGpsAccuracyLevel => ErrorCode::InvalidAccuracyLevel,
            ValidationErrorKind::InvalidLabel => ErrorCode::InvalidLabel,
            _ => ErrorCode::InvalidSample,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}
