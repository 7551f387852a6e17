//! Custom error types for data dictionary generation.
//!
//! This module provides the error hierarchy using `thiserror`. Every failure
//! falls into one of three caller-facing categories (see [`ErrorKind`]):
//! loading the dataset, configuring the run, or writing the report.
//!
//! Errors are serializable so they can be emitted as `{code, message}` JSON.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

use crate::config::ConfigValidationError;

/// Broad category of a [`DictionaryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The dataset could not be resolved, read or parsed.
    Load,
    /// The call was configured with an invalid option.
    Configuration,
    /// The report could not be written.
    Write,
    /// Anything else (wrapped library errors without more specific context).
    Internal,
}

/// The main error type for data dictionary generation.
#[derive(Error, Debug)]
pub enum DictionaryError {
    /// The requested loader name does not match any supported loader.
    #[error("Unknown reader '{0}'")]
    UnknownLoader(String),

    /// The dataset could not be read or parsed by the selected loader.
    #[error("Failed to load dataset '{path}': {reason}")]
    LoadFailed { path: String, reason: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The `include` selector is not one of the supported values.
    #[error("Invalid include selector '{0}' (expected 'all', 'numeric' or 'categorical')")]
    InvalidInclude(String),

    /// The `include` selector matched none of the dataset's columns.
    #[error("No columns match include selector '{include}'")]
    NoMatchingColumns { include: String },

    /// The report file could not be written.
    #[error("Failed to write report '{path}': {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DictionaryError>,
    },
}

impl DictionaryError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DictionaryError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get a stable error code for callers that dispatch on failures.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownLoader(_) => "UNKNOWN_LOADER",
            Self::LoadFailed { .. } => "LOAD_FAILED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::InvalidInclude(_) => "INVALID_INCLUDE",
            Self::NoMatchingColumns { .. } => "NO_MATCHING_COLUMNS",
            Self::WriteFailed { .. } => "WRITE_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownLoader(_) | Self::LoadFailed { .. } => ErrorKind::Load,
            Self::InvalidConfig(_) | Self::InvalidInclude(_) | Self::NoMatchingColumns { .. } => {
                ErrorKind::Configuration
            }
            Self::WriteFailed { .. } => ErrorKind::Write,
            Self::Io(_) | Self::Polars(_) => ErrorKind::Internal,
            Self::WithContext { source, .. } => source.kind(),
        }
    }

    /// Check if this error is a lookup failure (unknown loader name).
    pub fn is_lookup(&self) -> bool {
        match self {
            Self::UnknownLoader(_) => true,
            Self::WithContext { source, .. } => source.is_lookup(),
            _ => false,
        }
    }
}

impl From<ConfigValidationError> for DictionaryError {
    fn from(err: ConfigValidationError) -> Self {
        match err {
            ConfigValidationError::UnknownLoader(name) => DictionaryError::UnknownLoader(name),
            ConfigValidationError::InvalidInclude(value) => DictionaryError::InvalidInclude(value),
            other => DictionaryError::InvalidConfig(other.to_string()),
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for DictionaryError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("DictionaryError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for dictionary operations.
pub type Result<T> = std::result::Result<T, DictionaryError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| DictionaryError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            DictionaryError::UnknownLoader("read_nonexistent".to_string()).error_code(),
            "UNKNOWN_LOADER"
        );
        assert_eq!(
            DictionaryError::InvalidInclude("everything".to_string()).error_code(),
            "INVALID_INCLUDE"
        );
    }

    #[test]
    fn test_kind() {
        assert_eq!(
            DictionaryError::UnknownLoader("x".to_string()).kind(),
            ErrorKind::Load
        );
        assert_eq!(
            DictionaryError::LoadFailed {
                path: "data.csv".to_string(),
                reason: "missing".to_string()
            }
            .kind(),
            ErrorKind::Load
        );
        assert_eq!(
            DictionaryError::NoMatchingColumns {
                include: "numeric".to_string()
            }
            .kind(),
            ErrorKind::Configuration
        );
        let write = DictionaryError::WriteFailed {
            path: "out.txt".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(write.kind(), ErrorKind::Write);
    }

    #[test]
    fn test_wrapped_library_errors_are_internal() {
        let io: DictionaryError = std::io::Error::from(std::io::ErrorKind::Other).into();
        assert_eq!(io.kind(), ErrorKind::Internal);
        assert_eq!(io.error_code(), "IO_ERROR");

        let polars: DictionaryError =
            polars::error::PolarsError::ComputeError("bad cast".into()).into();
        assert_eq!(polars.kind(), ErrorKind::Internal);
        assert_eq!(polars.error_code(), "POLARS_ERROR");
    }

    #[test]
    fn test_is_lookup() {
        assert!(DictionaryError::UnknownLoader("read_x".to_string()).is_lookup());
        assert!(
            DictionaryError::UnknownLoader("read_x".to_string())
                .with_context("Resolving loader")
                .is_lookup()
        );
        assert!(!DictionaryError::InvalidConfig("bad".to_string()).is_lookup());
    }

    #[test]
    fn test_from_config_validation_error() {
        let err: DictionaryError = ConfigValidationError::UnknownLoader("read_x".into()).into();
        assert!(matches!(err, DictionaryError::UnknownLoader(ref n) if n == "read_x"));

        let err: DictionaryError = ConfigValidationError::EmptyNaRep.into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_error_serialization() {
        let error = DictionaryError::LoadFailed {
            path: "titanic.csv".to_string(),
            reason: "No such file or directory".to_string(),
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("LOAD_FAILED"));
        assert!(json.contains("titanic.csv"));
    }

    #[test]
    fn test_with_context() {
        let error = DictionaryError::InvalidInclude("foo".to_string()).with_context("While summarizing");
        assert!(error.to_string().contains("While summarizing"));
        assert_eq!(error.error_code(), "INVALID_INCLUDE");
        assert_eq!(error.kind(), ErrorKind::Configuration);
    }
}
