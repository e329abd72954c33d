//! Error types for the validator.
//!
//! Validation findings are never returned as errors; they are data in an
//! [`ErrorList`]. This type covers the operational failures around the
//! engine (reading manifests, configuration) and the explicit rejection
//! produced by [`crate::validation::ensure_valid`].

use thiserror::Error;

use crate::field::ErrorList;

/// Error type for validator operations
#[derive(Error, Debug)]
pub enum Error {
    /// Reading input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Manifest could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Manifest decoded but is not an Ingress or a list of Ingresses
    #[error("Unsupported manifest: {0}")]
    Manifest(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// The Ingress failed validation
    #[error("Ingress {name} is invalid: {errors}")]
    Invalid { name: String, errors: ErrorList },
}

impl Error {
    /// Check if this error is a validation rejection rather than an operational failure
    pub fn is_invalid(&self) -> bool {
        matches!(self, Error::Invalid { .. })
    }

    /// The field errors behind a rejection
    pub fn field_errors(&self) -> Option<&ErrorList> {
        match self {
            Error::Invalid { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

/// Result type alias for validator operations
pub type Result<T> = std::result::Result<T, Error>;
