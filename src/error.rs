//! Error types for the contact book.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Index lookups never fail; only the store, configuration and service layers have
//! error paths.

use thiserror::Error;

/// Errors that can occur when reading or writing the contact store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic store error with context
    #[error("Store error: {0}")]
    Other(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Errors surfaced by the contact service to the HTTP layer.
///
/// A duplicate on add is not an error: it is reported through
/// [`crate::services::AddOutcome::Duplicate`]. A duplicate on update is.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// No contact carries the requested id
    #[error("Contact not found: {0}")]
    NotFound(String),

    /// Request payload was unusable
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// An update would reuse another contact's email or phone
    #[error("Contact {id} conflicts with contact {existing}")]
    Duplicate { id: String, existing: String },

    /// The backing store failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;
