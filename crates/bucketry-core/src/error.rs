//! Unified error types for Bucketry.
//!
//! Registry, dispatch and catalog failures all surface as [`AppError`] so
//! callers can propagate them with `?` and branch on [`ErrorKind`].

use std::fmt;
use thiserror::Error;

/// Error categorization used across every Bucketry crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A descriptor lookup by id or qualified name found nothing.
    NotFound,
    /// A descriptor was malformed at registration time (missing or bad id,
    /// empty name).
    InvalidDescriptor,
    /// A file operation or reconciliation was attempted on an abstract
    /// descriptor.
    AbstractBucket,
    /// The descriptor lifecycle was misused (e.g. registering after the
    /// registry was sealed).
    Usage,
    /// No backend could be resolved for a descriptor.
    NoBackendConfigured,
    /// A storage backend failed.
    Storage,
    /// The catalog or its unit of work failed.
    Catalog,
    /// A configuration error occurred.
    Configuration,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::InvalidDescriptor => write!(f, "INVALID_DESCRIPTOR"),
            Self::AbstractBucket => write!(f, "ABSTRACT_BUCKET"),
            Self::Usage => write!(f, "USAGE"),
            Self::NoBackendConfigured => write!(f, "NO_BACKEND_CONFIGURED"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Catalog => write!(f, "CATALOG"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified error used throughout Bucketry.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an invalid-descriptor error.
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDescriptor, message)
    }

    /// Create an abstract-bucket error.
    pub fn abstract_bucket(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AbstractBucket, message)
    }

    /// Create a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Usage, message)
    }

    /// Create a no-backend-configured error.
    pub fn no_backend(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoBackendConfigured, message)
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a catalog error.
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Catalog, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Storage, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
