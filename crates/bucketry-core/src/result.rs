//! Convenience result type alias for Bucketry.

use crate::error::AppError;

/// A specialized `Result` type for bucket operations.
pub type AppResult<T> = Result<T, AppError>;
