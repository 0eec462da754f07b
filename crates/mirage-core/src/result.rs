//! Convenience result type alias for Mirage.

use crate::error::AppError;

/// A specialized `Result` type for Mirage operations.
pub type AppResult<T> = Result<T, AppError>;
