//! Convenience result type alias for Momentos.

use crate::error::AppError;

/// A specialized `Result` type for Momentos operations.
pub type AppResult<T> = Result<T, AppError>;
