//! Convenience result type alias for HelpHub.

use crate::error::AppError;

/// A specialized `Result` type for HelpHub operations.
pub type AppResult<T> = Result<T, AppError>;
