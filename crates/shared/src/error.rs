//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error classes.
///
/// Every failure surfaced to a client falls into one of these classes,
/// which fixes both the HTTP status and the machine-readable error code.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication failed (missing or invalid credential).
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// The caller's role does not grant the attempted operation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Malformed or missing input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A state transition was attempted on a record that already left
    /// the required state (e.g. re-deciding a closed proposal).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Persistence failure. The operation did not take effect and may
    /// be retried.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::InvalidState(_) => 409,
            Self::Storage(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::Unauthorized(String::new()), 401, "UNAUTHORIZED")]
    #[case(AppError::Forbidden(String::new()), 403, "FORBIDDEN")]
    #[case(AppError::Validation(String::new()), 400, "VALIDATION_ERROR")]
    #[case(AppError::NotFound(String::new()), 404, "NOT_FOUND")]
    #[case(AppError::InvalidState(String::new()), 409, "INVALID_STATE")]
    #[case(AppError::Storage(String::new()), 500, "STORAGE_ERROR")]
    fn test_error_class_table(
        #[case] error: AppError,
        #[case] status: u16,
        #[case] code: &str,
    ) {
        assert_eq!(error.status_code(), status);
        assert_eq!(error.error_code(), code);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Validation("category is required".into()).to_string(),
            "Validation error: category is required"
        );
        assert_eq!(
            AppError::InvalidState("proposal already approved".into()).to_string(),
            "Invalid state: proposal already approved"
        );
        assert_eq!(
            AppError::Storage("connection reset".into()).to_string(),
            "Storage error: connection reset"
        );
    }
}
