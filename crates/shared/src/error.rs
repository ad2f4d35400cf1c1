//! Application-wide error types.

use serde::Serialize;
use thiserror::Error;

use crate::jwt::JwtError;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing, malformed, or expired credentials.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Caller role is not allowed on this operation.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed request input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Well-formed request refused by a domain rule
    /// (vehicle unavailable, insufficient funds).
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Conflict with existing state (duplicate username, plate, return).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error envelope returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// Stable machine-readable code.
    pub error: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::BusinessRule(_) => 422,
            Self::Conflict(_) => 409,
            Self::Database(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Builds the response envelope.
    ///
    /// Server-side failures are reported with a generic message so driver
    /// details never reach the client.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        let message = match self {
            Self::Database(_) | Self::Internal(_) => "An internal error occurred".to_string(),
            Self::Unauthorized(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::Validation(m)
            | Self::BusinessRule(m)
            | Self::Conflict(m) => m.clone(),
        };
        ErrorBody {
            error: self.error_code(),
            message,
        }
    }
}

impl From<JwtError> for AppError {
    fn from(e: JwtError) -> Self {
        match e {
            JwtError::EncodingError(msg) => Self::Internal(msg),
            JwtError::Expired => Self::Unauthorized("Token has expired".to_string()),
            JwtError::DecodingError(_) => Self::Unauthorized("Invalid token".to_string()),
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
    #[case(AppError::NotFound(String::new()), 404, "NOT_FOUND")]
    #[case(AppError::Validation(String::new()), 400, "VALIDATION_ERROR")]
    #[case(AppError::BusinessRule(String::new()), 422, "BUSINESS_RULE_VIOLATION")]
    #[case(AppError::Conflict(String::new()), 409, "CONFLICT")]
    #[case(AppError::Database(String::new()), 500, "DATABASE_ERROR")]
    #[case(AppError::Internal(String::new()), 500, "INTERNAL_ERROR")]
    fn test_status_and_code(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_code(), code);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::NotFound("vehicle".into()).to_string(),
            "Not found: vehicle"
        );
        assert_eq!(
            AppError::BusinessRule("insufficient funds".into()).to_string(),
            "Business rule violation: insufficient funds"
        );
    }

    #[test]
    fn test_body_passes_client_messages_through() {
        let body = AppError::Conflict("plate already registered".into()).body();
        assert_eq!(body.error, "CONFLICT");
        assert_eq!(body.message, "plate already registered");
    }

    #[test]
    fn test_body_hides_database_detail() {
        let body = AppError::Database("connection reset by peer".into()).body();
        assert_eq!(body.error, "DATABASE_ERROR");
        assert!(!body.message.contains("peer"));
    }

    #[test]
    fn test_jwt_errors_map_to_unauthorized() {
        assert_eq!(AppError::from(JwtError::Expired).status_code(), 401);
        assert_eq!(
            AppError::from(JwtError::DecodingError("bad".into())).status_code(),
            401
        );
        assert_eq!(
            AppError::from(JwtError::EncodingError("bad".into())).status_code(),
            500
        );
    }
}
