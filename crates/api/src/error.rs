//! Error to HTTP response mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fleet_core::{auth::PasswordError, rental::RentalError};
use fleet_db::repositories::{CustomerError, DetailError, EmployeeError, VehicleError};
use fleet_shared::{AppError, JwtError};
use sea_orm::DbErr;
use tracing::error;
use validator::ValidationErrors;

/// API error type.
///
/// Wraps [`AppError`] so handlers can use `?` on any layer's error and get
/// the `{ "error", "message" }` envelope back.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// 401 with the given message.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self(AppError::Unauthorized(message.into()))
    }

    /// 403 with the given message.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self(AppError::Forbidden(message.into()))
    }

    /// 404 with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self(AppError::NotFound(message.into()))
    }

    /// Returns the wrapped error.
    #[must_use]
    pub const fn inner(&self) -> &AppError {
        &self.0
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }
        (status, Json(self.0.body())).into_response()
    }
}

macro_rules! into_api_error {
    ($($source:ty),+ $(,)?) => {
        $(
            impl From<$source> for ApiError {
                fn from(e: $source) -> Self {
                    Self(AppError::from(e))
                }
            }
        )+
    };
}

into_api_error!(
    AppError,
    RentalError,
    CustomerError,
    EmployeeError,
    VehicleError,
    DetailError,
    PasswordError,
    JwtError,
);

impl From<DbErr> for ApiError {
    fn from(e: DbErr) -> Self {
        Self(AppError::Database(e.to_string()))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(e: ValidationErrors) -> Self {
        Self(AppError::Validation(e.to_string()))
    }
}
