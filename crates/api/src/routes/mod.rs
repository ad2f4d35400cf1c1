//! API route definitions.

use axum::{Router, middleware};
use serde::Serialize;
use validator::Validate;

use crate::{AppState, error::ApiError, middleware::auth::auth_middleware};

pub mod customers;
pub mod employees;
pub mod health;
pub mod rentals;
pub mod returns;
pub mod vehicles;

/// Token issued by the customer and employee login endpoints.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Signed HS256 access token.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: &'static str,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Runs field-level validation on a request body.
pub(crate) fn validated<T: Validate>(payload: T) -> Result<T, ApiError> {
    payload.validate()?;
    Ok(payload)
}

/// Creates the API router with protected routes that need state for middleware.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(customers::routes())
        .merge(employees::routes())
        .merge(vehicles::routes())
        .merge(rentals::routes())
        .merge(returns::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(customers::public_routes())
        .merge(employees::public_routes())
        .merge(protected_routes)
}
