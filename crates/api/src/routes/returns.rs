//! Vehicle return read routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use fleet_db::{ReturnRepository, repositories::ReturnDetail};
use fleet_shared::{Role, types::ReturnId};

use crate::{AppState, error::ApiError, middleware::AuthUser};

/// Creates the return routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/returns", get(list_returns))
        .route("/returns/{id}", get(get_return))
}

/// GET /returns - List returns with their rental and customer
/// (ADMIN, EMPLOYEE).
async fn list_returns(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<ReturnDetail>>, ApiError> {
    auth.require_any(&[Role::Admin, Role::Employee])?;
    let details = ReturnRepository::new((*state.db).clone())
        .list_details()
        .await?;
    Ok(Json(details))
}

/// GET /returns/{id} - Get one return (ADMIN, EMPLOYEE).
async fn get_return(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ReturnId>,
) -> Result<Json<ReturnDetail>, ApiError> {
    auth.require_any(&[Role::Admin, Role::Employee])?;
    let detail = ReturnRepository::new((*state.db).clone())
        .get_detail(id)
        .await?;
    Ok(Json(detail))
}
