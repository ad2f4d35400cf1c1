//! Employee routes: login and back-office management.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use fleet_core::auth::{hash_password, verify_password};
use fleet_db::{
    EmployeeRepository,
    entities::employees,
    repositories::{CreateEmployeeInput, UpdateEmployeeInput},
};
use fleet_shared::{Role, types::EmployeeId};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::{LoginResponse, customers::LoginRequest, validated};
use crate::{AppState, error::ApiError, extractors::ApiJson, middleware::AuthUser};

/// Creates the unauthenticated employee routes.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/employees/login", post(login))
}

/// Creates the authenticated employee routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee)
                .put(update_employee)
                .delete(delete_employee),
        )
}

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating an employee.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Phone number.
    #[validate(length(min = 5, max = 20))]
    pub telp: String,
    /// Login name.
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    /// Plain-text password.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Request body for updating an employee.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    /// New display name.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New phone number.
    #[validate(length(min = 5, max = 20))]
    pub telp: Option<String>,
    /// New password.
    #[validate(length(min = 8, max = 128))]
    pub password: Option<String>,
}

fn repo(state: &AppState) -> EmployeeRepository {
    EmployeeRepository::new((*state.db).clone())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /employees/login - Authenticate an employee and issue a token.
async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let payload = validated(payload)?;

    let Some(employee) = repo(&state).find_by_username(&payload.username).await? else {
        info!(username = %payload.username, "Login attempt for unknown employee");
        return Err(ApiError::unauthorized("Invalid username or password"));
    };
    if !verify_password(&payload.password, &employee.password_hash)? {
        info!(employee_id = %employee.id, "Failed login attempt - invalid password");
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let access_token = state
        .jwt_service
        .generate_access_token(employee.id, Role::Employee)?;

    info!(employee_id = %employee.id, "Employee logged in");
    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.jwt_service.access_token_expires_in(),
    }))
}

/// POST /employees - Create an employee (ADMIN).
async fn create_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<CreateEmployeeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_any(&[Role::Admin])?;
    let payload = validated(payload)?;
    let password_hash = hash_password(&payload.password)?;

    let employee = repo(&state)
        .create(CreateEmployeeInput {
            name: payload.name,
            telp: payload.telp,
            username: payload.username,
            password_hash,
        })
        .await?;

    info!(employee_id = %employee.id, "Employee created");
    Ok((StatusCode::CREATED, Json(employee)))
}

/// GET /employees - List active employees (ADMIN).
async fn list_employees(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<employees::Model>>, ApiError> {
    auth.require_any(&[Role::Admin])?;
    Ok(Json(repo(&state).list().await?))
}

/// GET /employees/{id} - Get an active employee (ADMIN, or the employee).
async fn get_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<EmployeeId>,
) -> Result<Json<employees::Model>, ApiError> {
    let is_self = auth.role() == Role::Employee && auth.subject() == id.into_inner();
    if !is_self {
        auth.require_any(&[Role::Admin])?;
    }

    repo(&state)
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Employee not found: {id}")))
}

/// PUT /employees/{id} - Update an employee (ADMIN).
async fn update_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<EmployeeId>,
    ApiJson(payload): ApiJson<UpdateEmployeeRequest>,
) -> Result<Json<employees::Model>, ApiError> {
    auth.require_any(&[Role::Admin])?;
    let payload = validated(payload)?;
    let password_hash = payload
        .password
        .as_deref()
        .map(hash_password)
        .transpose()?;

    let employee = repo(&state)
        .update(
            id,
            UpdateEmployeeInput {
                name: payload.name,
                telp: payload.telp,
                password_hash,
            },
        )
        .await?;
    Ok(Json(employee))
}

/// DELETE /employees/{id} - Soft-delete an employee (ADMIN).
///
/// Rentals the employee handled keep referencing the row.
async fn delete_employee(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<EmployeeId>,
) -> Result<StatusCode, ApiError> {
    auth.require_any(&[Role::Admin])?;
    repo(&state).soft_delete(id).await?;
    info!(employee_id = %id, "Employee deleted");
    Ok(StatusCode::NO_CONTENT)
}
