//! Customer routes: registration, login, profile, password, and balance.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use fleet_core::auth::{hash_password, verify_password};
use fleet_db::{
    CustomerRepository,
    entities::{customers, sea_orm_active_enums::CustomerRole},
    repositories::{CreateCustomerInput, UpdateCustomerInput},
};
use fleet_shared::{Role, types::CustomerId};
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use super::{LoginResponse, validated};
use crate::{AppState, error::ApiError, extractors::ApiJson, middleware::AuthUser};

/// Creates the unauthenticated customer routes.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/customers/register", post(register))
        .route("/customers/login", post(login))
}

/// Creates the authenticated customer routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers))
        .route("/customers/{id}", get(get_customer).put(update_customer))
        .route("/customers/{id}/change-password", put(change_password))
        .route("/customers/{id}/top-up", put(top_up))
        .route("/customers/{id}/balance", get(get_balance))
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Request body for customer registration.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Login name.
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    /// Plain-text password.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    /// Postal address.
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    /// Phone number.
    #[validate(length(min = 5, max = 20))]
    pub telp: String,
    /// `ADMIN` or `USER`; defaults to `USER`.
    #[serde(default)]
    pub role: Option<CustomerRole>,
}

/// Request body for customer and employee login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Login name.
    #[validate(length(min = 1))]
    pub username: String,
    /// Plain-text password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request body for a profile update.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    /// New display name.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New postal address.
    #[validate(length(min = 1, max = 255))]
    pub address: Option<String>,
    /// New phone number.
    #[validate(length(min = 5, max = 20))]
    pub telp: Option<String>,
}

/// Request body for a password change.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    /// Current password.
    #[validate(length(min = 1))]
    pub old_password: String,
    /// Replacement password.
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

/// Request body for a top-up.
#[derive(Debug, Deserialize, Validate)]
pub struct TopUpRequest {
    /// Amount to credit, in minor units.
    #[validate(range(min = 1))]
    pub amount: i64,
}

/// Current balance of a customer.
#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    /// Customer ID.
    pub customer_id: CustomerId,
    /// Balance in minor units.
    pub balance: i64,
}

fn repo(state: &AppState) -> CustomerRepository {
    CustomerRepository::new((*state.db).clone())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /customers/register - Register a customer with a zero balance.
async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = validated(payload)?;
    let password_hash = hash_password(&payload.password)?;

    let customer = repo(&state)
        .create(CreateCustomerInput {
            name: payload.name,
            username: payload.username,
            password_hash,
            address: payload.address,
            telp: payload.telp,
            role: payload.role.unwrap_or(CustomerRole::User),
        })
        .await?;

    info!(customer_id = %customer.id, "Customer registered");
    Ok((StatusCode::CREATED, Json(customer)))
}

/// POST /customers/login - Authenticate a customer and issue a token.
async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let payload = validated(payload)?;

    let Some(customer) = repo(&state).find_by_username(&payload.username).await? else {
        info!(username = %payload.username, "Login attempt for unknown customer");
        return Err(ApiError::unauthorized("Invalid username or password"));
    };
    if !verify_password(&payload.password, &customer.password_hash)? {
        info!(customer_id = %customer.id, "Failed login attempt - invalid password");
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let access_token = state
        .jwt_service
        .generate_access_token(customer.id, Role::from(customer.role))?;

    info!(customer_id = %customer.id, "Customer logged in");
    Ok(Json(LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.jwt_service.access_token_expires_in(),
    }))
}

/// GET /customers - List customers (ADMIN).
async fn list_customers(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<customers::Model>>, ApiError> {
    auth.require_any(&[Role::Admin])?;
    Ok(Json(repo(&state).list().await?))
}

/// GET /customers/{id} - Get a customer (ADMIN, or the customer).
async fn get_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CustomerId>,
) -> Result<Json<customers::Model>, ApiError> {
    auth.require_admin_or_self(id.into_inner())?;
    repo(&state)
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Customer not found: {id}")))
}

/// PUT /customers/{id} - Update profile fields (ADMIN, or the customer).
async fn update_customer(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CustomerId>,
    ApiJson(payload): ApiJson<UpdateCustomerRequest>,
) -> Result<Json<customers::Model>, ApiError> {
    auth.require_admin_or_self(id.into_inner())?;
    let payload = validated(payload)?;

    let customer = repo(&state)
        .update_profile(
            id,
            UpdateCustomerInput {
                name: payload.name,
                address: payload.address,
                telp: payload.telp,
            },
        )
        .await?;
    Ok(Json(customer))
}

/// PUT /customers/{id}/change-password - Replace the password after
/// checking the current one (ADMIN, or the customer).
async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CustomerId>,
    ApiJson(payload): ApiJson<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    auth.require_admin_or_self(id.into_inner())?;
    let payload = validated(payload)?;
    let repo = repo(&state);

    let customer = repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Customer not found: {id}")))?;
    if !verify_password(&payload.old_password, &customer.password_hash)? {
        return Err(ApiError::unauthorized("Current password is incorrect"));
    }

    repo.set_password_hash(id, hash_password(&payload.new_password)?)
        .await?;
    info!(customer_id = %id, "Customer password changed");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /customers/{id}/top-up - Credit the customer's own balance (USER).
async fn top_up(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CustomerId>,
    ApiJson(payload): ApiJson<TopUpRequest>,
) -> Result<Json<BalanceResponse>, ApiError> {
    auth.require_any(&[Role::User])?;
    auth.require_admin_or_self(id.into_inner())?;
    let payload = validated(payload)?;

    let balance = repo(&state).top_up(id, payload.amount).await?;
    Ok(Json(BalanceResponse {
        customer_id: id,
        balance: balance.amount(),
    }))
}

/// GET /customers/{id}/balance - Read the balance (ADMIN, or the customer).
async fn get_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<CustomerId>,
) -> Result<Json<BalanceResponse>, ApiError> {
    auth.require_admin_or_self(id.into_inner())?;
    let customer = repo(&state)
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Customer not found: {id}")))?;

    Ok(Json(BalanceResponse {
        customer_id: id,
        balance: customer.balance,
    }))
}
