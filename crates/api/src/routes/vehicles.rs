//! Vehicle routes.
//!
//! Status is read-only here; only opening and closing a rental move a
//! vehicle between `AVAILABLE` and `NOT_AVAILABLE`.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use fleet_db::{
    VehicleRepository,
    entities::vehicles,
    repositories::{CreateVehicleInput, UpdateVehicleInput},
};
use fleet_shared::{Role, types::VehicleId};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use super::validated;
use crate::{AppState, error::ApiError, extractors::ApiJson, middleware::AuthUser};

/// Creates the vehicle routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicles/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
}

/// Request body for registering a vehicle.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    /// Model name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Vehicle type, e.g. `matic`.
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub vehicle_type: String,
    /// Daily price in minor units.
    #[validate(range(min = 1))]
    pub price: i64,
    /// Licence plate.
    #[validate(length(min = 1, max = 20))]
    pub plate: String,
    /// Year of manufacture.
    #[validate(range(min = 1900, max = 2100))]
    pub production_year: i32,
}

/// Request body for updating a vehicle. Omitted fields are unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    /// New model name.
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    /// New vehicle type.
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub vehicle_type: Option<String>,
    /// New daily price.
    #[validate(range(min = 1))]
    pub price: Option<i64>,
    /// New licence plate.
    #[validate(length(min = 1, max = 20))]
    pub plate: Option<String>,
    /// New year of manufacture.
    #[validate(range(min = 1900, max = 2100))]
    pub production_year: Option<i32>,
}

fn repo(state: &AppState) -> VehicleRepository {
    VehicleRepository::new((*state.db).clone())
}

/// GET /vehicles - List vehicles (ADMIN, USER).
async fn list_vehicles(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<vehicles::Model>>, ApiError> {
    auth.require_any(&[Role::Admin, Role::User])?;
    Ok(Json(repo(&state).list().await?))
}

/// GET /vehicles/{id} - Get a vehicle (ADMIN, USER).
async fn get_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<VehicleId>,
) -> Result<Json<vehicles::Model>, ApiError> {
    auth.require_any(&[Role::Admin, Role::User])?;
    repo(&state)
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Vehicle not found: {id}")))
}

/// POST /vehicles - Register an available vehicle (ADMIN).
async fn create_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<CreateVehicleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_any(&[Role::Admin])?;
    let payload = validated(payload)?;

    let vehicle = repo(&state)
        .create(CreateVehicleInput {
            name: payload.name,
            vehicle_type: payload.vehicle_type,
            price: payload.price,
            plate: payload.plate,
            production_year: payload.production_year,
        })
        .await?;

    info!(vehicle_id = %vehicle.id, plate = %vehicle.plate, "Vehicle registered");
    Ok((StatusCode::CREATED, Json(vehicle)))
}

/// PUT /vehicles/{id} - Update a vehicle (ADMIN).
async fn update_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<VehicleId>,
    ApiJson(payload): ApiJson<UpdateVehicleRequest>,
) -> Result<Json<vehicles::Model>, ApiError> {
    auth.require_any(&[Role::Admin])?;
    let payload = validated(payload)?;

    let vehicle = repo(&state)
        .update(
            id,
            UpdateVehicleInput {
                name: payload.name,
                vehicle_type: payload.vehicle_type,
                price: payload.price,
                plate: payload.plate,
                production_year: payload.production_year,
            },
        )
        .await?;
    Ok(Json(vehicle))
}

/// DELETE /vehicles/{id} - Delete a vehicle that is not rented (ADMIN).
async fn delete_vehicle(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<VehicleId>,
) -> Result<StatusCode, ApiError> {
    auth.require_any(&[Role::Admin])?;
    repo(&state).delete(id).await?;
    info!(vehicle_id = %id, "Vehicle deleted");
    Ok(StatusCode::NO_CONTENT)
}
