//! Rental routes: open, close, and read rentals.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use fleet_core::rental::{CloseRentalRequest, OpenRentalRequest};
use fleet_db::{RentalRepository, repositories::RentalDetail};
use fleet_shared::{Role, types::RentalId};
use serde::Deserialize;

use crate::{AppState, error::ApiError, extractors::ApiJson, middleware::AuthUser};

/// Creates the rental routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rentals", get(list_rentals).post(open_rental))
        .route("/rentals/{id}", get(get_rental))
        .route("/rentals/{id}/return", post(close_rental))
}

/// Request body for returning a vehicle.
#[derive(Debug, Deserialize)]
pub struct ReturnVehicleRequest {
    /// Condition of the vehicle at return.
    pub condition_note: String,
    /// Free-text remark about the return.
    #[serde(default)]
    pub description: Option<String>,
    /// Extra charge in minor units; zero when none.
    #[serde(default)]
    pub extra_charge: i64,
}

/// POST /rentals - Open a rental (ADMIN, or a USER for themself).
async fn open_rental(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<OpenRentalRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_any(&[Role::Admin, Role::User])?;
    auth.require_admin_or_self(payload.customer_id.into_inner())?;

    let rental = state.rentals.open_rental(payload).await?;
    Ok((StatusCode::CREATED, Json(rental)))
}

/// POST /rentals/{id}/return - Close a rental and record the return
/// (EMPLOYEE).
async fn close_rental(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(rental_id): Path<RentalId>,
    ApiJson(payload): ApiJson<ReturnVehicleRequest>,
) -> Result<impl IntoResponse, ApiError> {
    auth.require_any(&[Role::Employee])?;

    let vehicle_return = state
        .rentals
        .close_rental(CloseRentalRequest {
            rental_id,
            condition_note: payload.condition_note,
            description: payload.description,
            extra_charge: payload.extra_charge,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(vehicle_return)))
}

/// GET /rentals - List rentals with their vehicle, employee, and customer
/// (ADMIN).
async fn list_rentals(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<RentalDetail>>, ApiError> {
    auth.require_any(&[Role::Admin])?;
    let details = RentalRepository::new((*state.db).clone())
        .list_details()
        .await?;
    Ok(Json(details))
}

/// GET /rentals/{id} - Get one rental with its references (ADMIN, or the
/// renting USER).
async fn get_rental(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<RentalId>,
) -> Result<Json<RentalDetail>, ApiError> {
    auth.require_any(&[Role::Admin, Role::User])?;
    let detail = RentalRepository::new((*state.db).clone())
        .get_detail(id)
        .await?;
    auth.require_admin_or_self(detail.customer.id)?;
    Ok(Json(detail))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use fleet_shared::Role;
    use rstest::rstest;
    use serde_json::json;
    use uuid::Uuid;

    use crate::routes::test_support::{app, send, token};

    fn open_json(customer_id: Uuid, start: &str, end: &str) -> serde_json::Value {
        json!({
            "customer_id": customer_id,
            "vehicle_id": Uuid::new_v4(),
            "employee_id": Uuid::new_v4(),
            "start_date": start,
            "end_date": end
        })
    }

    #[tokio::test]
    async fn test_user_cannot_open_for_another_customer() {
        let (app, state) = app();
        let token = token(&state, Uuid::new_v4(), Role::User);
        let payload = open_json(Uuid::new_v4(), "2024-09-13", "2024-09-15");
        let (status, _) = send(app, "POST", "/api/v1/rentals", Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_employee_cannot_open_rental() {
        let (app, state) = app();
        let me = Uuid::new_v4();
        let token = token(&state, me, Role::Employee);
        let payload = open_json(me, "2024-09-13", "2024-09-15");
        let (status, _) = send(app, "POST", "/api/v1/rentals", Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[case("2024-09-15", "2024-09-15")]
    #[case("2024-09-15", "2024-09-13")]
    #[tokio::test]
    async fn test_open_rejects_date_range_before_any_lookup(
        #[case] start: &str,
        #[case] end: &str,
    ) {
        let (app, state) = app();
        let me = Uuid::new_v4();
        let token = token(&state, me, Role::User);
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/rentals",
            Some(&token),
            Some(open_json(me, start, end)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[rstest]
    #[case("2024-13-45", "2024-09-15")]
    #[case("2024-09-13", "15/09/2024")]
    #[tokio::test]
    async fn test_open_rejects_malformed_date_with_envelope(
        #[case] start: &str,
        #[case] end: &str,
    ) {
        let (app, state) = app();
        let me = Uuid::new_v4();
        let token = token(&state, me, Role::User);
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/rentals",
            Some(&token),
            Some(open_json(me, start, end)),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    #[rstest]
    #[case(Role::Admin)]
    #[case(Role::User)]
    #[tokio::test]
    async fn test_only_employees_close_rentals(#[case] role: Role) {
        let (app, state) = app();
        let token = token(&state, Uuid::new_v4(), role);
        let uri = format!("/api/v1/rentals/{}/return", Uuid::new_v4());
        let payload = json!({ "condition_note": "good", "extra_charge": 0 });
        let (status, _) = send(app, "POST", &uri, Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[case(json!({ "condition_note": "scratched", "extra_charge": -1 }))]
    #[case(json!({ "condition_note": "   ", "extra_charge": 0 }))]
    #[case(json!({ "condition_note": "good", "extra_charge": "free" }))]
    #[tokio::test]
    async fn test_close_rejects_bad_input_before_any_lookup(#[case] payload: serde_json::Value) {
        let (app, state) = app();
        let token = token(&state, Uuid::new_v4(), Role::Employee);
        let uri = format!("/api/v1/rentals/{}/return", Uuid::new_v4());
        let (status, body) = send(app, "POST", &uri, Some(&token), Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_list_rentals_requires_admin() {
        let (app, state) = app();
        let token = token(&state, Uuid::new_v4(), Role::User);
        let (status, _) = send(app, "GET", "/api/v1/rentals", Some(&token), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
