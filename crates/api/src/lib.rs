//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for customers, employees, vehicles, rentals, and returns
//! - JWT authentication middleware and role guards
//! - Error to HTTP response mapping

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use fleet_core::rental::RentalService;
use fleet_db::PgRentalStore;
use fleet_shared::JwtService;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// JWT service for token operations.
    pub jwt_service: Arc<JwtService>,
    /// Opening and closing workflows backed by Postgres.
    pub rentals: RentalService<PgRentalStore>,
}

impl AppState {
    /// Builds the state from a connection pool.
    ///
    /// `statement_timeout` bounds every statement run inside a rental unit.
    #[must_use]
    pub fn new(db: DatabaseConnection, jwt_service: JwtService, statement_timeout: Duration) -> Self {
        let store = PgRentalStore::new(db.clone(), statement_timeout);
        Self {
            db: Arc::new(db),
            jwt_service: Arc::new(jwt_service),
            rentals: RentalService::new(Arc::new(store)),
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
