//! Axum router configuration with middleware.
//!
//! Middleware: permissive CORS and request tracing.

use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::error::AppError;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Clients
        .route(
            "/clients",
            get(handlers::client::list_clients).post(handlers::client::create_client),
        )
        .route(
            "/clients/{id}",
            get(handlers::client::get_client)
                .put(handlers::client::update_client)
                .delete(handlers::client::delete_client),
        )
        // Service catalog
        .route(
            "/services",
            get(handlers::catalog::list_services).post(handlers::catalog::create_service),
        )
        .route(
            "/services/initialize-defaults",
            post(handlers::catalog::initialize_defaults),
        )
        .route(
            "/services/type/{service_type}",
            get(handlers::catalog::get_service_by_type),
        )
        .route(
            "/services/{id}",
            get(handlers::catalog::get_service)
                .put(handlers::catalog::update_service)
                .delete(handlers::catalog::delete_service),
        )
        // Available slots
        .route(
            "/appointments/available-times",
            get(handlers::slot::list_slots).post(handlers::slot::create_slot),
        )
        .route(
            "/appointments/available-times/{id}",
            get(handlers::slot::get_slot)
                .put(handlers::slot::update_slot)
                .delete(handlers::slot::delete_slot),
        )
        // Appointments
        .route(
            "/appointments",
            get(handlers::appointment::list_appointments)
                .post(handlers::appointment::create_appointment),
        )
        .route(
            "/appointments/{id}",
            get(handlers::appointment::get_appointment)
                .put(handlers::appointment::update_appointment)
                .delete(handlers::appointment::delete_appointment),
        )
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Liveness check, including a database round trip.
async fn health_check(
    State(state): State<AppState>,
) -> Result<axum::Json<serde_json::Value>, AppError> {
    state
        .db_pool
        .ping()
        .await
        .map_err(|e| AppError::Internal(format!("database unavailable: {e}")))?;

    Ok(axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "database": "ok",
    })))
}
