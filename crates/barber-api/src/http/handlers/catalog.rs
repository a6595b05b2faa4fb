//! Service catalog handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use barber_types::catalog::{
    CreateServiceRequest, ServiceOffering, ServiceType, UpdateServiceRequest,
};
use barber_types::id::ServiceId;

use crate::http::error::AppError;
use crate::http::extractors::json::ApiJson;
use crate::http::handlers::parse_path_id;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// GET /services
pub async fn list_services(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<ServiceOffering>>, AppError> {
    let timer = RequestTimer::start();
    let services = state.catalog_service.list_services().await?;
    Ok(timer.finish(services).with_link("self", "/services"))
}

/// GET /services/{id}
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<ServiceOffering>, AppError> {
    let timer = RequestTimer::start();
    let id: ServiceId = parse_path_id(&id, "service")?;
    let offering = state.catalog_service.get_service(&id).await?;
    Ok(timer
        .finish(offering)
        .with_link("self", &format!("/services/{id}")))
}

/// GET /services/type/{type}
///
/// An unknown type name is a validation error, not a missing resource.
pub async fn get_service_by_type(
    State(state): State<AppState>,
    Path(raw_type): Path<String>,
) -> Result<ApiResponse<ServiceOffering>, AppError> {
    let timer = RequestTimer::start();
    let service_type: ServiceType = raw_type.parse().map_err(AppError::Validation)?;
    let offering = state.catalog_service.get_by_type(service_type).await?;
    let href = format!("/services/{}", offering.id);
    Ok(timer.finish(offering).with_link("self", &href))
}

/// POST /services
pub async fn create_service(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateServiceRequest>,
) -> Result<Response, AppError> {
    let timer = RequestTimer::start();
    let offering = state.catalog_service.create_service(body).await?;
    let location = format!("/services/{}", offering.id);
    Ok(timer.finish(offering).created(&location))
}

/// PUT /services/{id}
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateServiceRequest>,
) -> Result<ApiResponse<ServiceOffering>, AppError> {
    let timer = RequestTimer::start();
    let id: ServiceId = parse_path_id(&id, "service")?;
    let offering = state.catalog_service.update_service(&id, body).await?;
    Ok(timer
        .finish(offering)
        .with_link("self", &format!("/services/{id}")))
}

/// DELETE /services/{id}
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id: ServiceId = parse_path_id(&id, "service")?;
    state.catalog_service.delete_service(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /services/initialize-defaults
///
/// Returns the full catalog after seeding.
pub async fn initialize_defaults(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<ServiceOffering>>, AppError> {
    let timer = RequestTimer::start();
    state.catalog_service.ensure_defaults().await?;
    let services = state.catalog_service.list_services().await?;
    Ok(timer.finish(services).with_link("services", "/services"))
}
