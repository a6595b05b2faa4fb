//! Client CRUD handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use barber_types::client::{Client, CreateClientRequest, UpdateClientRequest};
use barber_types::id::ClientId;

use crate::http::error::AppError;
use crate::http::extractors::json::ApiJson;
use crate::http::handlers::parse_path_id;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// GET /clients
pub async fn list_clients(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Client>>, AppError> {
    let timer = RequestTimer::start();
    let clients = state.client_service.list_clients().await?;
    Ok(timer.finish(clients).with_link("self", "/clients"))
}

/// GET /clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Client>, AppError> {
    let timer = RequestTimer::start();
    let id: ClientId = parse_path_id(&id, "client")?;
    let client = state.client_service.get_client(&id).await?;
    Ok(timer
        .finish(client)
        .with_link("self", &format!("/clients/{id}")))
}

/// POST /clients
pub async fn create_client(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateClientRequest>,
) -> Result<Response, AppError> {
    let timer = RequestTimer::start();
    let client = state.client_service.create_client(body).await?;
    let location = format!("/clients/{}", client.id);
    Ok(timer.finish(client).created(&location))
}

/// PUT /clients/{id}
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateClientRequest>,
) -> Result<ApiResponse<Client>, AppError> {
    let timer = RequestTimer::start();
    let id: ClientId = parse_path_id(&id, "client")?;
    let client = state.client_service.update_client(&id, body).await?;
    Ok(timer
        .finish(client)
        .with_link("self", &format!("/clients/{id}")))
}

/// DELETE /clients/{id}
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id: ClientId = parse_path_id(&id, "client")?;
    state.client_service.delete_client(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
