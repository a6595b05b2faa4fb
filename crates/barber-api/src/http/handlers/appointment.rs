//! Appointment handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use barber_types::appointment::{Appointment, CreateAppointmentRequest, UpdateAppointmentRequest};
use barber_types::id::AppointmentId;

use crate::http::error::AppError;
use crate::http::extractors::json::ApiJson;
use crate::http::handlers::parse_path_id;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

fn with_links(resp: ApiResponse<Appointment>) -> ApiResponse<Appointment> {
    let Some(appointment) = resp.data.as_ref() else {
        return resp;
    };
    let this = format!("/appointments/{}", appointment.id);
    let client = format!("/clients/{}", appointment.client_id);
    let slot = format!("/appointments/available-times/{}", appointment.slot_id);
    resp.with_link("self", &this)
        .with_link("client", &client)
        .with_link("slot", &slot)
}

/// GET /appointments
pub async fn list_appointments(
    State(state): State<AppState>,
) -> Result<ApiResponse<Vec<Appointment>>, AppError> {
    let timer = RequestTimer::start();
    let appointments = state.appointment_service.list_appointments().await?;
    Ok(timer.finish(appointments).with_link("self", "/appointments"))
}

/// GET /appointments/{id}
pub async fn get_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Appointment>, AppError> {
    let timer = RequestTimer::start();
    let id: AppointmentId = parse_path_id(&id, "appointment")?;
    let appointment = state.appointment_service.get_appointment(&id).await?;
    Ok(with_links(timer.finish(appointment)))
}

/// POST /appointments
pub async fn create_appointment(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateAppointmentRequest>,
) -> Result<Response, AppError> {
    let timer = RequestTimer::start();
    let appointment = state.appointment_service.create_appointment(body).await?;
    let location = format!("/appointments/{}", appointment.id);
    Ok(with_links(timer.finish(appointment)).created(&location))
}

/// PUT /appointments/{id}
pub async fn update_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateAppointmentRequest>,
) -> Result<ApiResponse<Appointment>, AppError> {
    let timer = RequestTimer::start();
    let id: AppointmentId = parse_path_id(&id, "appointment")?;
    let appointment = state
        .appointment_service
        .update_appointment(&id, body)
        .await?;
    Ok(with_links(timer.finish(appointment)))
}

/// DELETE /appointments/{id}
pub async fn delete_appointment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id: AppointmentId = parse_path_id(&id, "appointment")?;
    state.appointment_service.delete_appointment(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
