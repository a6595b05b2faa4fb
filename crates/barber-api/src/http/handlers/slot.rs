//! Available slot handlers, mounted under `/appointments/available-times`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;

use barber_types::id::SlotId;
use barber_types::slot::{AvailableSlot, CreateSlotRequest, UpdateSlotRequest};

use crate::http::error::AppError;
use crate::http::extractors::json::ApiJson;
use crate::http::extractors::query::SlotQuery;
use crate::http::handlers::parse_path_id;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

const BASE: &str = "/appointments/available-times";

/// GET /appointments/available-times[?date=YYYY-MM-DD]
///
/// With `date`, only that day's unbooked slots; without it, every slot.
pub async fn list_slots(
    State(state): State<AppState>,
    Query(query): Query<SlotQuery>,
) -> Result<ApiResponse<Vec<AvailableSlot>>, AppError> {
    let timer = RequestTimer::start();

    let slots = match query.date.as_deref() {
        Some(raw) => {
            let date = barber_types::time::parse_date(raw).map_err(AppError::Validation)?;
            state.slot_service.list_unbooked_by_date(date).await?
        }
        None => state.slot_service.list_slots().await?,
    };

    Ok(timer.finish(slots).with_link("self", BASE))
}

/// GET /appointments/available-times/{id}
pub async fn get_slot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<AvailableSlot>, AppError> {
    let timer = RequestTimer::start();
    let id: SlotId = parse_path_id(&id, "slot")?;
    let slot = state.slot_service.get_slot(&id).await?;
    Ok(timer.finish(slot).with_link("self", &format!("{BASE}/{id}")))
}

/// POST /appointments/available-times
pub async fn create_slot(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateSlotRequest>,
) -> Result<Response, AppError> {
    let timer = RequestTimer::start();
    let slot = state.slot_service.create_slot(body).await?;
    let location = format!("{BASE}/{}", slot.id);
    Ok(timer.finish(slot).created(&location))
}

/// PUT /appointments/available-times/{id}
pub async fn update_slot(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateSlotRequest>,
) -> Result<ApiResponse<AvailableSlot>, AppError> {
    let timer = RequestTimer::start();
    let id: SlotId = parse_path_id(&id, "slot")?;
    let slot = state.slot_service.update_slot(&id, body).await?;
    Ok(timer.finish(slot).with_link("self", &format!("{BASE}/{id}")))
}

/// DELETE /appointments/available-times/{id}
pub async fn delete_slot(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id: SlotId = parse_path_id(&id, "slot")?;
    state.slot_service.delete_slot(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
