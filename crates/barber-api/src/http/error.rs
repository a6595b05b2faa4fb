//! Application error type mapping to HTTP status codes and envelope format.
//!
//! Unknown ids are 404, input problems are 400 `VALIDATION_ERROR`, broken
//! booking rules and conflicts are 400 `BUSINESS_RULE_VIOLATION`, and storage
//! failures are 500.

use axum::response::{IntoResponse, Response};

use barber_types::error::{AppointmentError, CatalogError, ClientError, SlotError};

use crate::http::response::{ApiResponse, status_for_code};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    Client(ClientError),
    Catalog(CatalogError),
    Slot(SlotError),
    Appointment(AppointmentError),
    /// An id or path parameter that does not resolve.
    NotFound(String),
    /// Malformed input caught at the boundary.
    Validation(String),
    Internal(String),
}

impl From<ClientError> for AppError {
    fn from(e: ClientError) -> Self {
        AppError::Client(e)
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        AppError::Catalog(e)
    }
}

impl From<SlotError> for AppError {
    fn from(e: SlotError) -> Self {
        AppError::Slot(e)
    }
}

impl From<AppointmentError> for AppError {
    fn from(e: AppointmentError) -> Self {
        AppError::Appointment(e)
    }
}

const NOT_FOUND: &str = "NOT_FOUND";
const VALIDATION: &str = "VALIDATION_ERROR";
const BUSINESS: &str = "BUSINESS_RULE_VIOLATION";
const INTERNAL: &str = "INTERNAL_ERROR";

impl AppError {
    /// Machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Client(e) => match e {
                ClientError::NotFound => NOT_FOUND,
                ClientError::Validation(_) => VALIDATION,
                ClientError::NationalIdConflict(_) | ClientError::InUse => BUSINESS,
                ClientError::StorageError(_) => INTERNAL,
            },
            AppError::Catalog(e) => match e {
                CatalogError::NotFound => NOT_FOUND,
                CatalogError::Validation(_) => VALIDATION,
                CatalogError::TypeConflict(_) | CatalogError::InUse => BUSINESS,
                CatalogError::StorageError(_) => INTERNAL,
            },
            AppError::Slot(e) => match e {
                SlotError::NotFound | SlotError::ServiceNotFound => NOT_FOUND,
                SlotError::Validation(_) => VALIDATION,
                SlotError::DuplicateSlot | SlotError::AlreadyBooked => BUSINESS,
                SlotError::StorageError(_) => INTERNAL,
            },
            AppError::Appointment(e) => match e {
                AppointmentError::NotFound
                | AppointmentError::ClientNotFound
                | AppointmentError::ServiceNotFound
                | AppointmentError::SlotNotFound => NOT_FOUND,
                AppointmentError::Validation(_) => VALIDATION,
                AppointmentError::SlotAlreadyBooked
                | AppointmentError::TimeMismatch { .. }
                | AppointmentError::PastAppointment
                | AppointmentError::ConcurrentChange => BUSINESS,
                AppointmentError::StorageError(_) => INTERNAL,
            },
            AppError::NotFound(_) => NOT_FOUND,
            AppError::Validation(_) => VALIDATION,
            AppError::Internal(_) => INTERNAL,
        }
    }

    fn message(&self) -> String {
        match self {
            AppError::Client(e) => e.to_string(),
            AppError::Catalog(e) => e.to_string(),
            AppError::Slot(e) => e.to_string(),
            AppError::Appointment(e) => e.to_string(),
            AppError::NotFound(msg) | AppError::Validation(msg) | AppError::Internal(msg) => {
                msg.clone()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let message = self.message();

        if code == INTERNAL {
            tracing::error!(error = %message, "request failed");
        }

        let body = ApiResponse::error(code, &message, uuid::Uuid::now_v7().to_string(), 0);
        (status_for_code(code), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status(e: impl Into<AppError>) -> StatusCode {
        e.into().into_response().status()
    }

    #[test]
    fn test_not_found_mapping() {
        assert_eq!(status(ClientError::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status(AppointmentError::SlotNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status(SlotError::ServiceNotFound), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_business_rule_mapping() {
        assert_eq!(status(AppointmentError::SlotAlreadyBooked), StatusCode::BAD_REQUEST);
        assert_eq!(status(SlotError::AlreadyBooked), StatusCode::BAD_REQUEST);
        assert_eq!(status(CatalogError::InUse), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::from(ClientError::NationalIdConflict("x".into())).code(),
            BUSINESS
        );
    }

    #[test]
    fn test_storage_error_is_internal() {
        assert_eq!(
            status(AppointmentError::StorageError("disk".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
