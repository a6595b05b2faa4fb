//! JSON body extractor whose rejections use the API error envelope.

use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;

use crate::http::error::AppError;

/// `axum::Json` that reports unreadable bodies as `AppError::Validation`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
