//! HTTP request handlers for the REST API.

pub mod appointment;
pub mod catalog;
pub mod client;
pub mod slot;

use std::str::FromStr;

use crate::http::error::AppError;

/// Parse a path id; anything that is not a valid id cannot name a resource.
pub(crate) fn parse_path_id<T: FromStr>(raw: &str, what: &str) -> Result<T, AppError> {
    raw.parse::<T>()
        .map_err(|_| AppError::NotFound(format!("{what} '{raw}' not found")))
}
