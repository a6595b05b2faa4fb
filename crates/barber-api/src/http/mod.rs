//! HTTP/REST API layer for Barber.
//!
//! Axum-based REST API with envelope response format and CORS support.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
