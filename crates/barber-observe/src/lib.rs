//! Observability setup for Barber: structured logging and optional
//! OpenTelemetry trace export.

pub mod tracing_setup;
