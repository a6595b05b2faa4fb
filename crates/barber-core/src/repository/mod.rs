//! Repository trait definitions (ports).
//!
//! These traits define the storage interface that the infrastructure layer
//! (barber-infra) implements. The core crate never depends on any
//! specific storage technology.

pub mod appointment;
pub mod catalog;
pub mod client;
pub mod slot;
