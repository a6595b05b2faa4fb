//! Shared domain types for Barber.
//!
//! This crate contains the domain types used across the booking backend:
//! Client, ServiceOffering, AvailableSlot, Appointment, the request types that
//! create and update them, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod appointment;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod id;
pub mod slot;
pub mod time;
