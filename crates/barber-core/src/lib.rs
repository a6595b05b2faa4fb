//! Booking rules and repository trait definitions for Barber.
//!
//! This crate defines the "ports" (repository traits and the clock) that the
//! infrastructure layer implements, plus the services that enforce the
//! scheduling invariants. It depends only on `barber-types` -- never on
//! `barber-infra` or any database/IO crate.

pub mod repository;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;
