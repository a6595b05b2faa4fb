//! Business logic services (use cases).
//!
//! Services orchestrate repository calls and enforce the booking rules. They
//! depend on traits (ports) -- never on concrete infrastructure
//! implementations.

pub mod appointment;
pub mod catalog;
pub mod client;
pub mod clock;
pub mod slot;
