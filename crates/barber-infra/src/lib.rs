//! Infrastructure layer for Barber.
//!
//! Implements the repository traits and the clock port defined in
//! `barber-core`: SQLite storage, the system clock, config loading, and
//! data directory resolution.

pub mod clock;
pub mod config;
pub mod sqlite;

use std::path::PathBuf;

/// Resolve the data directory.
///
/// Checks `BARBER_DATA_DIR` first, then `~/.barber`, then `./.barber`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("BARBER_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".barber");
    }

    PathBuf::from(".barber")
}
