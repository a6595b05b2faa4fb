//! Global configuration types for Barber.
//!
//! `BarberConfig` represents the top-level `config.toml` that controls the
//! HTTP listener and startup behavior.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the booking backend.
///
/// Loaded from `~/.barber/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarberConfig {
    #[serde(default)]
    pub server: ServerConfig,

    /// Run the default-services initialization when the server starts.
    #[serde(default)]
    pub seed_default_services: bool,
}

impl Default for BarberConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            seed_default_services: false,
        }
    }
}

/// Listener settings for `barber serve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
