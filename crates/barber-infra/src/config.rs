//! Configuration loader for Barber.
//!
//! Reads `config.toml` from the data directory (`~/.barber/` in production)
//! and deserializes it into [`BarberConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use barber_types::config::BarberConfig;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - Missing file: [`BarberConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> BarberConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return BarberConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return BarberConfig::default();
        }
    };

    match toml::from_str::<BarberConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            BarberConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.port, 8080);
        assert!(!config.seed_default_services);
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            "seed_default_services = true\n\n[server]\nhost = \"0.0.0.0\"\nport = 9090\n",
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert!(config.seed_default_services);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9090);
    }

    #[tokio::test]
    async fn load_config_malformed_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "[server\nport = ")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.server.host, "127.0.0.1");
    }
}
