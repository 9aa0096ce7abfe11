//! Configuration management for the fraud verdict service

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub models: ModelsConfig,
    pub dataset: DatasetConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

/// Model artifact configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsConfig {
    /// Directory containing the `<model>.onnx` artifacts
    pub artifacts_dir: String,
    /// Number of intra-op threads per inference session (default: 1)
    #[serde(default = "default_intra_threads")]
    pub intra_threads: usize,
}

fn default_intra_threads() -> usize {
    1
}

/// Profiling dataset configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// Path to the CSV the dashboard profiles
    pub path: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from the default file
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            models: ModelsConfig {
                artifacts_dir: "models".to_string(),
                intra_threads: 1,
            },
            dataset: DatasetConfig {
                path: "Fraud.csv".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.models.artifacts_dir, "models");
        assert_eq!(config.models.intra_threads, 1);
        assert_eq!(config.dataset.path, "Fraud.csv");
    }

    #[test]
    fn test_load_from_toml() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000

[models]
artifacts_dir = "artifacts"

[dataset]
path = "data/Fraud.csv"

[logging]
level = "debug"
format = "json"
"#;
        let path = std::env::temp_dir().join(format!(
            "fraud_detector_config_{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, toml).unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.models.artifacts_dir, "artifacts");
        // Omitted key falls back to its serde default
        assert_eq!(config.models.intra_threads, 1);
        assert_eq!(config.logging.format, "json");
    }
}
