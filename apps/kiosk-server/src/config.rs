//! Kiosk server configuration module.
//!
//! Configuration is read from an optional TOML file and overlaid by
//! environment variables, with defaults for every field.
//!
//! ## Sources (later wins)
//! 1. Defaults
//! 2. `kiosk.toml`, or the file named by `KIOSK_CONFIG`
//! 3. `KIOSK__<SECTION>__<KEY>`, e.g. `KIOSK__SERVER__PORT=9090`
//!
//! ```toml
//! [server]
//! bind_addr = "0.0.0.0"
//! port = 8080
//!
//! [database]
//! path = "./kiosk.db"
//! max_connections = 5
//!
//! [report]
//! enabled = true
//! recipient = "owner@cafe.example"
//! from_email = "no-reply@cafe.example"
//! run_at = "00:10"
//! ```

use chrono::NaiveTime;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "KIOSK_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "kiosk.toml";
const RUN_AT_FORMAT: &str = "%H:%M";

/// Kiosk server configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub report: ReportConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
}

/// SQLite settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database file path
    pub path: String,

    pub max_connections: u32,
}

/// Daily statistics mail settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Start the daily job
    pub enabled: bool,

    /// Who receives the scheduled report
    pub recipient: String,

    /// Sender address for every statistics mail
    pub from_email: String,

    /// Local time of day the job fires, `HH:MM`
    pub run_at: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: "./kiosk.db".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            enabled: false,
            recipient: String::new(),
            from_email: "no-reply@cafekiosk.local".to_string(),
            run_at: "00:10".to_string(),
        }
    }
}

impl KioskConfig {
    /// Load configuration from `KIOSK_CONFIG` (or `kiosk.toml`) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load configuration from `path` (missing file is fine) and the environment.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let config: KioskConfig = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(Environment::with_prefix("KIOSK").separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue("server.port".to_string()));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue("database.max_connections".to_string()));
        }

        self.report.run_at_time()?;

        if self.report.enabled && self.report.recipient.trim().is_empty() {
            return Err(ConfigError::MissingRequired("report.recipient".to_string()));
        }

        Ok(())
    }

    /// `bind_addr:port` for the listener.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.bind_addr, self.server.port)
    }
}

impl ReportConfig {
    /// Parsed `run_at`.
    pub fn run_at_time(&self) -> Result<NaiveTime, ConfigError> {
        NaiveTime::parse_from_str(self.run_at.trim(), RUN_AT_FORMAT)
            .map_err(|_| ConfigError::InvalidValue(format!("report.run_at ({})", self.run_at)))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> (std::path::PathBuf, String) {
        let dir = std::env::temp_dir().join(format!(
            "kiosk-config-{}-{}",
            std::process::id(),
            contents.len()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("kiosk.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let name = path.to_string_lossy().to_string();
        (dir, name)
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = KioskConfig::default();
        config.validate().unwrap();
        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
        assert!(!config.report.enabled);
        assert_eq!(
            config.report.run_at_time().unwrap(),
            NaiveTime::from_hms_opt(0, 10, 0).unwrap()
        );
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = KioskConfig::load_from("/nonexistent/kiosk-config-test.toml").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "./kiosk.db");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let (dir, path) = write_config(
            r#"
            [server]
            port = 9191

            [report]
            enabled = true
            recipient = "owner@cafe.test"
            run_at = "06:30"
            "#,
        );

        let config = KioskConfig::load_from(&path).unwrap();
        assert_eq!(config.server.port, 9191);
        assert_eq!(config.server.bind_addr, "0.0.0.0");
        assert!(config.report.enabled);
        assert_eq!(
            config.report.run_at_time().unwrap(),
            NaiveTime::from_hms_opt(6, 30, 0).unwrap()
        );

        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = KioskConfig::default();
        config.server.port = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let mut config = KioskConfig::default();
        config.report.run_at = "25:99".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));

        let mut config = KioskConfig::default();
        config.report.enabled = true;
        assert!(matches!(config.validate(), Err(ConfigError::MissingRequired(_))));
    }
}
