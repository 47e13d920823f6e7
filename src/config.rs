//! Application configuration
//!
//! Read from a TOML file (default `~/.config/fleetline/config.toml`,
//! overridable via `FLEETLINE_CONFIG`), with environment variables
//! taking precedence for secrets.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default configuration file location
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fleetline")
        .join("config.toml")
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub booking: BookingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseSettings::default(),
            security: SecurityConfig::default(),
            logging: LoggingConfig::default(),
            booking: BookingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file path; PostgreSQL users set `url` directly
    pub path: String,
    pub url: Option<String>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "./fleetline.db".to_string(),
            url: None,
        }
    }
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> String {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            return url;
        }
        self.url
            .clone()
            .unwrap_or_else(|| format!("sqlite://{}?mode=rwc", self.path))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Shared secret the identity provider signs tokens with
    pub jwt_secret: String,
    pub jwt_issuer: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secret-key-change-in-production".to_string()),
            jwt_issuer: "fleetline-idp".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// How long a reservation holds its seat before expiring
    pub reservation_ttl_hours: i64,
    /// How often the expiry sweep runs
    pub expiry_check_interval_secs: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            reservation_ttl_hours: 24,
            expiry_check_interval_secs: 60,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        toml::from_str(&contents).map_err(ConfigError::Parse)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {0}: {1}")]
    Io(String, std::io::Error),
    #[error("Cannot parse config file: {0}")]
    Parse(toml::de::Error),
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.booking.reservation_ttl_hours, 24);
        assert_eq!(cfg.booking.expiry_check_interval_secs, 60);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            port = 9001

            [booking]
            reservation_ttl_hours = 2
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9001);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.booking.reservation_ttl_hours, 2);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn sqlite_url_from_path() {
        let settings = DatabaseSettings {
            path: "./test.db".into(),
            url: None,
        };
        // DATABASE_URL may shadow this in CI; only assert the fallback shape
        if std::env::var("DATABASE_URL").is_err() {
            assert_eq!(settings.connection_url(), "sqlite://./test.db?mode=rwc");
        }
    }
}
