//! Server configuration sourced from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `3000` |
//! | `STORE_BACKEND` | `postgres` (`postgres` or `memory`) |
//! | `DATABASE_URL` | `postgres://localhost/geoplay` |
//! | `DB_MAX_CONNECTIONS` | `10` |
//! | `DB_MIN_CONNECTIONS` | `1` |
//! | `DB_CONNECT_TIMEOUT_SECS` | `30` |
//! | `DB_IDLE_TIMEOUT_SECS` | `600` |
//! | `DB_MAX_LIFETIME_SECS` | `1800` (`0` disables the limit) |
//! | `RUN_MIGRATIONS` | `true` |
//! | `STRICT_COORDINATES` | `false` |
//! | `MAX_BODY_BYTES` | `65536` |
//! | `ALLOWED_ORIGINS` | `http://localhost:3000` |
//! | `LOG_FORMAT` | `text` (`text` or `json`) |
//! | `LOG_FILE` | unset (stdout only) |
//! | `LOG_ANSI` | unset (auto-detect) |

use std::str::FromStr;
use std::time::Duration;

use geoplay_core::{CoordinateBounds, Error, Result};
use geoplay_db::PoolConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/geoplay";
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000";

/// Which record store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
            "memory" | "mem" => Ok(StoreBackend::Memory),
            other => Err(Error::Config(format!(
                "STORE_BACKEND must be 'postgres' or 'memory', got '{}'",
                other
            ))),
        }
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `"json"` or `"text"`.
    pub format: String,
    /// Daily-rotated log file path.
    pub file: Option<String>,
    /// ANSI color override.
    pub ansi: Option<bool>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            file: None,
            ansi: None,
        }
    }
}

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub store_backend: StoreBackend,
    pub database_url: String,
    pub db_pool: PoolConfig,
    pub run_migrations: bool,
    pub strict_coordinates: bool,
    pub max_body_bytes: usize,
    pub allowed_origins: Vec<String>,
    pub log: LogConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            store_backend: StoreBackend::Postgres,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            db_pool: PoolConfig::default(),
            run_migrations: true,
            strict_coordinates: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            allowed_origins: split_origins(DEFAULT_ALLOWED_ORIGINS),
            log: LogConfig::default(),
        }
    }
}

impl ApiConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns the raw value of a
    /// variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let origins = get("ALLOWED_ORIGINS")
            .map(|v| split_origins(&v))
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.allowed_origins);

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", get("PORT"), defaults.port)?,
            store_backend: match get("STORE_BACKEND") {
                Some(v) => v.parse()?,
                None => defaults.store_backend,
            },
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            db_pool: pool_from(&get, &defaults.db_pool)?,
            run_migrations: flag_or("RUN_MIGRATIONS", get("RUN_MIGRATIONS"), true)?,
            strict_coordinates: flag_or("STRICT_COORDINATES", get("STRICT_COORDINATES"), false)?,
            max_body_bytes: parse_or(
                "MAX_BODY_BYTES",
                get("MAX_BODY_BYTES"),
                defaults.max_body_bytes,
            )?,
            allowed_origins: origins,
            log: LogConfig {
                format: get("LOG_FORMAT")
                    .map(|v| v.to_ascii_lowercase())
                    .unwrap_or(defaults.log.format),
                file: get("LOG_FILE"),
                ansi: get("LOG_ANSI").map(|v| v == "true" || v == "1"),
            },
        })
    }

    pub fn coordinate_bounds(&self) -> CoordinateBounds {
        CoordinateBounds::from_strict(self.strict_coordinates)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> Result<T> {
    match raw {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("{} must be a number, got '{}'", key, v))),
    }
}

fn pool_from<G>(get: &G, defaults: &PoolConfig) -> Result<PoolConfig>
where
    G: Fn(&str) -> Option<String>,
{
    let secs = |key: &str, default: Duration| -> Result<Duration> {
        parse_or(key, get(key), default.as_secs()).map(Duration::from_secs)
    };
    let lifetime_default = defaults.max_lifetime.map_or(0, |d| d.as_secs());
    let lifetime = parse_or(
        "DB_MAX_LIFETIME_SECS",
        get("DB_MAX_LIFETIME_SECS"),
        lifetime_default,
    )?;

    Ok(PoolConfig {
        max_connections: parse_or(
            "DB_MAX_CONNECTIONS",
            get("DB_MAX_CONNECTIONS"),
            defaults.max_connections,
        )?,
        min_connections: parse_or(
            "DB_MIN_CONNECTIONS",
            get("DB_MIN_CONNECTIONS"),
            defaults.min_connections,
        )?,
        connect_timeout: secs("DB_CONNECT_TIMEOUT_SECS", defaults.connect_timeout)?,
        idle_timeout: secs("DB_IDLE_TIMEOUT_SECS", defaults.idle_timeout)?,
        max_lifetime: (lifetime > 0).then(|| Duration::from_secs(lifetime)),
    })
}

fn flag_or(key: &str, raw: Option<String>, default: bool) -> Result<bool> {
    match raw.as_deref().map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Config(format!(
                "{} must be true or false, got '{}'",
                key, v
            ))),
        },
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ApiConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert_eq!(config.db_pool, PoolConfig::default());
        assert!(config.run_migrations);
        assert_eq!(config.coordinate_bounds(), CoordinateBounds::Permissive);
        assert_eq!(config.max_body_bytes, 65536);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8088"),
            ("STORE_BACKEND", "memory"),
            ("DATABASE_URL", "postgres://db/geo"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("RUN_MIGRATIONS", "false"),
            ("STRICT_COORDINATES", "1"),
            ("MAX_BODY_BYTES", "1024"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example,"),
            ("LOG_FORMAT", "JSON"),
            ("LOG_FILE", "/var/log/geoplay/api.log"),
            ("LOG_ANSI", "false"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8088");
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.database_url, "postgres://db/geo");
        assert_eq!(config.db_pool.max_connections, 4);
        assert!(!config.run_migrations);
        assert_eq!(config.coordinate_bounds(), CoordinateBounds::Strict);
        assert_eq!(config.max_body_bytes, 1024);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.log.format, "json");
        assert_eq!(config.log.file.as_deref(), Some("/var/log/geoplay/api.log"));
        assert_eq!(config.log.ansi, Some(false));
    }

    #[test]
    fn test_pool_settings_from_env() {
        let config = config_from(&[
            ("DB_MAX_CONNECTIONS", "12"),
            ("DB_MIN_CONNECTIONS", "3"),
            ("DB_CONNECT_TIMEOUT_SECS", "5"),
            ("DB_IDLE_TIMEOUT_SECS", "90"),
            ("DB_MAX_LIFETIME_SECS", "0"),
        ])
        .unwrap();

        assert_eq!(
            config.db_pool,
            PoolConfig {
                max_connections: 12,
                min_connections: 3,
                connect_timeout: Duration::from_secs(5),
                idle_timeout: Duration::from_secs(90),
                max_lifetime: None,
            }
        );
        let options = config.db_pool.options();
        assert_eq!(options.get_min_connections(), 3);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_pool_timeout_is_config_error() {
        let err = config_from(&[("DB_CONNECT_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("DB_CONNECT_TIMEOUT_SECS"));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "  "), ("ALLOWED_ORIGINS", " , ")]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.allowed_origins, vec![DEFAULT_ALLOWED_ORIGINS]);
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_invalid_backend_is_config_error() {
        let err = config_from(&[("STORE_BACKEND", "redis")]).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_flag_is_config_error() {
        let err = config_from(&[("STRICT_COORDINATES", "maybe")]).unwrap_err();
        assert!(err.to_string().contains("STRICT_COORDINATES"));
    }
}
