//! Application configuration loaded from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;

use pageturner_infra::DatabaseConfig;
use thiserror::Error;

/// Why the environment could not be turned into an [`AppConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {name}: expected {expected}")]
    Invalid {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Deployment environment; also names the service in every log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s.to_ascii_lowercase().as_str() {
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verbosity requested through `LOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Disabled,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Disabled => "off",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, ()> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "disabled" => Ok(LogLevel::Disabled),
            _ => Err(()),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: LogLevel,
    pub json_logs: bool,
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_DSN")
            .filter(|dsn| !dsn.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_DSN"))?;

        Ok(Self {
            env: parse_or(&lookup, "ENV", "staging|production", Environment::Staging)?,
            log_level: parse_or(
                &lookup,
                "LOG_LEVEL",
                "error|warn|info|debug|disabled",
                LogLevel::Info,
            )?,
            json_logs: lookup("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", "a port number", 9000)?,
            database: DatabaseConfig {
                url,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", "an integer", 100)?,
                min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", "an integer", 10)?,
            },
        })
    }

    /// Service name attached to every log event.
    pub fn service_name(&self) -> String {
        format!("Page-Turner-Pro-{}", self.env)
    }
}

fn parse_or<F, T>(
    lookup: &F,
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            value,
            expected,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_dsn_is_set() {
        let config = load(&[("DATABASE_DSN", "postgres://localhost/library")]).unwrap();

        assert_eq!(config.env, Environment::Staging);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(!config.json_logs);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.database.max_connections, 100);
        assert_eq!(config.database.min_connections, 10);
        assert_eq!(config.service_name(), "Page-Turner-Pro-staging");
    }

    #[test]
    fn missing_dsn_is_an_error() {
        let err = load(&[("PORT", "8080")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_DSN")));
    }

    #[test]
    fn explicit_values_are_used() {
        let config = load(&[
            ("DATABASE_DSN", "postgres://db/library"),
            ("ENV", "production"),
            ("LOG_LEVEL", "disabled"),
            ("LOG_FORMAT", "JSON"),
            ("PORT", "8081"),
            ("DB_MAX_CONNECTIONS", "20"),
        ])
        .unwrap();

        assert_eq!(config.env, Environment::Production);
        assert_eq!(config.log_level.directive(), "off");
        assert!(config.json_logs);
        assert_eq!(config.port, 8081);
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.service_name(), "Page-Turner-Pro-production");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = load(&[("DATABASE_DSN", "postgres://db"), ("ENV", "dev")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "ENV", .. }));

        let err = load(&[("DATABASE_DSN", "postgres://db"), ("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));

        let err = load(&[("DATABASE_DSN", "postgres://db"), ("LOG_LEVEL", "trace")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "LOG_LEVEL", .. }));
    }
}
