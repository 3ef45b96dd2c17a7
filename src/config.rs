//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to deserialize `ATM_`-prefixed variables into a type-safe struct.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// Deployment environment. Selects the default bind host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Parse an environment name, falling back to development for unknown values.
    fn parse_or_default(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "development" => Environment::Development,
            "production" => Environment::Production,
            other => {
                tracing::warn!(
                    "Environment '{}' not recognised. Using 'development'.",
                    other
                );
                Environment::Development
            }
        }
    }

    fn default_host(self) -> &'static str {
        match self {
            Environment::Development => "127.0.0.1",
            Environment::Production => "0.0.0.0",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

/// Raw variables as read from the process environment.
///
/// # Environment Variables
///
/// - `ATM_ENVIRONMENT` or `ATM_ENV` (optional): `development` (default) or `production`
/// - `ATM_HOST` (optional): bind host, defaults per environment
/// - `ATM_PORT` (optional): HTTP server port, defaults to 8000
/// - `ATM_BASE_URL` (optional): advertised URL, derived from host and port if unset
/// - `ATM_ACCOUNTS_FILE` (optional): seed file, defaults to `accounts.txt`
#[derive(Debug, Clone, Default, Deserialize)]
struct RawConfig {
    #[serde(alias = "env")]
    environment: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    base_url: Option<String>,
    accounts_file: Option<PathBuf>,
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub environment: Environment,
    pub host: String,
    pub port: u16,
    pub base_url: String,
    pub accounts_file: PathBuf,
}

/// Default port if ATM_PORT environment variable is not set.
const DEFAULT_PORT: u16 = 8000;

/// Default seed file if ATM_ACCOUNTS_FILE is not set.
const DEFAULT_ACCOUNTS_FILE: &str = "accounts.txt";

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads `ATM_*` variables and resolves defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed
    /// (e.g. a non-numeric `ATM_PORT`).
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are converted: accounts_file -> ATM_ACCOUNTS_FILE
        let raw = envy::prefixed("ATM_").from_env::<RawConfig>()?;
        Ok(Self::resolve(raw))
    }

    fn resolve(raw: RawConfig) -> Self {
        let environment = raw
            .environment
            .as_deref()
            .map(Environment::parse_or_default)
            .unwrap_or_default();
        let host = raw
            .host
            .unwrap_or_else(|| environment.default_host().to_string());
        let port = raw.port.unwrap_or(DEFAULT_PORT);
        let base_url = raw
            .base_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| derive_base_url(&host, port));

        Self {
            environment,
            host,
            port,
            base_url,
            accounts_file: raw
                .accounts_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ACCOUNTS_FILE)),
        }
    }

    /// `host:port` suitable for binding a listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Log the resolved configuration at startup.
    pub fn log_summary(&self) {
        tracing::info!("Environment: {}", self.environment);
        tracing::info!("Server Host: {}", self.host);
        tracing::info!("Server Port: {}", self.port);
        tracing::info!("Base URL: {}", self.base_url);
        tracing::info!("Accounts file: {}", self.accounts_file.display());
    }
}

fn derive_base_url(host: &str, port: u16) -> String {
    let host = match host {
        "0.0.0.0" | "127.0.0.1" => "localhost",
        other => other,
    };
    format!("http://{host}:{port}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_development_on_loopback() {
        let config = Config::resolve(RawConfig::default());

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.accounts_file, PathBuf::from("accounts.txt"));
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn production_binds_all_interfaces_and_advertises_localhost() {
        let config = Config::resolve(RawConfig {
            environment: Some("production".into()),
            port: Some(9000),
            ..RawConfig::default()
        });

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.base_url, "http://localhost:9000");
    }

    #[test]
    fn unknown_environment_falls_back_to_development() {
        let config = Config::resolve(RawConfig {
            environment: Some("staging".into()),
            ..RawConfig::default()
        });

        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = Config::resolve(RawConfig {
            environment: Some("Production".into()),
            host: Some("10.0.0.5".into()),
            port: Some(8080),
            base_url: Some("https://atm.example.com".into()),
            accounts_file: Some(PathBuf::from("/data/seed.txt")),
        });

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.host, "10.0.0.5");
        assert_eq!(config.base_url, "https://atm.example.com");
        assert_eq!(config.accounts_file, PathBuf::from("/data/seed.txt"));
    }

    #[test]
    fn reads_prefixed_variables_with_envy() {
        let vars = vec![
            ("ATM_PORT".to_string(), "8123".to_string()),
            ("ATM_ENVIRONMENT".to_string(), "production".to_string()),
            ("UNRELATED".to_string(), "x".to_string()),
        ];

        let raw = envy::prefixed("ATM_").from_iter::<_, RawConfig>(vars).unwrap();
        let config = Config::resolve(raw);

        assert_eq!(config.port, 8123);
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn short_env_variable_selects_environment() {
        let vars = vec![("ATM_ENV".to_string(), "production".to_string())];

        let raw = envy::prefixed("ATM_").from_iter::<_, RawConfig>(vars).unwrap();
        let config = Config::resolve(raw);

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn custom_host_is_advertised_as_is() {
        let config = Config::resolve(RawConfig {
            host: Some("10.0.0.5".into()),
            ..RawConfig::default()
        });

        assert_eq!(config.base_url, "http://10.0.0.5:8000");
    }
}
