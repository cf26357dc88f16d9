//! Application configuration
//!
//! Defaults are overridden by environment variables with the `CLAIMS`
//! prefix and `__` as section separator, e.g. `CLAIMS__WEATHER__API_KEY`
//! or `CLAIMS__SERVER__PORT`. The known policy list is comma separated:
//! `CLAIMS__POLICIES__KNOWN=DEMO-12345,99999`.

use serde::Deserialize;
use std::time::Duration;

use domain_claims::policy::DEFAULT_KNOWN_POLICIES;
use infra_db::DatabaseConfig;
use infra_external::{ClassifierConfig, PaymentConfig, WeatherConfig};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// HTTP server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    /// Upper bound on a claim upload, photo included
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

/// Audit store database settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/claims".to_string(),
            max_connections: 10,
            min_connections: 2,
            connect_timeout_secs: 30,
        }
    }
}

impl DatabaseSettings {
    pub fn pool_config(&self) -> DatabaseConfig {
        DatabaseConfig::new(&self.url)
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
    }
}

/// Known policy numbers
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub known: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            known: DEFAULT_KNOWN_POLICIES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Complete service configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub classifier: ClassifierConfig,
    pub weather: WeatherConfig,
    pub payments: PaymentConfig,
    pub policies: PolicyConfig,
}

impl AppConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(config::Environment::default())
    }

    fn from_source(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                environment
                    .prefix("CLAIMS")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("policies.known")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> AppConfig {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_source(config::Environment::default().source(Some(source))).unwrap()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = load(&[]);
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.server.log_format, LogFormat::Pretty);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.payments.currency, "EUR");
        assert_eq!(config.policies.known.len(), 4);
    }

    #[test]
    fn test_nested_overrides() {
        let config = load(&[
            ("CLAIMS__SERVER__PORT", "9090"),
            ("CLAIMS__SERVER__LOG_FORMAT", "json"),
            ("CLAIMS__WEATHER__API_KEY", "owm-key"),
            ("CLAIMS__WEATHER__COUNTRY_CODE", "CH"),
            ("CLAIMS__PAYMENTS__CURRENCY", "CHF"),
        ]);
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.weather.api_key, "owm-key");
        assert_eq!(config.weather.country_code.as_deref(), Some("CH"));
        assert_eq!(config.payments.currency, "CHF");
    }

    #[test]
    fn test_policy_list_is_comma_separated() {
        let config = load(&[("CLAIMS__POLICIES__KNOWN", "POL-1,POL-2")]);
        assert_eq!(config.policies.known, vec!["POL-1", "POL-2"]);
    }

    #[test]
    fn test_pool_config() {
        let pool = DatabaseSettings::default().pool_config();
        assert_eq!(pool.connect_timeout, Duration::from_secs(30));
    }
}
