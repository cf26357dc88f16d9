//! Adapter configuration
//!
//! Each struct deserializes from its section of the application config;
//! missing fields fall back to the defaults below.

use serde::Deserialize;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Damage classifier inference service
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// URL accepting `POST` of raw image bytes
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9000/v1/detect".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// OpenWeatherMap geocoding and history APIs
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub geocoding_url: String,
    pub history_url: String,
    pub api_key: String,
    /// Appended to the location so bare postcodes resolve, e.g. `CH`
    pub country_code: Option<String>,
    pub timeout_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            geocoding_url: "https://api.openweathermap.org/geo/1.0/direct".to_string(),
            history_url: "https://api.openweathermap.org/data/3.0/onecall/timemachine".to_string(),
            api_key: String::new(),
            country_code: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Stripe payments API
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    pub base_url: String,
    pub api_key: String,
    /// ISO 4217 code of the payout currency
    pub currency: String,
    pub timeout_secs: u64,
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.stripe.com".to_string(),
            api_key: String::new(),
            currency: "EUR".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
