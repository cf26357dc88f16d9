//! OpenWeatherMap weather corroboration
//!
//! Two calls per claim: the geocoding API resolves the free-text location to
//! coordinates (first hit wins), then the history API returns the hourly
//! series for midnight UTC of the day of loss. A rain claim is corroborated
//! when any hour reports `rain.1h > 0`.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument};

use core_kernel::{DomainPort, PortError};
use domain_claims::{Corroboration, DamageCategory, WeatherCorroborator};

use crate::config::WeatherConfig;
use crate::http::{build_client, check_status, decode_json, map_transport_error};

const SERVICE: &str = "openweathermap";

#[derive(Debug, Clone, Deserialize)]
struct GeocodeHit {
    lat: f64,
    lon: f64,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct HistoryResponse {
    #[serde(default, alias = "data")]
    hourly: Vec<HourlyWeather>,
}

#[derive(Debug, Default, Deserialize)]
struct HourlyWeather {
    #[serde(default)]
    rain: Option<Precipitation>,
}

#[derive(Debug, Default, Deserialize)]
struct Precipitation {
    #[serde(rename = "1h", default)]
    one_hour: f64,
}

impl HourlyWeather {
    fn had_rain(&self) -> bool {
        self.rain.as_ref().is_some_and(|r| r.one_hour > 0.0)
    }
}

/// `WeatherCorroborator` backed by OpenWeatherMap
#[derive(Debug, Clone)]
pub struct OpenWeatherCorroborator {
    client: Client,
    config: WeatherConfig,
}

impl OpenWeatherCorroborator {
    pub fn new(config: WeatherConfig) -> Result<Self, PortError> {
        if config.api_key.trim().is_empty() {
            return Err(PortError::validation_field(
                "weather API key is not configured",
                "weather.api_key",
            ));
        }
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            config,
        })
    }

    /// Location as sent to the geocoder, with the country code when configured
    fn geocode_query(&self, location: &str) -> String {
        match self.config.country_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() => format!("{},{}", location.trim(), code),
            _ => location.trim().to_string(),
        }
    }

    async fn geocode(&self, location: &str) -> Result<Option<GeocodeHit>, PortError> {
        let query = self.geocode_query(location);
        let response = self
            .client
            .get(&self.config.geocoding_url)
            .query(&[
                ("q", query.as_str()),
                ("limit", "1"),
                ("appid", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| map_transport_error(SERVICE, self.config.timeout_secs, e))?;
        let response = check_status(SERVICE, response).await?;
        let hits: Vec<GeocodeHit> = decode_json(SERVICE, response).await?;
        Ok(hits.into_iter().next())
    }

    async fn history(&self, hit: &GeocodeHit, date_of_loss: NaiveDate) -> Result<HistoryResponse, PortError> {
        let response = self
            .client
            .get(&self.config.history_url)
            .query(&[
                ("lat", hit.lat.to_string()),
                ("lon", hit.lon.to_string()),
                ("dt", midnight_utc_timestamp(date_of_loss).to_string()),
                ("appid", self.config.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| map_transport_error(SERVICE, self.config.timeout_secs, e))?;
        let response = check_status(SERVICE, response).await?;
        decode_json(SERVICE, response).await
    }
}

/// Unix timestamp of 00:00 UTC on `date`
pub fn midnight_utc_timestamp(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

impl DomainPort for OpenWeatherCorroborator {}

#[async_trait]
impl WeatherCorroborator for OpenWeatherCorroborator {
    #[instrument(skip(self), fields(category = %category))]
    async fn corroborate(
        &self,
        location: &str,
        date_of_loss: NaiveDate,
        category: DamageCategory,
    ) -> Result<Corroboration, PortError> {
        // Only rainfall is ever checked
        if category != DamageCategory::RainDamage {
            debug!("No weather signal applies to this category");
            return Ok(Corroboration::NotCorroborated);
        }

        let Some(hit) = self.geocode(location).await? else {
            info!(location, "Location could not be geocoded");
            return Ok(Corroboration::DataUnavailable);
        };
        debug!(lat = hit.lat, lon = hit.lon, resolved = ?hit.name, "Location geocoded");

        let history = self.history(&hit, date_of_loss).await?;
        if history.hourly.is_empty() {
            info!(location, %date_of_loss, "No hourly weather recorded for date");
            return Ok(Corroboration::DataUnavailable);
        }

        Ok(Corroboration::from(history.hourly.iter().any(HourlyWeather::had_rain)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midnight_timestamp() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        assert_eq!(midnight_utc_timestamp(date), 1_719_792_000);
    }

    #[test]
    fn test_history_parsing() {
        let body = r#"{"hourly": [{"dt": 1, "temp": 290.1}, {"dt": 2, "rain": {"1h": 0.4}}]}"#;
        let history: HistoryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(history.hourly.len(), 2);
        assert!(!history.hourly[0].had_rain());
        assert!(history.hourly[1].had_rain());
    }

    #[test]
    fn test_history_accepts_data_key() {
        let body = r#"{"data": [{"dt": 1, "rain": {"1h": 0.0}}]}"#;
        let history: HistoryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(history.hourly.len(), 1);
        assert!(!history.hourly[0].had_rain());
    }

    #[test]
    fn test_geocode_query_appends_country() {
        let corroborator = OpenWeatherCorroborator::new(WeatherConfig {
            api_key: "k".to_string(),
            country_code: Some("CH".to_string()),
            ..WeatherConfig::default()
        })
        .unwrap();
        assert_eq!(corroborator.geocode_query(" 8001 "), "8001,CH");
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        assert!(OpenWeatherCorroborator::new(WeatherConfig::default()).is_err());
    }
}
