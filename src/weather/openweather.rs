//! OpenWeatherMap current weather API
//!
//! [`OpenWeatherClient::fetch`] is the HTTP transport; the
//! `TryFrom<OpenWeatherResponse>` impl is the response-shape mapping. They are
//! kept apart so the mapping can be tested without a network.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, info, instrument};

use super::WeatherSource;
use crate::config::WeatherConfig;
use crate::error::StylecastError;
use crate::models::{Coordinate, CurrentConditions};

/// Status code OpenWeatherMap puts in `cod` on success
const COD_OK: i64 = 200;

/// The provider sends `cod` as a number on success and often as a string on
/// failure
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Cod {
    Number(i64),
    Text(String),
}

impl Cod {
    #[must_use]
    pub fn as_code(&self) -> Option<i64> {
        match self {
            Cod::Number(code) => Some(*code),
            Cod::Text(code) => code.trim().parse().ok(),
        }
    }
}

/// Raw `/data/2.5/weather` response body
#[derive(Debug, Deserialize)]
pub struct OpenWeatherResponse {
    pub cod: Option<Cod>,
    pub message: Option<String>,
    pub name: Option<String>,
    pub main: Option<MainReadings>,
    #[serde(default)]
    pub weather: Vec<ConditionEntry>,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
}

#[derive(Debug, Deserialize)]
pub struct ConditionEntry {
    pub description: String,
    pub icon: String,
}

impl TryFrom<OpenWeatherResponse> for CurrentConditions {
    type Error = StylecastError;

    fn try_from(response: OpenWeatherResponse) -> Result<Self, Self::Error> {
        let code = response.cod.as_ref().and_then(Cod::as_code);
        if code != Some(COD_OK) {
            return Err(StylecastError::weather(format!(
                "provider returned cod {:?}: {}",
                response.cod,
                response.message.unwrap_or_default()
            )));
        }

        let city_name = response
            .name
            .ok_or_else(|| StylecastError::weather("response has no city name"))?;
        let main = response
            .main
            .ok_or_else(|| StylecastError::weather("response has no main readings"))?;
        let condition = response
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| StylecastError::weather("response has no weather conditions"))?;

        Ok(CurrentConditions {
            city_name,
            temperature: main.temp,
            feels_like: main.feels_like,
            description: condition.description,
            icon: condition.icon,
        })
    }
}

/// OpenWeatherMap API client
#[derive(Clone)]
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(client: Client, config: &WeatherConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the raw current weather document.
    ///
    /// The body is parsed whatever the HTTP status, since the provider reports
    /// failures through `cod`.
    pub async fn fetch(&self, coordinate: Coordinate) -> crate::Result<OpenWeatherResponse> {
        let url = format!(
            "{}/data/2.5/weather?lat={}&lon={}&appid={}&units=metric&lang=kr",
            self.base_url, coordinate.latitude, coordinate.longitude, self.api_key
        );

        let start_time = Instant::now();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                StylecastError::weather(format!("request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        debug!(
            "Weather API responded {} in {:.3}s",
            status,
            start_time.elapsed().as_secs_f64()
        );

        response.json().await.map_err(|e| {
            StylecastError::weather(format!(
                "invalid response (HTTP {status}): {}",
                e.without_url()
            ))
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    #[instrument(skip(self), fields(coordinates = %coordinate.format_coordinates()))]
    async fn current(&self, coordinate: Coordinate) -> crate::Result<CurrentConditions> {
        let response = self.fetch(coordinate).await?;
        let conditions = CurrentConditions::try_from(response)?;
        info!(
            "Current weather for {}: {:.1}°C, {}",
            conditions.city_name, conditions.temperature, conditions.description
        );
        Ok(conditions)
    }
}
