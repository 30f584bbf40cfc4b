//! Weather data model

use serde::{Deserialize, Serialize};

/// Current conditions as reported by the weather provider, before the
/// address is attached
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    pub city_name: String,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Perceived temperature in Celsius
    pub feels_like: f64,
    /// Human-readable description of weather conditions
    pub description: String,
    /// Weather condition icon code from the provider
    pub icon: String,
}

/// Normalized weather record returned to clients and embedded in prompts
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReport {
    pub city_name: String,
    #[serde(rename = "temp")]
    pub temperature: f64,
    pub feels_like: f64,
    pub description: String,
    pub icon: String,
    /// Address resolved for the requested coordinate, or a fallback notice
    pub detailed_address: String,
}

impl WeatherReport {
    #[must_use]
    pub fn new(conditions: CurrentConditions, detailed_address: String) -> Self {
        Self {
            city_name: conditions.city_name,
            temperature: conditions.temperature,
            feels_like: conditions.feels_like,
            description: conditions.description,
            icon: conditions.icon,
            detailed_address,
        }
    }
}
