//! Configuration management for the Stylecast relay
//!
//! Everything comes from environment variables. Upstream credentials are
//! required and the process refuses to start without them; the rest falls
//! back to defaults.

use crate::StylecastError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Root configuration structure for the Stylecast relay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylecastConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Shared outbound HTTP client settings
    pub http: HttpConfig,
    /// Weather API configuration
    pub weather: WeatherConfig,
    /// Reverse geocoding API configuration
    pub geocoding: GeocodingConfig,
    /// Clothing catalog datastore configuration
    pub catalog: CatalogConfig,
    /// Generative language model configuration
    pub model: ModelConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// HTML document served at `/`
    pub index_html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Project URL of the datastore
    pub url: String,
    pub api_key: String,
    /// Table holding the clothing rows
    pub table: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub api_key: String,
    pub base_url: String,
    /// Model name, e.g. `gemini-1.5-flash`
    pub model: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Log format (pretty or json)
    pub format: String,
    /// OTLP/HTTP collector endpoint; spans are exported only when set
    pub otlp_endpoint: Option<String>,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_index_html() -> String {
    "frontend/index.html".to_string()
}

fn default_http_timeout() -> u32 {
    30
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org".to_string()
}

fn default_geocoding_base_url() -> String {
    "https://dapi.kakao.com".to_string()
}

fn default_model_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_catalog_table() -> String {
    "clothes".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl StylecastConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| StylecastError::config(format!("Missing {key} env var")).into())
        };
        let optional = |key: &str, default: fn() -> String| -> String {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(default)
        };

        let port = match lookup("STYLECAST_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid STYLECAST_PORT: {raw}"))?,
            None => default_port(),
        };

        let timeout_seconds = match lookup("STYLECAST_HTTP_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("Invalid STYLECAST_HTTP_TIMEOUT_SECONDS: {raw}"))?,
            None => default_http_timeout(),
        };

        let config = Self {
            server: ServerConfig {
                host: optional("STYLECAST_HOST", default_host),
                port,
                index_html: optional("STYLECAST_INDEX_HTML", default_index_html),
            },
            http: HttpConfig { timeout_seconds },
            weather: WeatherConfig {
                api_key: required("OPENWEATHER_API_KEY")?,
                base_url: optional("STYLECAST_WEATHER_BASE_URL", default_weather_base_url),
            },
            geocoding: GeocodingConfig {
                api_key: required("KAKAO_API_KEY")?,
                base_url: optional("STYLECAST_GEOCODING_BASE_URL", default_geocoding_base_url),
            },
            catalog: CatalogConfig {
                url: required("SUPABASE_URL")?,
                api_key: required("SUPABASE_KEY")?,
                table: optional("STYLECAST_CATALOG_TABLE", default_catalog_table),
            },
            model: ModelConfig {
                api_key: required("GEMINI_API_KEY")?,
                base_url: optional("STYLECAST_MODEL_BASE_URL", default_model_base_url),
                model: optional("STYLECAST_MODEL", default_model),
            },
            logging: LoggingConfig {
                level: optional("STYLECAST_LOG_LEVEL", default_log_level).to_lowercase(),
                format: optional("STYLECAST_LOG_FORMAT", default_log_format).to_lowercase(),
                otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT")
                    .filter(|value| !value.trim().is_empty()),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.http.timeout_seconds == 0 || self.http.timeout_seconds > 300 {
            return Err(StylecastError::config(
                "HTTP timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        Ok(())
    }

    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(StylecastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(StylecastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let urls = [
            ("weather base URL", &self.weather.base_url),
            ("geocoding base URL", &self.geocoding.base_url),
            ("SUPABASE_URL", &self.catalog.url),
            ("model base URL", &self.model.base_url),
        ];
        for (name, url) in urls {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(StylecastError::config(format!(
                    "{name} must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Socket address the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
