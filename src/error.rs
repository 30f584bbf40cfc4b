//! Error types and handling for the Stylecast relay

use axum::http::StatusCode;
use thiserror::Error;

/// Third-party services the relay talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    Weather,
    Geocoding,
    Catalog,
    Model,
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Upstream::Weather => "weather",
            Upstream::Geocoding => "geocoding",
            Upstream::Catalog => "catalog",
            Upstream::Model => "model",
        };
        f.write_str(name)
    }
}

/// Main error type for the Stylecast relay
#[derive(Error, Debug)]
pub enum StylecastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Weather provider unreachable or answered with a non-200 code
    #[error("Weather unavailable: {message}")]
    Weather { message: String },

    /// Catalog or model communication errors
    #[error("{service} API error: {message}")]
    Upstream { service: Upstream, message: String },

    /// The clothing catalog returned no rows
    #[error("Clothing catalog is empty")]
    EmptyCatalog,

    /// Model text could not be read as a recommendation document
    #[error("Malformed model output: {message}")]
    ModelOutput { message: String },
}

impl StylecastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new weather error
    pub fn weather<S: Into<String>>(message: S) -> Self {
        Self::Weather {
            message: message.into(),
        }
    }

    /// Create a new upstream error for the given service
    pub fn upstream<S: Into<String>>(service: Upstream, message: S) -> Self {
        Self::Upstream {
            service,
            message: message.into(),
        }
    }

    /// Create a new model output error
    pub fn model_output<S: Into<String>>(message: S) -> Self {
        Self::ModelOutput {
            message: message.into(),
        }
    }

    /// Get the message shown to API clients
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            StylecastError::Config { .. } => "서버 설정 오류가 발생했습니다.".to_string(),
            StylecastError::Validation { .. } => "위치 정보가 올바르지 않습니다.".to_string(),
            StylecastError::Weather { .. } => "날씨 정보를 가져올 수 없습니다.".to_string(),
            StylecastError::Upstream {
                service: Upstream::Model,
                ..
            }
            | StylecastError::ModelOutput { .. } => {
                "추천 생성 중 오류가 발생했습니다.".to_string()
            }
            StylecastError::Upstream { .. } => "옷 정보를 불러올 수 없습니다.".to_string(),
            StylecastError::EmptyCatalog => "옷 정보를 찾을 수 없습니다.".to_string(),
        }
    }

    /// Extra detail for the client, if this kind of failure carries one.
    ///
    /// Raw upstream error text stays in the logs.
    #[must_use]
    pub fn details(&self) -> Option<String> {
        match self {
            StylecastError::Validation { message } => Some(message.clone()),
            StylecastError::Upstream {
                service: Upstream::Model,
                ..
            } => Some("language model request failed".to_string()),
            StylecastError::ModelOutput { .. } => {
                Some("language model response was not a valid recommendation document".to_string())
            }
            _ => None,
        }
    }

    /// HTTP status used when this error reaches a route handler
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            StylecastError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            StylecastError::Validation { .. } => StatusCode::BAD_REQUEST,
            StylecastError::EmptyCatalog => StatusCode::NOT_FOUND,
            StylecastError::Weather { .. }
            | StylecastError::Upstream { .. }
            | StylecastError::ModelOutput { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}
