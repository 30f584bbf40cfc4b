use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use reqwest::Client;
use serde::Serialize;
use tracing::{error, warn};

use crate::{
    StylecastError,
    catalog::SupabaseCatalog,
    config::StylecastConfig,
    llm::GeminiClient,
    location_resolver::KakaoAddressResolver,
    models::{Coordinate, Recommendation, WeatherReport},
    recommend::Recommender,
    weather::{OpenWeatherClient, WeatherService},
};

const USER_AGENT: &str = concat!("Stylecast/", env!("CARGO_PKG_VERSION"));

/// Upstream clients shared by every request. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub weather: WeatherService,
    pub recommender: Recommender,
}

impl AppState {
    pub fn new(weather: WeatherService, recommender: Recommender) -> Self {
        Self {
            weather,
            recommender,
        }
    }

    /// Wire the HTTP-backed upstream clients around one shared `reqwest::Client`
    pub fn from_config(config: &StylecastConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http.timeout_seconds.into()))
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to create HTTP client")?;

        let weather = WeatherService::new(
            Arc::new(OpenWeatherClient::new(client.clone(), &config.weather)),
            Arc::new(KakaoAddressResolver::new(client.clone(), &config.geocoding)),
        );
        let recommender = Recommender::new(
            weather.clone(),
            Arc::new(SupabaseCatalog::new(client.clone(), &config.catalog)),
            Arc::new(GeminiClient::new(client, &config.model)),
        );

        Ok(Self::new(weather, recommender))
    }
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    pub weather: WeatherReport,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error wrapper that renders as `{"error", "details"?}` with a matching status
pub struct ApiError(StylecastError);

impl From<StylecastError> for ApiError {
    fn from(err: StylecastError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(StylecastError::validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(StylecastError::validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status: StatusCode = self.0.status_code();
        if status.is_server_error() {
            error!("Request failed with {}: {}", status, self.0);
        } else {
            warn!("Request rejected with {}: {}", status, self.0);
        }
        let body = ErrorResponse {
            error: self.0.user_message(),
            details: self.0.details(),
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/test-weather", get(test_weather))
        .route("/recommend", post(recommend))
        .with_state(state)
}

async fn test_weather(
    State(state): State<AppState>,
    query: Result<Query<Coordinate>, QueryRejection>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let Query(coordinate) = query?;
    let weather = state.weather.report(coordinate).await?;
    Ok(Json(WeatherResponse { weather }))
}

async fn recommend(
    State(state): State<AppState>,
    body: Result<Json<Coordinate>, JsonRejection>,
) -> Result<Json<Recommendation>, ApiError> {
    let Json(coordinate) = body?;
    let recommendation = state.recommender.recommend(coordinate).await?;
    Ok(Json(recommendation))
}
