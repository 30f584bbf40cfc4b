//! `Stylecast` - weather-aware outfit recommendations
//!
//! This library relays a coordinate to weather, reverse geocoding, a clothing
//! catalog and a generative language model, and shapes the answers into
//! outfit recommendations.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod llm;
pub mod location_resolver;
pub mod models;
pub mod recommend;
pub mod telemetry;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use api::AppState;
pub use config::StylecastConfig;
pub use error::{StylecastError, Upstream};
pub use models::{ClothingItem, Coordinate, Recommendation, RecommendationSet, WeatherReport};
pub use recommend::Recommender;
pub use weather::WeatherService;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, StylecastError>;
