//! Data models for the Stylecast relay
//!
//! This module contains the request-scoped domain models organized by concern:
//! - Location: Geographic coordinates
//! - Weather: Normalized current weather record
//! - Clothing: Catalog rows and category buckets
//! - Recommendation: Outfit sets produced by the language model

pub mod clothing;
pub mod location;
pub mod recommendation;
pub mod weather;

// Re-export all public types for convenient access
pub use clothing::{Category, ClothingBuckets, ClothingItem, ItemId};
pub use location::Coordinate;
pub use recommendation::{Recommendation, RecommendationSet};
pub use weather::{CurrentConditions, WeatherReport};
