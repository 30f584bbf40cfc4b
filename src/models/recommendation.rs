//! Outfit recommendations produced by the language model

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::WeatherReport;

/// One outfit exactly as the model wrote it.
///
/// Nothing checks the shape or the items against the real catalog; the model
/// may invent them, add keys or leave some out. The usual shape is a
/// `style_description` plus an `items` object keyed by slot (`top`, `bottom`,
/// `outer`, `shoes`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct RecommendationSet(Value);

impl RecommendationSet {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn style_description(&self) -> Option<&str> {
        self.0.get("style_description").and_then(Value::as_str)
    }

    /// Item the model put in `slot`, if any
    #[must_use]
    pub fn item(&self, slot: &str) -> Option<&Value> {
        self.0.get("items").and_then(|items| items.get(slot))
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Successful `/recommend` response body
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recommendation {
    pub weather: WeatherReport,
    pub recommendations: Vec<RecommendationSet>,
}
