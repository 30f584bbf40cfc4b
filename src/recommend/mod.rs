//! Recommendation orchestration
//!
//! One linear pass per request: weather, catalog, prompt, model, parse. Each
//! step short-circuits the rest on failure and nothing is retried.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::StylecastError;
use crate::catalog::CatalogStore;
use crate::llm::LanguageModel;
use crate::models::{
    Category, ClothingBuckets, ClothingItem, Coordinate, Recommendation, RecommendationSet,
    WeatherReport,
};
use crate::weather::WeatherService;

pub mod prompt;

pub use prompt::{build_prompt, parse_recommendations, strip_code_fences};

#[derive(Clone)]
pub struct Recommender {
    weather: WeatherService,
    catalog: Arc<dyn CatalogStore>,
    model: Arc<dyn LanguageModel>,
}

impl Recommender {
    pub fn new(
        weather: WeatherService,
        catalog: Arc<dyn CatalogStore>,
        model: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            weather,
            catalog,
            model,
        }
    }

    #[instrument(skip(self))]
    pub async fn recommend(&self, coordinate: Coordinate) -> crate::Result<Recommendation> {
        let weather = self.weather.report(coordinate).await?;

        let items = self.catalog.all_items().await?;
        if items.is_empty() {
            return Err(StylecastError::EmptyCatalog);
        }

        let buckets = ClothingBuckets::from_items(&items);
        debug!(
            "Catalog buckets: {}",
            Category::ALL
                .iter()
                .map(|c| format!("{}={}", c, buckets.bucket(*c).len()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        if buckets.len() < items.len() {
            debug!(
                "{} items have no recognized category",
                items.len() - buckets.len()
            );
        }

        let recommendations = self.generate(&weather, &items).await?;

        info!(
            "Generated {} outfit recommendations for {}",
            recommendations.len(),
            weather.city_name
        );

        Ok(Recommendation {
            weather,
            recommendations,
        })
    }

    async fn generate(
        &self,
        weather: &WeatherReport,
        items: &[ClothingItem],
    ) -> crate::Result<Vec<RecommendationSet>> {
        let prompt = build_prompt(weather, items)?;
        let text = self.model.generate(&prompt).await?;
        parse_recommendations(&text)
    }
}
