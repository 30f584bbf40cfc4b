//! Clothing catalog backed by a Supabase (PostgREST) table

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};

use crate::config::CatalogConfig;
use crate::error::{StylecastError, Upstream};
use crate::models::ClothingItem;

/// Read-only access to the clothing catalog
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every row in the catalog, unfiltered
    async fn all_items(&self) -> crate::Result<Vec<ClothingItem>>;
}

#[derive(Clone)]
pub struct SupabaseCatalog {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl SupabaseCatalog {
    pub fn new(client: Client, config: &CatalogConfig) -> Self {
        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            table: config.table.clone(),
        }
    }
}

#[async_trait]
impl CatalogStore for SupabaseCatalog {
    #[instrument(skip(self), fields(table = %self.table))]
    async fn all_items(&self) -> crate::Result<Vec<ClothingItem>> {
        let url = format!(
            "{}/rest/v1/{}?select=id,name,category,image_url",
            self.base_url, self.table
        );

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| {
                StylecastError::upstream(Upstream::Catalog, format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(StylecastError::upstream(
                Upstream::Catalog,
                format!("status {status}: {error_text}"),
            ));
        }

        let items: Vec<ClothingItem> = response.json().await.map_err(|e| {
            StylecastError::upstream(Upstream::Catalog, format!("invalid rows: {e}"))
        })?;

        info!("Loaded {} clothing items", items.len());
        Ok(items)
    }
}
