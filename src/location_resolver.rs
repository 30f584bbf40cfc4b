//! Address Resolution Module
//!
//! Turns a coordinate into a human-readable address through the Kakao Local
//! reverse geocoding API. A lookup never fails its caller: every outcome is an
//! [`AddressLookup`] variant, and the weather fetcher decides how to display it.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::GeocodingConfig;
use crate::error::{StylecastError, Upstream};
use crate::models::Coordinate;

/// Shown when the geocoder knows nothing about the coordinate
pub const NO_ADDRESS: &str = "주소 정보 없음";
/// Shown when the geocoder could not be asked or answered garbage
pub const ADDRESS_LOOKUP_ERROR: &str = "주소 조회 실패";

/// Outcome of a reverse geocoding lookup
#[derive(Debug, Clone, PartialEq)]
pub enum AddressLookup {
    /// Road-name address
    Road(String),
    /// Lot-number (jibun) address, used when no road address exists
    Jibun(String),
    NotFound,
    Failed(String),
}

impl AddressLookup {
    /// Display string for clients; failures collapse to the fixed notices
    #[must_use]
    pub fn into_display(self) -> String {
        match self {
            AddressLookup::Road(address) | AddressLookup::Jibun(address) => address,
            AddressLookup::NotFound => NO_ADDRESS.to_string(),
            AddressLookup::Failed(_) => ADDRESS_LOOKUP_ERROR.to_string(),
        }
    }

    /// Pick the best address out of a geocoder response
    #[must_use]
    pub fn from_response(response: &KakaoAddressResponse) -> Self {
        let Some(document) = response.documents.first() else {
            return AddressLookup::NotFound;
        };

        if let Some(road) = document
            .road_address
            .as_ref()
            .filter(|road| !road.address_name.is_empty())
        {
            return AddressLookup::Road(road.address_name.clone());
        }

        match document
            .address
            .as_ref()
            .filter(|jibun| !jibun.address_name.is_empty())
        {
            Some(jibun) => AddressLookup::Jibun(jibun.address_name.clone()),
            None => AddressLookup::NotFound,
        }
    }
}

/// Reverse geocoder seam
#[async_trait]
pub trait AddressResolver: Send + Sync {
    async fn resolve(&self, coordinate: Coordinate) -> AddressLookup;
}

/// `coord2address` response body
#[derive(Debug, Deserialize)]
pub struct KakaoAddressResponse {
    #[serde(default)]
    pub documents: Vec<KakaoDocument>,
}

#[derive(Debug, Deserialize)]
pub struct KakaoDocument {
    pub road_address: Option<KakaoAddressName>,
    pub address: Option<KakaoAddressName>,
}

#[derive(Debug, Deserialize)]
pub struct KakaoAddressName {
    pub address_name: String,
}

/// Kakao Local API client
#[derive(Clone)]
pub struct KakaoAddressResolver {
    client: Client,
    api_key: String,
    base_url: String,
}

impl KakaoAddressResolver {
    pub fn new(client: Client, config: &GeocodingConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn request(&self, coordinate: Coordinate) -> crate::Result<KakaoAddressResponse> {
        // Kakao takes x = longitude, y = latitude
        let url = format!(
            "{}/v2/local/geo/coord2address.json?x={}&y={}",
            self.base_url, coordinate.longitude, coordinate.latitude
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("KakaoAK {}", self.api_key))
            .send()
            .await
            .map_err(|e| {
                StylecastError::upstream(Upstream::Geocoding, format!("request failed: {e}"))
            })?;

        if !response.status().is_success() {
            return Err(StylecastError::upstream(
                Upstream::Geocoding,
                format!("status {}", response.status()),
            ));
        }

        response.json().await.map_err(|e| {
            StylecastError::upstream(Upstream::Geocoding, format!("invalid response: {e}"))
        })
    }
}

#[async_trait]
impl AddressResolver for KakaoAddressResolver {
    #[instrument(skip(self), fields(coordinates = %coordinate.format_coordinates()))]
    async fn resolve(&self, coordinate: Coordinate) -> AddressLookup {
        match self.request(coordinate).await {
            Ok(response) => {
                let lookup = AddressLookup::from_response(&response);
                debug!("Resolved address: {:?}", lookup);
                lookup
            }
            Err(e) => {
                warn!("Reverse geocoding failed: {}", e);
                AddressLookup::Failed(e.to_string())
            }
        }
    }
}
