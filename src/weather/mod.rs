use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::location_resolver::AddressResolver;
use crate::models::{Coordinate, CurrentConditions, WeatherReport};

pub mod openweather;

pub use openweather::OpenWeatherClient;

/// Current weather provider seam
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current(&self, coordinate: Coordinate) -> crate::Result<CurrentConditions>;
}

/// Weather plus address for a coordinate. No caching: every call goes upstream.
#[derive(Clone)]
pub struct WeatherService {
    source: Arc<dyn WeatherSource>,
    addresses: Arc<dyn AddressResolver>,
}

impl WeatherService {
    pub fn new(source: Arc<dyn WeatherSource>, addresses: Arc<dyn AddressResolver>) -> Self {
        Self { source, addresses }
    }

    /// Fetch current conditions, then resolve the address.
    ///
    /// A weather failure is returned as is; an address failure only changes
    /// the `detailed_address` text.
    #[instrument(skip(self))]
    pub async fn report(&self, coordinate: Coordinate) -> crate::Result<WeatherReport> {
        let conditions = self.source.current(coordinate).await?;
        let address = self.addresses.resolve(coordinate).await.into_display();
        Ok(WeatherReport::new(conditions, address))
    }
}
