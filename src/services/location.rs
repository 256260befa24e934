//! Geolocation collaborator
//!
//! Resolves approximate device coordinates through an external provider
//! with a timeout and a short-lived cache. Every failure degrades to the
//! configured generic map URL; location never blocks a booking.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use utoipa::ToSchema;

use crate::{config::GeolocationConfig, error::AppResult};

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Where a map URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MapSource {
    Device,
    Fallback,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResolvedMap {
    pub map_url: String,
    pub source: MapSource,
    /// Transient notice for the customer when resolution failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn locate(&self, high_accuracy: bool) -> AppResult<Coordinates>;
}

/// HTTP provider returning `{ latitude, longitude }` JSON
pub struct HttpLocationProvider {
    client: reqwest::Client,
    provider_url: String,
}

impl HttpLocationProvider {
    pub fn new(provider_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            provider_url,
        }
    }
}

#[async_trait]
impl LocationProvider for HttpLocationProvider {
    async fn locate(&self, high_accuracy: bool) -> AppResult<Coordinates> {
        let accuracy = if high_accuracy { "high" } else { "coarse" };
        let fix: Coordinates = self
            .client
            .get(&self.provider_url)
            .query(&[("accuracy", accuracy)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(fix)
    }
}

#[derive(Clone)]
pub struct LocationService {
    provider: Arc<dyn LocationProvider>,
    config: GeolocationConfig,
    cache: Arc<Mutex<Option<(Instant, Coordinates)>>>,
}

impl LocationService {
    pub fn new(config: GeolocationConfig) -> Self {
        let provider = Arc::new(HttpLocationProvider::new(config.provider_url.clone()));
        Self::with_provider(config, provider)
    }

    pub fn with_provider(config: GeolocationConfig, provider: Arc<dyn LocationProvider>) -> Self {
        Self {
            provider,
            config,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    /// Resolve a map URL for the customer's position, falling back to the
    /// generic map on timeout or provider failure
    pub async fn map_url(&self, high_accuracy: Option<bool>) -> ResolvedMap {
        let mut cache = self.cache.lock().await;
        let max_age = Duration::from_secs(self.config.max_cache_age_secs);

        if let Some((at, coords)) = *cache {
            if self.config.max_cache_age_secs > 0 && at.elapsed() <= max_age {
                return Self::device_map(coords);
            }
        }

        let high_accuracy = high_accuracy.unwrap_or(self.config.high_accuracy);
        let timeout = Duration::from_millis(self.config.timeout_ms);

        match tokio::time::timeout(timeout, self.provider.locate(high_accuracy)).await {
            Ok(Ok(coords)) => {
                *cache = Some((Instant::now(), coords));
                Self::device_map(coords)
            }
            Ok(Err(e)) => {
                tracing::warn!("Location provider failed: {}", e);
                self.fallback_map()
            }
            Err(_) => {
                tracing::warn!("Location provider timed out after {:?}", timeout);
                self.fallback_map()
            }
        }
    }

    fn device_map(coords: Coordinates) -> ResolvedMap {
        ResolvedMap {
            map_url: format!(
                "https://www.google.com/maps?q={},{}",
                coords.latitude, coords.longitude
            ),
            source: MapSource::Device,
            notice: None,
        }
    }

    fn fallback_map(&self) -> ResolvedMap {
        ResolvedMap {
            map_url: self.config.fallback_map_url.clone(),
            source: MapSource::Fallback,
            notice: Some(
                "Could not determine your location; showing the area map instead.".to_string(),
            ),
        }
    }
}
