use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::types::CacheConfig;
use crate::domain::country::{
    COUNTRIES_CACHE_KEY, CountryRecord, city_cache_key, normalize_cities, normalize_countries,
};
use crate::error::{LookupError, Result};
use crate::ports::cache::ReferenceCache;
use crate::ports::reference_api::ReferenceApi;

use super::single_flight::SingleFlight;

/// Cache-or-fetch access to the country and city datasets.
///
/// Each dataset lives in its own cache with its own TTL. A value is written
/// only after a successful fetch, so a failed call never poisons the cache
/// and the next caller simply tries again.
pub struct ReferenceDataClient {
    api: Arc<dyn ReferenceApi>,
    countries_cache: Arc<dyn ReferenceCache>,
    cities_cache: Arc<dyn ReferenceCache>,
    countries_ttl: Duration,
    cities_ttl: Duration,
    flights: SingleFlight,
}

impl ReferenceDataClient {
    pub fn new(
        api: Arc<dyn ReferenceApi>,
        countries_cache: Arc<dyn ReferenceCache>,
        cities_cache: Arc<dyn ReferenceCache>,
        cache_config: &CacheConfig,
    ) -> Self {
        Self {
            api,
            countries_cache,
            cities_cache,
            countries_ttl: Duration::from_secs(cache_config.countries_ttl_secs),
            cities_ttl: Duration::from_secs(cache_config.cities_ttl_secs),
            flights: SingleFlight::new(),
        }
    }

    pub async fn get_country_list(&self) -> Result<Vec<CountryRecord>> {
        self.cached_or_fetch(
            self.countries_cache.as_ref(),
            COUNTRIES_CACHE_KEY,
            self.countries_ttl,
            || async {
                let records = self.api.fetch_countries().await?;
                Ok::<_, LookupError>(normalize_countries(records))
            },
        )
        .await
    }

    /// Cities of `country_name`, keyed case-insensitively. A blank name
    /// returns an empty list without touching the API.
    pub async fn get_city_list(&self, country_name: &str) -> Result<Vec<String>> {
        let Some(key) = city_cache_key(country_name) else {
            return Ok(Vec::new());
        };
        let country_name = country_name.trim();

        self.cached_or_fetch(self.cities_cache.as_ref(), &key, self.cities_ttl, || async {
            let cities = self.api.fetch_cities(country_name).await?;
            Ok::<_, LookupError>(normalize_cities(cities))
        })
        .await
    }

    async fn cached_or_fetch<T, F, Fut>(
        &self,
        cache: &dyn ReferenceCache,
        key: &str,
        ttl: Duration,
        fetch: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(value) = read_cached(cache, key) {
            debug!(key, "Reference cache hit");
            return Ok(value);
        }

        let _flight = self.flights.acquire(key).await;

        // someone else may have filled it while we queued
        if let Some(value) = read_cached(cache, key) {
            debug!(key, "Reference cache filled by concurrent fetch");
            return Ok(value);
        }

        debug!(key, "Reference cache miss, fetching from upstream");
        let value = fetch().await?;

        match serde_json::to_string(&value) {
            Ok(serialized) => cache.set(key, &serialized, ttl),
            Err(e) => warn!(key, error = %e, "Failed to serialize reference data for cache"),
        }

        Ok(value)
    }
}

fn read_cached<T: DeserializeOwned>(cache: &dyn ReferenceCache, key: &str) -> Option<T> {
    let raw = cache.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Discarding unreadable cache entry");
            None
        }
    }
}
