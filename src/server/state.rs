use std::sync::Arc;

use crate::adapters::cache::memory_cache::MemoryCache;
use crate::adapters::countriesnow::client::CountriesNowClient;
use crate::config::types::Config;
use crate::error::Result;
use crate::graphql::{ContentType, SchemaExtensions, country_details_extensions};
use crate::ports::cache::ReferenceCache;
use crate::ports::reference_api::ReferenceApi;
use crate::reference::ReferenceDataClient;
use crate::service::LookupService;

/// Everything a request handler needs. Built once per process and shared
/// by reference.
pub struct AppState {
    pub lookup: Arc<LookupService>,
    pub extensions: SchemaExtensions,
}

impl AppState {
    pub fn new(lookup: Arc<LookupService>, extensions: SchemaExtensions) -> Self {
        Self { lookup, extensions }
    }

    /// Wire the production stack: countriesnow client, one LRU cache per
    /// dataset, lookup service and the `countryDetails` extension.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api: Arc<dyn ReferenceApi> = Arc::new(CountriesNowClient::new(&config.api)?);
        let countries_cache: Arc<dyn ReferenceCache> =
            Arc::new(MemoryCache::new(config.cache.countries_max_entries));
        let cities_cache: Arc<dyn ReferenceCache> =
            Arc::new(MemoryCache::new(config.cache.cities_max_entries));

        let reference = Arc::new(ReferenceDataClient::new(
            api,
            countries_cache,
            cities_cache,
            &config.cache,
        ));
        let lookup = Arc::new(LookupService::new(reference));

        let content_type = ContentType::new(
            &config.extensions.application,
            &config.extensions.content_type,
        )?;
        let extensions = country_details_extensions(&content_type, Arc::clone(&lookup))?;

        Ok(Self::new(lookup, extensions))
    }
}
