use std::sync::Arc;

use tracing::debug;

use crate::domain::lookup::{CountryDetails, LookupResult, filter_countries};
use crate::error::Result;
use crate::reference::ReferenceDataClient;

/// Query-facing layer over the cached reference data. Holds no state of its
/// own; every call is answered from [`ReferenceDataClient`].
pub struct LookupService {
    reference: Arc<ReferenceDataClient>,
}

impl LookupService {
    pub fn new(reference: Arc<ReferenceDataClient>) -> Self {
        Self { reference }
    }

    pub async fn search_countries(&self, query_fragment: &str) -> Result<LookupResult> {
        let countries = self.reference.get_country_list().await?;
        let result = filter_countries(&countries, query_fragment);
        debug!(
            query = query_fragment,
            hits = result.count,
            "Country search completed"
        );
        Ok(result)
    }

    pub async fn resolve_cities_for_country(&self, country_name: &str) -> Result<Vec<String>> {
        self.reference.get_city_list(country_name).await
    }

    /// `None` when the person has no country (empty or whitespace).
    pub async fn country_details(&self, country_name: &str) -> Result<Option<CountryDetails>> {
        if country_name.trim().is_empty() {
            return Ok(None);
        }
        let cities = self.resolve_cities_for_country(country_name).await?;
        Ok(Some(CountryDetails {
            country: country_name.to_string(),
            cities,
        }))
    }
}
