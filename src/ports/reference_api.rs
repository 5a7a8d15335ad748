use async_trait::async_trait;

use crate::domain::country::CountryRecord;
use crate::error::Result;

/// Outbound access to the country/city reference API. Implementations
/// perform exactly one request per call and never retry.
#[async_trait]
pub trait ReferenceApi: Send + Sync {
    async fn fetch_countries(&self) -> Result<Vec<CountryRecord>>;
    async fn fetch_cities(&self, country_name: &str) -> Result<Vec<String>>;
}
