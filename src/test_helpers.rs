use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::country::CountryRecord;
use crate::error::Result;
use crate::ports::reference_api::ReferenceApi;

type CountriesFn = Box<dyn Fn() -> Result<Vec<CountryRecord>> + Send + Sync>;
type CitiesFn = Box<dyn Fn(&str) -> Result<Vec<String>> + Send + Sync>;

/// Scriptable [`ReferenceApi`] that counts every outbound call.
pub struct MockReferenceApi {
    countries_fn: Mutex<CountriesFn>,
    cities_fn: Mutex<CitiesFn>,
    delay: Option<Duration>,
    country_calls: AtomicUsize,
    city_calls: AtomicUsize,
}

impl Default for MockReferenceApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockReferenceApi {
    pub fn new() -> Self {
        Self {
            countries_fn: Mutex::new(Box::new(|| Ok(vec![]))),
            cities_fn: Mutex::new(Box::new(|_| Ok(vec![]))),
            delay: None,
            country_calls: AtomicUsize::new(0),
            city_calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn with_countries(
        self,
        f: impl Fn() -> Result<Vec<CountryRecord>> + Send + Sync + 'static,
    ) -> Self {
        *self.countries_fn.lock().unwrap() = Box::new(f);
        self
    }

    #[must_use]
    pub fn with_cities(
        self,
        f: impl Fn(&str) -> Result<Vec<String>> + Send + Sync + 'static,
    ) -> Self {
        *self.cities_fn.lock().unwrap() = Box::new(f);
        self
    }

    /// Simulated upstream latency, applied before every response.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn country_calls(&self) -> usize {
        self.country_calls.load(Ordering::SeqCst)
    }

    pub fn city_calls(&self) -> usize {
        self.city_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReferenceApi for MockReferenceApi {
    async fn fetch_countries(&self) -> Result<Vec<CountryRecord>> {
        self.country_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let f = self.countries_fn.lock().unwrap();
        f()
    }

    async fn fetch_cities(&self, country_name: &str) -> Result<Vec<String>> {
        self.city_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let f = self.cities_fn.lock().unwrap();
        f(country_name)
    }
}

// --- Factory functions ---

pub fn make_countries(names: &[&str]) -> Vec<CountryRecord> {
    names.iter().map(|n| CountryRecord::named(*n)).collect()
}
