use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::config::types::ApiConfig;
use crate::domain::country::CountryRecord;
use crate::error::{LookupError, Result};
use crate::ports::reference_api::ReferenceApi;

use super::parsers;

const COUNTRIES_ENDPOINT: &str = "iso";
const CITIES_ENDPOINT: &str = "cities/q";

/// reqwest-backed client for the countriesnow.space reference API.
pub struct CountriesNowClient {
    http: Client,
    base_url: String,
}

impl CountriesNowClient {
    pub fn new(config: &ApiConfig) -> std::result::Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint_url(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/{endpoint}", self.base_url))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// One GET, no retry. In-band errors are reported even when the HTTP
    /// status is 2xx, and a non-2xx status is an error even without one.
    async fn get_json(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = self.endpoint_url(endpoint, query)?;
        debug!(url = %url, "Reference API GET request");

        let response = self
            .http
            .get(url.as_str())
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(LookupError::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(LookupError::Http)?;
        debug!(
            endpoint,
            status = status.as_u16(),
            body_len = body.len(),
            "Reference API response received"
        );
        trace!(endpoint, body = %body, "Reference API raw response");

        let json: Value = match serde_json::from_str(&body) {
            Ok(json) => json,
            Err(e) if status.is_success() => {
                return Err(LookupError::upstream(format!(
                    "countriesnow {endpoint} JSON parse error: {e}"
                )));
            }
            Err(_) => {
                return Err(LookupError::upstream(format!(
                    "countriesnow {endpoint} returned HTTP {status}"
                )));
            }
        };

        parsers::check_envelope(&json)?;

        if !status.is_success() {
            return Err(LookupError::Upstream {
                message: format!("countriesnow {endpoint} returned HTTP {status}"),
                payload: Some(json),
            });
        }

        Ok(json)
    }
}

#[async_trait]
impl ReferenceApi for CountriesNowClient {
    async fn fetch_countries(&self) -> Result<Vec<CountryRecord>> {
        let json = self.get_json(COUNTRIES_ENDPOINT, &[]).await?;
        parsers::parse_countries_response(&json)
    }

    async fn fetch_cities(&self, country_name: &str) -> Result<Vec<String>> {
        let json = self
            .get_json(CITIES_ENDPOINT, &[("country", country_name)])
            .await?;
        parsers::parse_cities_response(&json)
    }
}
