use serde_json::json;
use tracing::error;

use super::lookup::LookupService;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Transport-neutral response envelope handed back to the host controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: String,
    pub content_type: &'static str,
}

impl ServiceResponse {
    pub fn ok(body: String) -> Self {
        Self {
            status: 200,
            body,
            content_type: JSON_CONTENT_TYPE,
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }).to_string(),
            content_type: JSON_CONTENT_TYPE,
        }
    }
}

/// Autocomplete endpoint: `200` with `{hits, count, total}` or `500` with
/// `{error}`. This is where lookup errors become status codes.
pub async fn country_search_response(
    service: &LookupService,
    query: Option<&str>,
) -> ServiceResponse {
    let query = query.unwrap_or_default();
    let outcome = service
        .search_countries(query)
        .await
        .and_then(|result| Ok(serde_json::to_string(&result)?));

    match outcome {
        Ok(body) => ServiceResponse::ok(body),
        Err(e) => {
            error!(query, error = %e, "Country search failed");
            ServiceResponse::error(500, &e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::adapters::cache::memory_cache::MemoryCache;
    use crate::config::types::CacheConfig;
    use crate::error::LookupError;
    use crate::ports::reference_api::ReferenceApi;
    use crate::reference::ReferenceDataClient;
    use crate::test_helpers::{MockReferenceApi, make_countries};

    fn service(api: &Arc<MockReferenceApi>) -> LookupService {
        LookupService::new(Arc::new(ReferenceDataClient::new(
            Arc::clone(api) as Arc<dyn ReferenceApi>,
            Arc::new(MemoryCache::new(1)),
            Arc::new(MemoryCache::new(4)),
            &CacheConfig::default(),
        )))
    }

    #[tokio::test]
    async fn success_body_is_lookup_json() {
        let api = Arc::new(
            MockReferenceApi::new().with_countries(|| Ok(make_countries(&["France", "Germany"]))),
        );
        let resp = country_search_response(&service(&api), Some("fra")).await;
        assert_eq!(resp.status, 200);
        assert_eq!(resp.content_type, "application/json");
        assert_eq!(
            resp.body,
            r#"{"hits":[{"id":"France","displayName":"France","description":" "}],"count":1,"total":1}"#
        );
    }

    #[tokio::test]
    async fn missing_query_means_all() {
        let api = Arc::new(
            MockReferenceApi::new().with_countries(|| Ok(make_countries(&["Chad", "Mali"]))),
        );
        let resp = country_search_response(&service(&api), None).await;
        let body: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(body["count"], 2);
        assert_eq!(body["total"], 2);
    }

    #[tokio::test]
    async fn upstream_error_becomes_500_and_is_retried() {
        let api = Arc::new(MockReferenceApi::new().with_countries(|| {
            Err(LookupError::upstream(
                "countriesnow API reported an error: maintenance",
            ))
        }));
        let svc = service(&api);

        let resp = country_search_response(&svc, Some("fra")).await;
        assert_eq!(resp.status, 500);
        assert_eq!(resp.content_type, "application/json");
        let body: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(
            body,
            json!({"error": "Upstream API error: countriesnow API reported an error: maintenance"})
        );

        country_search_response(&svc, Some("fra")).await;
        assert_eq!(api.country_calls(), 2);
    }

    #[test]
    fn error_body_escapes_message() {
        let resp = ServiceResponse::error(500, "bad \"quote\"");
        let body: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(body["error"], "bad \"quote\"");
    }
}
