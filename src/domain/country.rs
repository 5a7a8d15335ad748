use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Cache key of the global country list. There is only ever one.
pub const COUNTRIES_CACHE_KEY: &str = "countries";

/// A country as returned by the reference API. `name` is the identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso3: Option<String>,
}

impl CountryRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            iso2: None,
            iso3: None,
        }
    }
}

/// Trim names, drop blank ones and keep only the first record per name.
/// Upstream order is otherwise preserved.
pub fn normalize_countries(records: Vec<CountryRecord>) -> Vec<CountryRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter_map(|mut record| {
            let trimmed = record.name.trim();
            if trimmed.is_empty() {
                return None;
            }
            if trimmed.len() != record.name.len() {
                record.name = trimmed.to_string();
            }
            seen.insert(record.name.clone()).then_some(record)
        })
        .collect()
}

/// Same treatment as [`normalize_countries`] for a city list.
pub fn normalize_cities(cities: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    cities
        .into_iter()
        .filter_map(|city| {
            let trimmed = city.trim();
            if trimmed.is_empty() {
                return None;
            }
            let city = trimmed.to_string();
            seen.insert(city.clone()).then_some(city)
        })
        .collect()
}

/// Case-insensitive cache key for a country's city list.
/// `None` for a blank country name.
pub fn city_cache_key(country_name: &str) -> Option<String> {
    let trimmed = country_name.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("cities:{}", trimmed.to_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_countries_trims_and_dedupes() {
        let records = vec![
            CountryRecord::named(" France "),
            CountryRecord::named("Germany"),
            CountryRecord::named("France"),
            CountryRecord::named("   "),
        ];
        let names: Vec<_> = normalize_countries(records)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["France", "Germany"]);
    }

    #[test]
    fn normalize_countries_keeps_first_iso_codes() {
        let records = vec![
            CountryRecord {
                name: "France".into(),
                iso2: Some("FR".into()),
                iso3: Some("FRA".into()),
            },
            CountryRecord::named("France"),
        ];
        let out = normalize_countries(records);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].iso2.as_deref(), Some("FR"));
    }

    #[test]
    fn normalize_countries_is_case_sensitive() {
        let records = vec![CountryRecord::named("Niger"), CountryRecord::named("NIGER")];
        assert_eq!(normalize_countries(records).len(), 2);
    }

    #[test]
    fn normalize_cities_preserves_order() {
        let cities = vec![
            "Paris".to_string(),
            "Lyon".to_string(),
            "Paris".to_string(),
            String::new(),
            " Nice".to_string(),
        ];
        assert_eq!(normalize_cities(cities), vec!["Paris", "Lyon", "Nice"]);
    }

    #[test]
    fn city_cache_key_is_case_insensitive() {
        assert_eq!(city_cache_key("France"), city_cache_key("fRANCE"));
        assert_eq!(city_cache_key(" france ").as_deref(), Some("cities:FRANCE"));
    }

    #[test]
    fn city_cache_key_blank_is_none() {
        assert!(city_cache_key("").is_none());
        assert!(city_cache_key("  \t").is_none());
    }

    #[test]
    fn city_cache_key_never_collides_with_country_list() {
        assert_ne!(
            city_cache_key("countries").as_deref(),
            Some(COUNTRIES_CACHE_KEY)
        );
    }
}
