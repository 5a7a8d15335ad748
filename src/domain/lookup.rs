use serde::{Deserialize, Serialize};

use super::country::CountryRecord;

/// Description sent with every hit. Consumers expect a single space here,
/// not an empty string.
pub const HIT_DESCRIPTION: &str = " ";

/// One display-ready autocomplete entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupHit {
    pub id: String,
    pub display_name: String,
    pub description: String,
}

impl LookupHit {
    fn for_country(name: &str) -> Self {
        Self {
            id: name.to_string(),
            display_name: name.to_string(),
            description: HIT_DESCRIPTION.to_string(),
        }
    }
}

/// Autocomplete payload. `total` mirrors `count`: no pre-filter total is
/// computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupResult {
    pub hits: Vec<LookupHit>,
    pub count: usize,
    pub total: usize,
}

impl LookupResult {
    pub fn from_hits(hits: Vec<LookupHit>) -> Self {
        let count = hits.len();
        Self {
            hits,
            count,
            total: count,
        }
    }
}

/// Payload of the `countryDetails` field on a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryDetails {
    pub country: String,
    pub cities: Vec<String>,
}

/// Keep countries whose lowercased name contains the lowercased fragment.
/// An empty fragment keeps everything.
pub fn filter_countries(countries: &[CountryRecord], fragment: &str) -> LookupResult {
    let needle = fragment.to_lowercase();
    let hits = countries
        .iter()
        .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
        .map(|c| LookupHit::for_country(&c.name))
        .collect();
    LookupResult::from_hits(hits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn countries(names: &[&str]) -> Vec<CountryRecord> {
        names.iter().map(|n| CountryRecord::named(*n)).collect()
    }

    #[test]
    fn filter_matches_substring_case_insensitively() {
        let result = filter_countries(&countries(&["France", "Germany"]), "fra");
        assert_eq!(
            result,
            LookupResult {
                hits: vec![LookupHit {
                    id: "France".into(),
                    display_name: "France".into(),
                    description: " ".into(),
                }],
                count: 1,
                total: 1,
            }
        );
    }

    #[test]
    fn filter_uppercase_fragment() {
        let result = filter_countries(&countries(&["France", "Germany"]), "GER");
        assert_eq!(result.count, 1);
        assert_eq!(result.hits[0].id, "Germany");
    }

    #[test]
    fn empty_fragment_keeps_all_in_order() {
        let result = filter_countries(&countries(&["Chad", "Albania", "Peru"]), "");
        let ids: Vec<_> = result.hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["Chad", "Albania", "Peru"]);
        assert_eq!(result.count, 3);
        assert_eq!(result.total, 3);
    }

    #[test]
    fn whitespace_fragment_is_a_real_filter() {
        let result = filter_countries(&countries(&["Costa Rica", "Peru"]), " ");
        assert_eq!(result.count, 1);
        assert_eq!(result.hits[0].id, "Costa Rica");
    }

    #[test]
    fn no_match_yields_empty_result() {
        let result = filter_countries(&countries(&["France"]), "xyz");
        assert!(result.hits.is_empty());
        assert_eq!(result.count, 0);
        assert_eq!(result.total, 0);
    }

    #[test]
    fn hit_serializes_with_camel_case() {
        let json = serde_json::to_value(LookupHit::for_country("Chile")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "Chile", "displayName": "Chile", "description": " "})
        );
    }
}
