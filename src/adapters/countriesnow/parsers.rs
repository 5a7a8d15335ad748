use serde_json::Value;

use crate::domain::country::CountryRecord;
use crate::error::{LookupError, Result};

/// Fail if the envelope carries an in-band error. The live API sends
/// `"error": false` next to the data on success, so only truthy values count.
pub fn check_envelope(json: &Value) -> Result<()> {
    let flagged = match json.get("error") {
        None | Some(Value::Null | Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64() != Some(0.0),
        Some(_) => true,
    };
    if !flagged {
        return Ok(());
    }

    let detail = json
        .get("msg")
        .and_then(Value::as_str)
        .or_else(|| json.get("error").and_then(Value::as_str))
        .unwrap_or("no details");

    Err(LookupError::Upstream {
        message: format!("countriesnow API reported an error: {detail}"),
        payload: Some(json.clone()),
    })
}

fn data_array<'a>(json: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    json.get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| LookupError::Upstream {
            message: format!("countriesnow {what}: response has no data array"),
            payload: Some(json.clone()),
        })
}

/// Parse the `/iso` response. Entries without a string `name` are skipped.
pub fn parse_countries_response(json: &Value) -> Result<Vec<CountryRecord>> {
    check_envelope(json)?;

    let records = data_array(json, "countries")?
        .iter()
        .filter_map(|item| {
            let name = item.get("name").and_then(Value::as_str)?;
            let code = |upper: &str, lower: &str| {
                item.get(upper)
                    .or_else(|| item.get(lower))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            };
            Some(CountryRecord {
                name: name.to_string(),
                iso2: code("Iso2", "iso2"),
                iso3: code("Iso3", "iso3"),
            })
        })
        .collect();

    Ok(records)
}

/// Parse the `/cities/q` response. Non-string entries are skipped.
pub fn parse_cities_response(json: &Value) -> Result<Vec<String>> {
    check_envelope(json)?;

    let cities = data_array(json, "cities")?
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();

    Ok(cities)
}
