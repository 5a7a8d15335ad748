#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(text) {
            if let Ok(countries) =
                country_lookup::adapters::countriesnow::parsers::parse_countries_response(&json)
            {
                let _ = country_lookup::domain::country::normalize_countries(countries);
            }
        }
    }
});
