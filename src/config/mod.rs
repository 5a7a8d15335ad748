pub mod types;

use std::path::Path;

use crate::error::{LookupError, Result};
use types::Config;

pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        LookupError::Config(format!(
            "failed to read config file {}: {e}",
            path.display()
        ))
    })?;
    let config: Config = serde_yml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn load_config_missing_file_returns_defaults() {
        let result = load_config(Path::new("/tmp/nonexistent_country_lookup_12345.yaml"));
        assert!(result.is_ok());
        let config = result.unwrap();
        assert_eq!(config.cache.countries_ttl_secs, 3600);
    }

    #[test]
    fn load_config_valid_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            tmp,
            "api:\n  base_url: \"http://localhost:9000\"\n  request_timeout_secs: 5\ncache:\n  cities_max_entries: 16\nserver:\n  port: 3000"
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert_eq!(config.api.request_timeout_secs, 5);
        assert_eq!(config.cache.cities_max_entries, 16);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn load_config_partial_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "extensions:\n  application: \"org.acme.site\"").unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.extensions.application, "org.acme.site");
        assert_eq!(config.extensions.content_type, "Person");
        // cache should get defaults
        assert_eq!(config.cache.cities_ttl_secs, 3600);
        assert_eq!(config.cache.countries_max_entries, 1);
    }

    #[test]
    fn load_config_empty_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp).unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.cache.cities_max_entries, 256);
    }

    #[test]
    fn load_config_invalid_yaml() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "{{{{invalid yaml: [[[").unwrap();
        let result = load_config(tmp.path());
        assert!(result.is_err());
    }
}
