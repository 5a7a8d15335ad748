use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub extensions: ExtensionsConfig,
}

/// Upstream reference API (countriesnow.space by default).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Each dataset gets its own cache so the per-country store can be sized
/// independently of the singleton country list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl")]
    pub countries_ttl_secs: u64,
    #[serde(default = "default_countries_max_entries")]
    pub countries_max_entries: usize,
    #[serde(default = "default_ttl")]
    pub cities_ttl_secs: u64,
    #[serde(default = "default_cities_max_entries")]
    pub cities_max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            countries_ttl_secs: default_ttl(),
            countries_max_entries: default_countries_max_entries(),
            cities_ttl_secs: default_ttl(),
            cities_max_entries: default_cities_max_entries(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Which host content type receives the `countryDetails` field.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtensionsConfig {
    #[serde(default = "default_application")]
    pub application: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            application: default_application(),
            content_type: default_content_type(),
        }
    }
}

fn default_base_url() -> String {
    "https://countriesnow.space/api/v0.1/countries".into()
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("country-lookup/", env!("CARGO_PKG_VERSION")).into()
}

fn default_ttl() -> u64 {
    3600 // 1 hour
}

fn default_countries_max_entries() -> usize {
    1
}

fn default_cities_max_entries() -> usize {
    256
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    8080
}

fn default_application() -> String {
    "com.example.myproject".into()
}

fn default_content_type() -> String {
    "Person".into()
}
