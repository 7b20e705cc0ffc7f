use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Catalog API key, sent as the `api_key` query parameter on every request
    pub catalog_api_key: String,

    /// Base URL for list/browse endpoints
    #[serde(default = "default_primary_api_url")]
    pub primary_api_url: String,

    /// Base URL for single-item detail endpoints (also the fallback target)
    #[serde(default = "default_detail_api_url")]
    pub detail_api_url: String,

    /// Language code applied to every request
    #[serde(default = "default_language")]
    pub language: String,

    /// Time-to-live for cached responses, in seconds
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,

    /// Directory holding the persisted library blobs
    #[serde(default = "default_library_dir")]
    pub library_dir: String,
}

fn default_primary_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_detail_api_url() -> String {
    "https://api.tmdb.org/3".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_cache_ttl_secs() -> u64 {
    600
}

fn default_library_dir() -> String {
    "./library".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
