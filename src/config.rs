use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from `BOOKTRACK_`-prefixed environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base URL of the remote book catalog API
    #[serde(default = "default_catalog_api_url")]
    pub catalog_api_url: String,

    /// Directory holding the persisted local collections
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Page size requested from the catalog
    #[serde(default = "default_items_per_page")]
    pub items_per_page: u32,
}

fn default_catalog_api_url() -> String {
    "https://bukuacak-9bdcb4ef2605.herokuapp.com/api/v1".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".booktrack")
}

fn default_items_per_page() -> u32 {
    15
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_api_url: default_catalog_api_url(),
            data_dir: default_data_dir(),
            items_per_page: default_items_per_page(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::prefixed("BOOKTRACK_")
            .from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.catalog_api_url.ends_with("/api/v1"));
        assert_eq!(config.data_dir, PathBuf::from(".booktrack"));
        assert_eq!(config.items_per_page, 15);
    }
}
