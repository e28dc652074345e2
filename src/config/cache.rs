use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache freshness policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Age after which cached weather rows for a location are evicted and re-fetched.
    /// TOML: `cache.weather_ttl_secs`. Default: `21600` (6 hours).
    #[serde(default = "default_weather_ttl_secs")]
    pub weather_ttl_secs: u64,
}

impl CacheConfig {
    pub fn weather_ttl(&self) -> Duration {
        Duration::from_secs(self.weather_ttl_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            weather_ttl_secs: default_weather_ttl_secs(),
        }
    }
}

fn default_weather_ttl_secs() -> u64 {
    6 * 60 * 60
}
