mod upstream;

pub use upstream::{UpstreamConfig, UpstreamResolvedConfig};

use serde::{Deserialize, Serialize};
use url::Url;

/// Global provider defaults (used when provider-level config is unset).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderDefaults {
    /// Optional upstream HTTP proxy. If set, used for reqwest clients.
    /// TOML: `providers.defaults.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Per-request timeout for upstream calls, in seconds.
    /// TOML: `providers.defaults.timeout_secs`. Default: `5`.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderDefaults {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// All provider configurations.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProvidersConfig {
    /// Global defaults for providers (overridden per provider if set).
    #[serde(default)]
    pub defaults: ProviderDefaults,

    /// Geocoding provider (Google Geocoding API).
    #[serde(default)]
    pub geocode: UpstreamConfig,

    /// Daily forecast provider (Dark Sky compatible).
    #[serde(default)]
    pub weather: UpstreamConfig,

    /// Event search provider (Eventbrite).
    #[serde(default)]
    pub events: UpstreamConfig,
}

fn default_timeout_secs() -> u64 {
    5
}
