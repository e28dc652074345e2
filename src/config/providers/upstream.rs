use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::ProviderDefaults;
use crate::providers::ProviderKind;

/// Settings for one upstream provider managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// API key (or token) sent with every request.
    /// TOML: `providers.<name>.api_key`. Env: `GEOCODE_API_KEY`, `WEATHER_API_KEY`, `EVENTBRITE_API_KEY`.
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the provider API. Falls back to the public endpoint when unset.
    /// TOML: `providers.<name>.api_url`.
    #[serde(default)]
    pub api_url: Option<Url>,

    /// Optional upstream HTTP proxy.
    /// Falls back to `providers.defaults.proxy` when unset.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Per-request timeout in seconds.
    /// Falls back to `providers.defaults.timeout_secs`.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct UpstreamResolvedConfig {
    pub api_key: String,
    pub api_url: Url,
    pub proxy: Option<Url>,
    pub timeout: Duration,
}

impl UpstreamConfig {
    pub fn resolve(&self, kind: ProviderKind, defaults: &ProviderDefaults) -> UpstreamResolvedConfig {
        UpstreamResolvedConfig {
            api_key: self.api_key.clone(),
            api_url: self
                .api_url
                .clone()
                .unwrap_or_else(|| kind.default_api_url().clone()),
            proxy: self.proxy.clone().or_else(|| defaults.proxy.clone()),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(defaults.timeout_secs)),
        }
    }
}
