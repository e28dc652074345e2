mod basic;
mod cache;
mod providers;

pub use basic::BasicConfig;
pub use cache::CacheConfig;
pub use providers::{ProviderDefaults, ProvidersConfig, UpstreamConfig, UpstreamResolvedConfig};

use crate::error::ScoutError;
use crate::providers::ProviderKind;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Core server configuration (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Cache freshness policy (see `cache` table in config.toml).
    #[serde(default)]
    pub cache: CacheConfig,

    /// Upstream provider settings (see `providers` table in config.toml).
    #[serde(default)]
    pub providers: ProvidersConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for nested overrides, e.g. `CITYSCOUT_CACHE__WEATHER_TTL_SECS=600`.
const ENV_PREFIX: &str = "CITYSCOUT_";

/// Flat variable names kept from the deployment `.env` files, mapped onto config paths.
const FLAT_ENV_KEYS: [(&str, &str); 6] = [
    ("PORT", "basic.listen_port"),
    ("DATABASE_URL", "basic.database_url"),
    ("LOGLEVEL", "basic.loglevel"),
    ("GEOCODE_API_KEY", "providers.geocode.api_key"),
    ("WEATHER_API_KEY", "providers.weather.api_key"),
    ("EVENTBRITE_API_KEY", "providers.events.api_key"),
];

impl Config {
    /// Builds a Figment that merges defaults, an optional config TOML file and the environment.
    ///
    /// Precedence (lowest first): defaults, `config.toml`, flat env names, `CITYSCOUT_*`.
    pub fn figment() -> Figment {
        let figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let figment = if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment.merge(Toml::file(DEFAULT_CONFIG_FILE))
        } else {
            figment
        };

        figment
            .merge(Env::raw().filter_map(|key| {
                FLAT_ENV_KEYS
                    .iter()
                    .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
                    .map(|(_, path)| (*path).into())
            }))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads the effective configuration.
    pub fn load() -> Result<Self, ScoutError> {
        Ok(Self::figment().extract()?)
    }

    pub fn geocode(&self) -> UpstreamResolvedConfig {
        self.providers
            .geocode
            .resolve(ProviderKind::Geocode, &self.providers.defaults)
    }

    pub fn weather(&self) -> UpstreamResolvedConfig {
        self.providers
            .weather
            .resolve(ProviderKind::Weather, &self.providers.defaults)
    }

    pub fn events(&self) -> UpstreamResolvedConfig {
        self.providers
            .events
            .resolve(ProviderKind::Events, &self.providers.defaults)
    }
}
