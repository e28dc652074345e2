pub mod events;
pub mod geocode;
pub mod weather;

mod bootstrap;
mod fetch;

pub use bootstrap::Providers;
pub use events::EventsClient;
pub use geocode::GeocodeClient;
pub use weather::WeatherClient;

use std::fmt;
use std::sync::LazyLock;
use url::Url;

pub const UPSTREAM_BODY_PREVIEW_CHARS: usize = 300;

pub(crate) const CITYSCOUT_USER_AGENT: &str = concat!("cityscout/", env!("CARGO_PKG_VERSION"));

static GEOCODE_API_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://maps.googleapis.com").expect("invalid fixed geocoding API URL")
});

static WEATHER_API_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://api.darksky.net").expect("invalid fixed forecast API URL")
});

static EVENTS_API_URL: LazyLock<Url> = LazyLock::new(|| {
    Url::parse("https://www.eventbriteapi.com").expect("invalid fixed event search API URL")
});

/// Third-party APIs consulted on a cache miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    Geocode,
    Weather,
    Events,
}

impl ProviderKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ProviderKind::Geocode => "geocode",
            ProviderKind::Weather => "weather",
            ProviderKind::Events => "events",
        }
    }

    /// Public endpoint used when `providers.<name>.api_url` is unset.
    pub fn default_api_url(self) -> &'static Url {
        match self {
            ProviderKind::Geocode => &GEOCODE_API_URL,
            ProviderKind::Weather => &WEATHER_API_URL,
            ProviderKind::Events => &EVENTS_API_URL,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
