use crate::config::{Config, UpstreamResolvedConfig};
use crate::error::ScoutError;
use crate::providers::{EventsClient, GeocodeClient, ProviderKind, WeatherClient};
use std::sync::Arc;
use tracing::{info, warn};

/// Aggregates the clients for every upstream provider.
///
/// Keep this as a simple struct (vs. a dynamic registry): the set of providers is closed.
#[derive(Clone)]
pub struct Providers {
    pub geocode: GeocodeClient,
    pub weather: WeatherClient,
    pub events: EventsClient,
}

impl Providers {
    pub fn new(cfg: &Config) -> Result<Self, ScoutError> {
        let provider_defaults = &cfg.providers.defaults;
        let geocode_cfg = Arc::new(cfg.geocode());
        let weather_cfg = Arc::new(cfg.weather());
        let events_cfg = Arc::new(cfg.events());

        // Log resolved provider configs here so `main` stays wiring-only.
        info!(
            providers_defaults_proxy = %provider_defaults.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
            providers_defaults_timeout_secs = provider_defaults.timeout_secs,
            "Provider defaults loaded"
        );
        for (kind, resolved) in [
            (ProviderKind::Geocode, &geocode_cfg),
            (ProviderKind::Weather, &weather_cfg),
            (ProviderKind::Events, &events_cfg),
        ] {
            log_effective(kind, resolved);
        }

        Ok(Self {
            geocode: GeocodeClient::new(geocode_cfg)?,
            weather: WeatherClient::new(weather_cfg)?,
            events: EventsClient::new(events_cfg)?,
        })
    }
}

fn log_effective(kind: ProviderKind, cfg: &UpstreamResolvedConfig) {
    info!(
        provider = %kind,
        api_url = %cfg.api_url.as_str(),
        proxy = %cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        timeout_ms = cfg.timeout.as_millis() as u64,
        api_key_set = !cfg.api_key.is_empty(),
        "[{kind}] provider config (effective)"
    );
    if cfg.api_key.trim().is_empty() {
        warn!(
            provider = %kind,
            "[{kind}] no API key configured; cache misses for this provider will fail upstream"
        );
    }
}
