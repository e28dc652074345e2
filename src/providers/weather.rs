use serde_json::Value;
use std::sync::Arc;
use url::Url;

use super::ProviderKind;
use super::fetch::{build_client, get_json};
use crate::config::UpstreamResolvedConfig;
use crate::error::ScoutError;

/// Blocks we never read; excluding them keeps the payload to the daily forecast.
const EXCLUDED_BLOCKS: &str = "currently,minutely,hourly,alerts,flags";

/// Daily forecast for a coordinate pair.
#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    cfg: Arc<UpstreamResolvedConfig>,
}

impl WeatherClient {
    pub fn new(cfg: Arc<UpstreamResolvedConfig>) -> Result<Self, ScoutError> {
        let http = build_client(ProviderKind::Weather, &cfg)?;
        Ok(Self { http, cfg })
    }

    /// The key is a path segment for this provider, not a query parameter.
    pub(crate) fn request_url(&self, latitude: f64, longitude: f64) -> Url {
        let mut url = self.cfg.api_url.clone();
        url.set_path(&format!(
            "/forecast/{}/{latitude},{longitude}",
            self.cfg.api_key
        ));
        url.query_pairs_mut()
            .clear()
            .append_pair("exclude", EXCLUDED_BLOCKS);
        url
    }

    pub async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Value, ScoutError> {
        get_json(
            ProviderKind::Weather,
            &self.http,
            self.request_url(latitude, longitude),
        )
        .await
    }
}
