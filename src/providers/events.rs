use serde_json::Value;
use std::sync::Arc;
use url::Url;

use super::ProviderKind;
use super::fetch::{build_client, get_json};
use crate::config::UpstreamResolvedConfig;
use crate::error::ScoutError;

const EVENT_SEARCH_PATH: &str = "/v3/events/search/";

/// Event search around a coordinate pair.
#[derive(Clone)]
pub struct EventsClient {
    http: reqwest::Client,
    cfg: Arc<UpstreamResolvedConfig>,
}

impl EventsClient {
    pub fn new(cfg: Arc<UpstreamResolvedConfig>) -> Result<Self, ScoutError> {
        let http = build_client(ProviderKind::Events, &cfg)?;
        Ok(Self { http, cfg })
    }

    pub(crate) fn request_url(&self, latitude: f64, longitude: f64) -> Url {
        let mut url = self.cfg.api_url.clone();
        url.set_path(EVENT_SEARCH_PATH);
        url.query_pairs_mut()
            .clear()
            .append_pair("location.longitude", &longitude.to_string())
            .append_pair("location.latitude", &latitude.to_string())
            .append_pair("expand", "venue")
            .append_pair("token", &self.cfg.api_key);
        url
    }

    pub async fn search(&self, latitude: f64, longitude: f64) -> Result<Value, ScoutError> {
        get_json(
            ProviderKind::Events,
            &self.http,
            self.request_url(latitude, longitude),
        )
        .await
    }
}
