use serde_json::Value;
use std::sync::Arc;
use url::Url;

use super::ProviderKind;
use super::fetch::{build_client, get_json};
use crate::config::UpstreamResolvedConfig;
use crate::error::ScoutError;

const GEOCODE_PATH: &str = "/maps/api/geocode/json";

/// Forward geocoding: free text -> formatted address and coordinates.
#[derive(Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    cfg: Arc<UpstreamResolvedConfig>,
}

impl GeocodeClient {
    pub fn new(cfg: Arc<UpstreamResolvedConfig>) -> Result<Self, ScoutError> {
        let http = build_client(ProviderKind::Geocode, &cfg)?;
        Ok(Self { http, cfg })
    }

    pub(crate) fn request_url(&self, address: &str) -> Url {
        let mut url = self.cfg.api_url.clone();
        url.set_path(GEOCODE_PATH);
        url.query_pairs_mut()
            .clear()
            .append_pair("address", address)
            .append_pair("key", &self.cfg.api_key);
        url
    }

    pub async fn geocode(&self, address: &str) -> Result<Value, ScoutError> {
        get_json(ProviderKind::Geocode, &self.http, self.request_url(address)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn client() -> GeocodeClient {
        GeocodeClient::new(Arc::new(UpstreamResolvedConfig {
            api_key: "geo-key".to_string(),
            api_url: Url::parse("http://example.test").expect("invalid url"),
            proxy: None,
            timeout: Duration::from_secs(1),
        }))
        .expect("client builds")
    }

    #[test]
    fn request_url_encodes_address_and_key() {
        let url = client().request_url("Seattle, WA");

        assert_eq!(url.path(), GEOCODE_PATH);
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("address".to_string(), "Seattle, WA".to_string()),
                ("key".to_string(), "geo-key".to_string()),
            ]
        );
    }
}
