use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{CITYSCOUT_USER_AGENT, ProviderKind, UPSTREAM_BODY_PREVIEW_CHARS};
use crate::config::UpstreamResolvedConfig;
use crate::error::ScoutError;
use crate::utils::logging::with_pretty_json_debug;

/// reqwest errors embed the request URL, which carries the API key.
fn unavailable(provider: ProviderKind, source: reqwest::Error) -> ScoutError {
    ScoutError::ProviderUnavailable {
        provider,
        source: source.without_url(),
    }
}

/// Build the HTTP client for one provider. The timeout bounds the whole request.
pub(crate) fn build_client(
    provider: ProviderKind,
    cfg: &UpstreamResolvedConfig,
) -> Result<reqwest::Client, ScoutError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let mut builder = reqwest::Client::builder()
        .user_agent(CITYSCOUT_USER_AGENT)
        .default_headers(headers)
        .connect_timeout(cfg.timeout)
        .timeout(cfg.timeout);

    if let Some(proxy_url) = cfg.proxy.as_ref() {
        let proxy = reqwest::Proxy::all(proxy_url.as_str())
            .map_err(|source| unavailable(provider, source))?;
        builder = builder.proxy(proxy);
    }

    builder
        .build()
        .map_err(|source| unavailable(provider, source))
}

/// Issue exactly one GET and return the parsed JSON body.
///
/// The URL carries the API key, so only the host is ever logged.
pub(crate) async fn get_json(
    provider: ProviderKind,
    client: &reqwest::Client,
    url: Url,
) -> Result<Value, ScoutError> {
    let host = url.host_str().unwrap_or("-").to_string();

    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|source| unavailable(provider, source))?;

    let status = resp.status();
    if !status.is_success() {
        let body_preview = match resp.bytes().await {
            Ok(bytes) => {
                let raw_body = String::from_utf8_lossy(&bytes);
                format!("{:.len$}", raw_body, len = UPSTREAM_BODY_PREVIEW_CHARS)
            }
            Err(e) => format!("<failed to read body: {}>", e.without_url()),
        };

        debug!(
            provider = %provider,
            %status,
            host = %host,
            body = %body_preview,
            "[{provider}] Upstream error status"
        );
        return Err(ScoutError::ProviderError { provider, status });
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|source| unavailable(provider, source))?;

    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| ScoutError::malformed(provider, format!("body is not JSON: {e}")))?;

    with_pretty_json_debug(&value, |pretty_body| {
        debug!(
            provider = %provider,
            host = %host,
            body = %pretty_body,
            "[{provider}] Upstream payload"
        );
    });

    Ok(value)
}
