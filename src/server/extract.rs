use axum::{extract::FromRequestParts, http::request::Parts};
use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::error::ScoutError;
use crate::resolver::LocationRef;

const DATA_PARAM: &str = "data";

/// `?data=<text>` for location search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchText(pub String);

/// `?data=` carrying a previously returned location, as JSON text or as
/// `data[id]=..&data[latitude]=..&data[longitude]=..`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationParam(pub LocationRef);

fn query_pairs(parts: &Parts) -> Vec<(String, String)> {
    parts
        .uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}

fn missing_data() -> ScoutError {
    ScoutError::InvalidRequest("missing `data` query parameter".to_string())
}

impl<S> FromRequestParts<S> for SearchText
where
    S: Send + Sync,
{
    type Rejection = ScoutError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let text = query_pairs(parts)
            .into_iter()
            .find_map(|(k, v)| (k == DATA_PARAM).then_some(v))
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(missing_data)?;
        Ok(SearchText(text))
    }
}

impl<S> FromRequestParts<S> for LocationParam
where
    S: Send + Sync,
{
    type Rejection = ScoutError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = data_value(query_pairs(parts))?;
        let location: LocationRef = serde_json::from_value(value).map_err(|e| {
            debug!(error = %e, "Unusable location in `data`");
            ScoutError::InvalidRequest(format!("`data` is not a location: {e}"))
        })?;
        Ok(LocationParam(location))
    }
}

/// Collect `data` into one JSON value. A plain `data` wins over bracketed members.
fn data_value(pairs: Vec<(String, String)>) -> Result<Value, ScoutError> {
    let mut members = Map::new();

    for (key, raw) in pairs {
        if key == DATA_PARAM {
            return serde_json::from_str(&raw).map_err(|e| {
                ScoutError::InvalidRequest(format!("`data` is not valid JSON: {e}"))
            });
        }

        let Some(field) = key
            .strip_prefix("data[")
            .and_then(|rest| rest.strip_suffix(']'))
        else {
            continue;
        };
        members.insert(field.to_string(), scalar(raw));
    }

    if members.is_empty() {
        return Err(missing_data());
    }
    Ok(Value::Object(members))
}

/// Bracketed members arrive as text; numbers are restored so they deserialize as numbers.
fn scalar(raw: String) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::Number(n.into());
    }
    match raw.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn location_from(uri: &str) -> Result<LocationParam, ScoutError> {
        let (mut parts, ()) = Request::builder()
            .uri(uri)
            .body(())
            .expect("failed to build request")
            .into_parts();
        LocationParam::from_request_parts(&mut parts, &()).await
    }

    async fn search_from(uri: &str) -> Result<SearchText, ScoutError> {
        let (mut parts, ()) = Request::builder()
            .uri(uri)
            .body(())
            .expect("failed to build request")
            .into_parts();
        SearchText::from_request_parts(&mut parts, &()).await
    }

    const SEATTLE: LocationRef = LocationRef {
        id: 7,
        latitude: 47.6062095,
        longitude: -122.3320708,
    };

    #[tokio::test]
    async fn json_data_is_parsed() {
        let uri = "/weather?data=%7B%22id%22%3A7%2C%22search_query%22%3A%22seattle%22%2C\
                   %22latitude%22%3A47.6062095%2C%22longitude%22%3A-122.3320708%7D";
        let LocationParam(location) = location_from(uri).await.expect("json data");
        assert_eq!(location, SEATTLE);
    }

    #[tokio::test]
    async fn bracketed_data_is_parsed() {
        let uri = "/events?data%5Bid%5D=7&data%5Bsearch_query%5D=seattle\
                   &data%5Blatitude%5D=47.6062095&data%5Blongitude%5D=-122.3320708";
        let LocationParam(location) = location_from(uri).await.expect("bracketed data");
        assert_eq!(location, SEATTLE);
    }

    #[tokio::test]
    async fn missing_or_broken_data_is_rejected() {
        for uri in [
            "/weather",
            "/weather?other=1",
            "/weather?data=not-json",
            "/weather?data%5Bid%5D=7",
        ] {
            let err = location_from(uri).await.unwrap_err();
            assert!(matches!(err, ScoutError::InvalidRequest(_)), "{uri}: {err}");
        }
    }

    #[tokio::test]
    async fn search_text_is_decoded() {
        let SearchText(text) = search_from("/location?data=Seattle%2C+WA")
            .await
            .expect("search text");
        assert_eq!(text, "Seattle, WA");

        assert!(search_from("/location?data=").await.is_err());
        assert!(search_from("/location").await.is_err());
    }
}
