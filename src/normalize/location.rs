use cityscout_schema::GeocodeResponse;
use serde_json::Value;

use super::parse;
use crate::db::NewLocation;
use crate::error::ScoutError;
use crate::providers::ProviderKind;

/// Build the location record for `search_text` from the first geocoder result.
pub fn location(search_text: &str, raw: &Value) -> Result<NewLocation, ScoutError> {
    let resp: GeocodeResponse = parse(ProviderKind::Geocode, raw)?;

    if resp.rejected() {
        return Err(ScoutError::malformed(
            ProviderKind::Geocode,
            format!(
                "geocoder status {}: {}",
                resp.status.as_deref().unwrap_or("-"),
                resp.error_message.as_deref().unwrap_or("no message")
            ),
        ));
    }

    let Some(first) = resp.results.into_iter().next() else {
        return Err(ScoutError::malformed(
            ProviderKind::Geocode,
            format!("no results for {search_text:?}"),
        ));
    };

    Ok(NewLocation {
        search_query: search_text.to_string(),
        formatted_query: first.formatted_address,
        latitude: first.geometry.location.lat,
        longitude: first.geometry.location.lng,
    })
}
