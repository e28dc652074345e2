use axum::{Json, extract::State};
use tracing::debug;

use super::respond::WeatherBody;
use crate::error::ScoutError;
use crate::server::extract::LocationParam;
use crate::server::router::ScoutState;

pub(super) async fn weather_handler(
    State(state): State<ScoutState>,
    LocationParam(location): LocationParam,
) -> Result<Json<Vec<WeatherBody>>, ScoutError> {
    let resolved = state.resolver.resolve_weather(&location).await?;
    debug!(
        location_id = location.id,
        rows = resolved.rows.len(),
        source = ?resolved.source,
        "Weather resolved"
    );
    Ok(Json(
        resolved.rows.into_iter().map(WeatherBody::from).collect(),
    ))
}
