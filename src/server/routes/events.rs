use axum::{Json, extract::State};
use tracing::debug;

use super::respond::EventBody;
use crate::error::ScoutError;
use crate::server::extract::LocationParam;
use crate::server::router::ScoutState;

pub(super) async fn events_handler(
    State(state): State<ScoutState>,
    LocationParam(location): LocationParam,
) -> Result<Json<Vec<EventBody>>, ScoutError> {
    let resolved = state.resolver.resolve_events(&location).await?;
    debug!(
        location_id = location.id,
        rows = resolved.rows.len(),
        source = ?resolved.source,
        "Events resolved"
    );
    Ok(Json(resolved.rows.into_iter().map(EventBody::from).collect()))
}
