use axum::{Json, extract::State};
use tracing::debug;

use crate::db::LocationRow;
use crate::error::ScoutError;
use crate::server::extract::SearchText;
use crate::server::router::ScoutState;

pub(super) async fn location_handler(
    State(state): State<ScoutState>,
    SearchText(text): SearchText,
) -> Result<Json<LocationRow>, ScoutError> {
    let resolved = state.resolver.resolve_location(&text).await?;
    debug!(
        id = resolved.rows.id,
        source = ?resolved.source,
        "Location resolved"
    );
    Ok(Json(resolved.rows))
}
