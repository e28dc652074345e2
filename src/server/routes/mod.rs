use axum::{Router, routing::get};

use super::router::ScoutState;

mod events;
mod location;
mod respond;
mod weather;

pub fn router() -> Router<ScoutState> {
    Router::new()
        .route("/location", get(location::location_handler))
        .route("/weather", get(weather::weather_handler))
        .route("/events", get(events::events_handler))
}
