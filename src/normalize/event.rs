use cityscout_schema::{EventItem, EventSearchResponse};
use serde_json::Value;

use super::{DAY_FORMAT, parse};
use crate::db::NewEvent;
use crate::error::ScoutError;
use crate::providers::ProviderKind;

/// Normalize a single `events[]` item.
pub fn event(raw_item: &Value) -> Result<NewEvent, ScoutError> {
    let item: EventItem = parse(ProviderKind::Events, raw_item)?;
    Ok(event_record(item))
}

/// Normalize an event search response. An empty `events` array yields no records.
pub fn events(raw: &Value) -> Result<Vec<NewEvent>, ScoutError> {
    let resp: EventSearchResponse = parse(ProviderKind::Events, raw)?;
    Ok(resp.events.into_iter().map(event_record).collect())
}

fn event_record(item: EventItem) -> NewEvent {
    NewEvent {
        link: item.url,
        name: item.name.text,
        event_date: item.start.utc.format(DAY_FORMAT).to_string(),
        summary: item.summary,
    }
}
