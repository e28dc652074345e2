use serde::Serialize;

use crate::db::{EventRow, WeatherRow};

/// Wire shape of one cached forecast day.
#[derive(Debug, Serialize)]
pub(super) struct WeatherBody {
    pub forecast: String,
    pub time: String,
    pub location_id: i64,
}

impl From<WeatherRow> for WeatherBody {
    fn from(row: WeatherRow) -> Self {
        Self {
            forecast: row.forecast,
            time: row.time,
            location_id: row.location_id,
        }
    }
}

/// Wire shape of one cached event.
#[derive(Debug, Serialize)]
pub(super) struct EventBody {
    pub link: String,
    pub name: String,
    pub event_date: String,
    pub summary: Option<String>,
    pub location_id: i64,
}

impl From<EventRow> for EventBody {
    fn from(row: EventRow) -> Self {
        Self {
            link: row.link,
            name: row.name,
            event_date: row.event_date,
            summary: row.summary,
            location_id: row.location_id,
        }
    }
}
