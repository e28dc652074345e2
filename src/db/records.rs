//! Normalized records produced from provider payloads, not yet persisted.
//!
//! Records carry no identity: the store assigns `id`, and for weather/event batches
//! the owning `location_id` travels on the [`NewRecords`] envelope.

use serde::{Deserialize, Serialize};

use super::kind::EntityKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWeatherDay {
    pub forecast: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub link: String,
    pub name: String,
    pub event_date: String,
    pub summary: Option<String>,
}

/// One fetch worth of child rows for a single location; persisted atomically.
#[derive(Debug, Clone, PartialEq)]
pub enum NewRecords {
    WeatherDays {
        location_id: i64,
        days: Vec<NewWeatherDay>,
    },
    Events {
        location_id: i64,
        events: Vec<NewEvent>,
    },
}

impl NewRecords {
    pub fn kind(&self) -> EntityKind {
        match self {
            NewRecords::WeatherDays { .. } => EntityKind::WeatherDay,
            NewRecords::Events { .. } => EntityKind::Event,
        }
    }

    pub fn location_id(&self) -> i64 {
        match self {
            NewRecords::WeatherDays { location_id, .. } | NewRecords::Events { location_id, .. } => {
                *location_id
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NewRecords::WeatherDays { days, .. } => days.len(),
            NewRecords::Events { events, .. } => events.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
