use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::kind::EntityKind;
use crate::error::ScoutError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct LocationRow {
    pub id: i64,
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct WeatherRow {
    pub id: i64,
    pub location_id: i64,
    pub forecast: String,
    /// Calendar day, e.g. `Mon Jan 01 2024`.
    pub time: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub location_id: i64,
    pub link: String,
    pub name: String,
    pub event_date: String,
    pub summary: Option<String>,
}

/// Rows returned by a store lookup or insert, tagged by entity kind.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedRows {
    Locations(Vec<LocationRow>),
    WeatherDays(Vec<WeatherRow>),
    Events(Vec<EventRow>),
}

impl CachedRows {
    pub fn kind(&self) -> EntityKind {
        match self {
            CachedRows::Locations(_) => EntityKind::Location,
            CachedRows::WeatherDays(_) => EntityKind::WeatherDay,
            CachedRows::Events(_) => EntityKind::Event,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            CachedRows::Locations(rows) => rows.len(),
            CachedRows::WeatherDays(rows) => rows.len(),
            CachedRows::Events(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_locations(self) -> Result<Vec<LocationRow>, ScoutError> {
        match self {
            CachedRows::Locations(rows) => Ok(rows),
            other => Err(kind_mismatch(EntityKind::Location, other.kind())),
        }
    }

    pub fn into_weather_days(self) -> Result<Vec<WeatherRow>, ScoutError> {
        match self {
            CachedRows::WeatherDays(rows) => Ok(rows),
            other => Err(kind_mismatch(EntityKind::WeatherDay, other.kind())),
        }
    }

    pub fn into_events(self) -> Result<Vec<EventRow>, ScoutError> {
        match self {
            CachedRows::Events(rows) => Ok(rows),
            other => Err(kind_mismatch(EntityKind::Event, other.kind())),
        }
    }
}

fn kind_mismatch(expected: EntityKind, got: EntityKind) -> ScoutError {
    ScoutError::UnexpectedError(format!("expected {expected} rows, store returned {got}"))
}
