use serde::Serialize;
use std::fmt;

use crate::error::ScoutError;

/// The closed set of cached entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Location,
    WeatherDay,
    Event,
}

/// Value of an entity's designated lookup column.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupKey {
    /// `locations.search_query`
    SearchQuery(String),
    /// `weathers.location_id` / `events.location_id`
    LocationId(i64),
}

impl EntityKind {
    pub const fn table(self) -> &'static str {
        match self {
            EntityKind::Location => "locations",
            EntityKind::WeatherDay => "weathers",
            EntityKind::Event => "events",
        }
    }

    pub const fn key_column(self) -> &'static str {
        match self {
            EntityKind::Location => "search_query",
            EntityKind::WeatherDay | EntityKind::Event => "location_id",
        }
    }

    /// Rejects keys that do not address this kind's lookup column.
    pub(crate) fn check_key(self, key: &LookupKey) -> Result<(), ScoutError> {
        match (self, key) {
            (EntityKind::Location, LookupKey::SearchQuery(_))
            | (EntityKind::WeatherDay | EntityKind::Event, LookupKey::LocationId(_)) => Ok(()),
            _ => Err(ScoutError::InvalidRequest(format!(
                "{} is looked up by {}, got {key:?}",
                self.table(),
                self.key_column()
            ))),
        }
    }

    pub(crate) const fn select_sql(self) -> &'static str {
        match self {
            EntityKind::Location => {
                r#"
        SELECT id, search_query, formatted_query, latitude, longitude
        FROM locations
        WHERE search_query = ?
        ORDER BY id
        "#
            }
            EntityKind::WeatherDay => {
                r#"
        SELECT id, location_id, forecast, time, created_at
        FROM weathers
        WHERE location_id = ?
        ORDER BY id
        "#
            }
            EntityKind::Event => {
                r#"
        SELECT id, location_id, link, name, event_date, summary
        FROM events
        WHERE location_id = ?
        ORDER BY id
        "#
            }
        }
    }

    /// Column order here is the bind order used by the store.
    pub(crate) const fn insert_sql(self) -> &'static str {
        match self {
            // A racing insert for the same query returns the row that won.
            EntityKind::Location => {
                r#"
        INSERT INTO locations (search_query, formatted_query, latitude, longitude)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(search_query) DO UPDATE SET
            search_query = locations.search_query
        RETURNING id, search_query, formatted_query, latitude, longitude
        "#
            }
            EntityKind::WeatherDay => {
                r#"
        INSERT INTO weathers (location_id, forecast, time, created_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(location_id, time) DO UPDATE SET
            forecast = excluded.forecast,
            created_at = excluded.created_at
        RETURNING id, location_id, forecast, time, created_at
        "#
            }
            EntityKind::Event => {
                r#"
        INSERT INTO events (location_id, link, name, event_date, summary)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(location_id, link) DO UPDATE SET
            name = excluded.name,
            event_date = excluded.event_date,
            summary = excluded.summary
        RETURNING id, location_id, link, name, event_date, summary
        "#
            }
        }
    }

    /// Locations are never deleted by this service.
    pub(crate) fn delete_sql(self) -> Result<&'static str, ScoutError> {
        match self {
            EntityKind::WeatherDay => Ok("DELETE FROM weathers WHERE location_id = ?"),
            EntityKind::Event => Ok("DELETE FROM events WHERE location_id = ?"),
            EntityKind::Location => Err(ScoutError::InvalidRequest(
                "locations cannot be deleted by owner".to_string(),
            )),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::SearchQuery(q) => write!(f, "search_query={q:?}"),
            LookupKey::LocationId(id) => write!(f, "location_id={id}"),
        }
    }
}
