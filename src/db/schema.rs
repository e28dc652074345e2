//! SQL DDL for initializing the database schema.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema includes:
/// - `locations` table (one row per distinct search query)
/// - `weathers` table (one row per forecast day, per location)
/// - `events` table (one row per event link, per location)
pub const SQLITE_INIT: &str = r#"
-- ---------------------------------------------------------------------------
-- Geocoded locations
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS locations (
    id INTEGER PRIMARY KEY NOT NULL,
    search_query TEXT NOT NULL UNIQUE,
    formatted_query TEXT NOT NULL,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL
);

-- ---------------------------------------------------------------------------
-- Daily forecasts (batch per fetch, evicted when stale)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS weathers (
    id INTEGER PRIMARY KEY NOT NULL,
    location_id INTEGER NOT NULL REFERENCES locations(id),
    forecast TEXT NOT NULL,
    time TEXT NOT NULL,
    created_at TEXT NOT NULL, -- RFC3339
    UNIQUE(location_id, time)
);

-- ---------------------------------------------------------------------------
-- Nearby events (batch per location, never expired)
-- ---------------------------------------------------------------------------
CREATE TABLE IF NOT EXISTS events (
    id INTEGER PRIMARY KEY NOT NULL,
    location_id INTEGER NOT NULL REFERENCES locations(id),
    link TEXT NOT NULL,
    name TEXT NOT NULL,
    event_date TEXT NOT NULL,
    summary TEXT NULL,
    UNIQUE(location_id, link)
);
"#;
