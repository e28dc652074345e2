//! Lookup-or-fetch orchestration.
//!
//! Per request: `Checking -> {Hit, Missing}`, `Missing -> Fetching -> Normalizing ->
//! Persisting -> Done`, and any state may end in `Failed`. Provider and store errors are
//! surfaced unchanged; nothing is retried except the re-fetch of stale weather. Stale
//! weather is evicted when the refreshed batch is persisted, not before the fetch.

mod freshness;

use chrono::Utc;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::db::{
    CachedRows, DbActorHandle, EntityKind, EventRow, LocationRow, NewRecords, WeatherRow,
};
use crate::error::ScoutError;
use crate::normalize;
use crate::providers::Providers;

/// Where the returned rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
    /// Served from the store; no provider call.
    Hit,
    /// Nothing was cached; fetched and persisted.
    Fetched,
    /// Cached rows were stale; fetched again and swapped in.
    Refreshed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveState {
    Checking,
    Hit,
    Missing,
    Fetching,
    Normalizing,
    Persisting,
    Done,
    Failed,
}

impl ResolveState {
    pub const fn as_str(self) -> &'static str {
        match self {
            ResolveState::Checking => "checking",
            ResolveState::Hit => "hit",
            ResolveState::Missing => "missing",
            ResolveState::Fetching => "fetching",
            ResolveState::Normalizing => "normalizing",
            ResolveState::Persisting => "persisting",
            ResolveState::Done => "done",
            ResolveState::Failed => "failed",
        }
    }
}

impl fmt::Display for ResolveState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A location as the client echoes it back when asking for weather or events.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LocationRef {
    pub id: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&LocationRow> for LocationRef {
    fn from(row: &LocationRow) -> Self {
        Self {
            id: row.id,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

/// Lookup key plus whatever the provider needs on a miss.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupRequest {
    /// Free-text location search.
    Search(String),
    /// Child rows of an existing location.
    Near(LocationRef),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<T> {
    pub rows: T,
    pub source: CacheSource,
}

impl<T> Resolved<T> {
    fn new(rows: T, source: CacheSource) -> Self {
        Self { rows, source }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            rows: f(self.rows),
            source: self.source,
        }
    }
}

#[derive(Clone)]
pub struct Resolver {
    db: DbActorHandle,
    providers: Providers,
    weather_ttl: Duration,
}

fn transition(kind: EntityKind, key: &dyn fmt::Display, state: ResolveState) {
    debug!(kind = %kind, key = %key, state = %state, "resolve transition");
}

fn failed(kind: EntityKind, key: &dyn fmt::Display, error: &ScoutError) {
    warn!(
        kind = %kind,
        key = %key,
        state = %ResolveState::Failed,
        error = %error,
        "resolve failed"
    );
}

impl Resolver {
    pub fn new(db: DbActorHandle, providers: Providers, weather_ttl: Duration) -> Self {
        Self {
            db,
            providers,
            weather_ttl,
        }
    }

    /// Kind-tagged entry point; dispatches to the typed resolvers below.
    pub async fn resolve(
        &self,
        kind: EntityKind,
        request: LookupRequest,
    ) -> Result<Resolved<CachedRows>, ScoutError> {
        match (kind, request) {
            (EntityKind::Location, LookupRequest::Search(text)) => Ok(self
                .resolve_location(&text)
                .await?
                .map(|row| CachedRows::Locations(vec![row]))),
            (EntityKind::WeatherDay, LookupRequest::Near(location)) => Ok(self
                .resolve_weather(&location)
                .await?
                .map(CachedRows::WeatherDays)),
            (EntityKind::Event, LookupRequest::Near(location)) => Ok(self
                .resolve_events(&location)
                .await?
                .map(CachedRows::Events)),
            (kind, request) => Err(ScoutError::InvalidRequest(format!(
                "{kind} cannot be resolved from {request:?}"
            ))),
        }
    }

    pub async fn resolve_location(
        &self,
        search_text: &str,
    ) -> Result<Resolved<LocationRow>, ScoutError> {
        let key = format!("search_query={search_text:?}");
        self.location_flow(search_text, &key)
            .await
            .inspect_err(|e| failed(EntityKind::Location, &key, e))
    }

    pub async fn resolve_weather(
        &self,
        location: &LocationRef,
    ) -> Result<Resolved<Vec<WeatherRow>>, ScoutError> {
        let key = format!("location_id={}", location.id);
        self.weather_flow(location, &key)
            .await
            .inspect_err(|e| failed(EntityKind::WeatherDay, &key, e))
    }

    pub async fn resolve_events(
        &self,
        location: &LocationRef,
    ) -> Result<Resolved<Vec<EventRow>>, ScoutError> {
        let key = format!("location_id={}", location.id);
        self.events_flow(location, &key)
            .await
            .inspect_err(|e| failed(EntityKind::Event, &key, e))
    }

    async fn location_flow(
        &self,
        search_text: &str,
        key: &str,
    ) -> Result<Resolved<LocationRow>, ScoutError> {
        const KIND: EntityKind = EntityKind::Location;

        if search_text.trim().is_empty() {
            return Err(ScoutError::InvalidRequest(
                "location search text is empty".to_string(),
            ));
        }

        transition(KIND, &key, ResolveState::Checking);
        if let Some(row) = self.db.find_location(search_text).await? {
            transition(KIND, &key, ResolveState::Hit);
            return Ok(Resolved::new(row, CacheSource::Hit));
        }

        transition(KIND, &key, ResolveState::Missing);
        transition(KIND, &key, ResolveState::Fetching);
        let raw = self.providers.geocode.geocode(search_text).await?;

        transition(KIND, &key, ResolveState::Normalizing);
        let record = normalize::location(search_text, &raw)?;

        transition(KIND, &key, ResolveState::Persisting);
        let row = self.db.insert_one(record).await?;

        transition(KIND, &key, ResolveState::Done);
        info!(
            kind = %KIND,
            id = row.id,
            search_query = %row.search_query,
            formatted_query = %row.formatted_query,
            "Location cached"
        );
        Ok(Resolved::new(row, CacheSource::Fetched))
    }

    async fn weather_flow(
        &self,
        location: &LocationRef,
        key: &str,
    ) -> Result<Resolved<Vec<WeatherRow>>, ScoutError> {
        const KIND: EntityKind = EntityKind::WeatherDay;

        transition(KIND, &key, ResolveState::Checking);
        let cached = self.db.find_weather(location.id).await?;

        let mut source = CacheSource::Fetched;
        if !cached.is_empty() {
            if !freshness::is_stale(&cached, self.weather_ttl, Utc::now()) {
                transition(KIND, &key, ResolveState::Hit);
                return Ok(Resolved::new(cached, CacheSource::Hit));
            }
            debug!(
                kind = %KIND,
                location_id = location.id,
                rows = cached.len(),
                ttl_secs = self.weather_ttl.as_secs(),
                "Cached weather is stale"
            );
            source = CacheSource::Refreshed;
        }

        transition(KIND, &key, ResolveState::Missing);
        transition(KIND, &key, ResolveState::Fetching);
        let raw = self
            .providers
            .weather
            .forecast(location.latitude, location.longitude)
            .await?;

        transition(KIND, &key, ResolveState::Normalizing);
        let days = normalize::weather_days(&raw)?;
        if days.is_empty() && source == CacheSource::Fetched {
            transition(KIND, &key, ResolveState::Done);
            return Ok(Resolved::new(Vec::new(), source));
        }

        transition(KIND, &key, ResolveState::Persisting);
        let batch = NewRecords::WeatherDays {
            location_id: location.id,
            days,
        };
        // Stale rows are evicted in the same transaction, so a failed
        // re-fetch or insert leaves them in place.
        let stored = if source == CacheSource::Refreshed {
            self.db.replace_batch(batch).await?
        } else {
            self.db.insert_batch(batch).await?
        };
        let rows = stored.into_weather_days()?;

        transition(KIND, &key, ResolveState::Done);
        info!(kind = %KIND, location_id = location.id, rows = rows.len(), ?source, "Weather cached");
        Ok(Resolved::new(rows, source))
    }

    async fn events_flow(
        &self,
        location: &LocationRef,
        key: &str,
    ) -> Result<Resolved<Vec<EventRow>>, ScoutError> {
        const KIND: EntityKind = EntityKind::Event;

        transition(KIND, &key, ResolveState::Checking);
        let cached = self.db.find_events(location.id).await?;
        if !cached.is_empty() {
            transition(KIND, &key, ResolveState::Hit);
            return Ok(Resolved::new(cached, CacheSource::Hit));
        }

        transition(KIND, &key, ResolveState::Missing);
        transition(KIND, &key, ResolveState::Fetching);
        let raw = self
            .providers
            .events
            .search(location.latitude, location.longitude)
            .await?;

        transition(KIND, &key, ResolveState::Normalizing);
        let events = normalize::events(&raw)?;
        if events.is_empty() {
            transition(KIND, &key, ResolveState::Done);
            return Ok(Resolved::new(Vec::new(), CacheSource::Fetched));
        }

        transition(KIND, &key, ResolveState::Persisting);
        let rows = self
            .db
            .insert_batch(NewRecords::Events {
                location_id: location.id,
                events,
            })
            .await?
            .into_events()?;

        transition(KIND, &key, ResolveState::Done);
        info!(kind = %KIND, location_id = location.id, rows = rows.len(), "Events cached");
        Ok(Resolved::new(rows, CacheSource::Fetched))
    }
}
