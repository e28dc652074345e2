use crate::db::kind::{EntityKind, LookupKey};
use crate::db::models::{CachedRows, EventRow, LocationRow, WeatherRow};
use crate::db::records::{NewEvent, NewLocation, NewRecords, NewWeatherDay};
use crate::db::schema::SQLITE_INIT;
use crate::error::ScoutError;
use chrono::Utc;
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

#[derive(Debug)]
pub enum DbActorMessage {
    /// Look up rows by the kind's designated key column.
    Find(
        EntityKind,
        LookupKey,
        RpcReplyPort<Result<CachedRows, ScoutError>>,
    ),

    /// Insert a single location and return the stored row.
    InsertOne(NewLocation, RpcReplyPort<Result<LocationRow, ScoutError>>),

    /// Insert one fetch worth of weather/event rows in a single transaction.
    InsertBatch(NewRecords, RpcReplyPort<Result<CachedRows, ScoutError>>),

    /// Delete the location's existing rows of the batch kind and insert the batch,
    /// in one transaction.
    ReplaceBatch(NewRecords, RpcReplyPort<Result<CachedRows, ScoutError>>),

    /// Delete every row of `kind` owned by a location; replies with the count.
    DeleteByLocation(EntityKind, i64, RpcReplyPort<Result<u64, ScoutError>>),

    /// Close the pool and stop the actor.
    Shutdown(RpcReplyPort<()>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

impl DbActorHandle {
    pub async fn find(&self, kind: EntityKind, key: LookupKey) -> Result<CachedRows, ScoutError> {
        ractor::call!(self.actor, DbActorMessage::Find, kind, key)
            .map_err(|e| ScoutError::RactorError(format!("DbActor Find RPC failed: {e}")))?
    }

    pub async fn insert_one(&self, location: NewLocation) -> Result<LocationRow, ScoutError> {
        ractor::call!(self.actor, DbActorMessage::InsertOne, location)
            .map_err(|e| ScoutError::RactorError(format!("DbActor InsertOne RPC failed: {e}")))?
    }

    pub async fn insert_batch(&self, records: NewRecords) -> Result<CachedRows, ScoutError> {
        ractor::call!(self.actor, DbActorMessage::InsertBatch, records)
            .map_err(|e| ScoutError::RactorError(format!("DbActor InsertBatch RPC failed: {e}")))?
    }

    /// Swap a location's rows of the batch kind for `records`. On failure the old rows stay.
    pub async fn replace_batch(&self, records: NewRecords) -> Result<CachedRows, ScoutError> {
        ractor::call!(self.actor, DbActorMessage::ReplaceBatch, records)
            .map_err(|e| ScoutError::RactorError(format!("DbActor ReplaceBatch RPC failed: {e}")))?
    }

    pub async fn delete_by_location(
        &self,
        kind: EntityKind,
        location_id: i64,
    ) -> Result<u64, ScoutError> {
        ractor::call!(self.actor, DbActorMessage::DeleteByLocation, kind, location_id).map_err(
            |e| ScoutError::RactorError(format!("DbActor DeleteByLocation RPC failed: {e}")),
        )?
    }

    pub async fn find_location(&self, search_query: &str) -> Result<Option<LocationRow>, ScoutError> {
        let rows = self
            .find(
                EntityKind::Location,
                LookupKey::SearchQuery(search_query.to_string()),
            )
            .await?
            .into_locations()?;
        Ok(rows.into_iter().next())
    }

    pub async fn find_weather(&self, location_id: i64) -> Result<Vec<WeatherRow>, ScoutError> {
        self.find(EntityKind::WeatherDay, LookupKey::LocationId(location_id))
            .await?
            .into_weather_days()
    }

    pub async fn find_events(&self, location_id: i64) -> Result<Vec<EventRow>, ScoutError> {
        self.find(EntityKind::Event, LookupKey::LocationId(location_id))
            .await?
            .into_events()
    }

    pub async fn shutdown(&self) -> Result<(), ScoutError> {
        ractor::call!(self.actor, DbActorMessage::Shutdown)
            .map_err(|e| ScoutError::RactorError(format!("DbActor Shutdown RPC failed: {e}")))
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = SqlitePool;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        pool: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::Find(kind, key, reply) => {
                let res = self.find(&state.pool, kind, &key).await;
                let _ = reply.send(res);
            }
            DbActorMessage::InsertOne(location, reply) => {
                let res = self.insert_location(&state.pool, location).await;
                let _ = reply.send(res);
            }
            DbActorMessage::InsertBatch(records, reply) => {
                let res = self.insert_batch(&state.pool, records, false).await;
                let _ = reply.send(res);
            }
            DbActorMessage::ReplaceBatch(records, reply) => {
                let res = self.insert_batch(&state.pool, records, true).await;
                let _ = reply.send(res);
            }
            DbActorMessage::DeleteByLocation(kind, location_id, reply) => {
                let res = self.delete_by_location(&state.pool, kind, location_id).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Shutdown(reply) => {
                state.pool.close().await;
                info!("DbActor pool closed");
                let _ = reply.send(());
                myself.stop(None);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn find(
        &self,
        pool: &SqlitePool,
        kind: EntityKind,
        key: &LookupKey,
    ) -> Result<CachedRows, ScoutError> {
        kind.check_key(key)?;

        let rows = match (kind, key) {
            (EntityKind::Location, LookupKey::SearchQuery(q)) => CachedRows::Locations(
                sqlx::query_as::<_, LocationRow>(kind.select_sql())
                    .bind(q.as_str())
                    .fetch_all(pool)
                    .await?,
            ),
            (EntityKind::WeatherDay, LookupKey::LocationId(id)) => CachedRows::WeatherDays(
                sqlx::query_as::<_, WeatherRow>(kind.select_sql())
                    .bind(*id)
                    .fetch_all(pool)
                    .await?,
            ),
            (EntityKind::Event, LookupKey::LocationId(id)) => CachedRows::Events(
                sqlx::query_as::<_, EventRow>(kind.select_sql())
                    .bind(*id)
                    .fetch_all(pool)
                    .await?,
            ),
            (kind, key) => {
                return Err(ScoutError::UnexpectedError(format!(
                    "no lookup statement for {kind} by {key}"
                )));
            }
        };

        debug!(kind = %kind, key = %key, rows = rows.len(), "db find");
        Ok(rows)
    }

    async fn insert_location(
        &self,
        pool: &SqlitePool,
        location: NewLocation,
    ) -> Result<LocationRow, ScoutError> {
        let NewLocation {
            search_query,
            formatted_query,
            latitude,
            longitude,
        } = location;

        let row = sqlx::query_as::<_, LocationRow>(EntityKind::Location.insert_sql())
            .bind(search_query)
            .bind(formatted_query)
            .bind(latitude)
            .bind(longitude)
            .fetch_one(pool)
            .await?;

        debug!(id = row.id, search_query = %row.search_query, "db location inserted");
        Ok(row)
    }

    async fn insert_batch(
        &self,
        pool: &SqlitePool,
        records: NewRecords,
        replace: bool,
    ) -> Result<CachedRows, ScoutError> {
        let kind = records.kind();
        let location_id = records.location_id();
        let count = records.len();

        // Dropping `tx` on an early return rolls the whole batch back.
        let mut tx = pool.begin().await?;

        let replaced = if replace {
            sqlx::query(kind.delete_sql()?)
                .bind(location_id)
                .execute(&mut *tx)
                .await?
                .rows_affected()
        } else {
            0
        };

        let rows = match records {
            NewRecords::WeatherDays { days, .. } => {
                let created_at = Utc::now();
                let mut rows = Vec::with_capacity(days.len());
                for NewWeatherDay { forecast, time } in days {
                    let row = sqlx::query_as::<_, WeatherRow>(kind.insert_sql())
                        .bind(location_id)
                        .bind(forecast)
                        .bind(time)
                        .bind(created_at)
                        .fetch_one(&mut *tx)
                        .await?;
                    rows.push(row);
                }
                CachedRows::WeatherDays(rows)
            }
            NewRecords::Events { events, .. } => {
                let mut rows = Vec::with_capacity(events.len());
                for NewEvent {
                    link,
                    name,
                    event_date,
                    summary,
                } in events
                {
                    let row = sqlx::query_as::<_, EventRow>(kind.insert_sql())
                        .bind(location_id)
                        .bind(link)
                        .bind(name)
                        .bind(event_date)
                        .bind(summary)
                        .fetch_one(&mut *tx)
                        .await?;
                    rows.push(row);
                }
                CachedRows::Events(rows)
            }
        };

        tx.commit().await?;

        debug!(
            kind = %kind,
            location_id,
            submitted = count,
            stored = rows.len(),
            replaced,
            "db batch committed"
        );
        Ok(rows)
    }

    async fn delete_by_location(
        &self,
        pool: &SqlitePool,
        kind: EntityKind,
        location_id: i64,
    ) -> Result<u64, ScoutError> {
        let res = sqlx::query(kind.delete_sql()?)
            .bind(location_id)
            .execute(pool)
            .await?;

        let affected = res.rows_affected();
        debug!(kind = %kind, location_id, affected, "db rows deleted");
        Ok(affected)
    }
}

/// Open the process-wide SQLite pool.
async fn connect(database_url: &str) -> Result<SqlitePool, ScoutError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5))
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new().connect_with(connect_opts).await?;
    Ok(pool)
}

/// Spawn the database actor on an already opened pool and return a cloneable handle.
async fn spawn_with_pool(pool: SqlitePool) -> Result<DbActorHandle, ScoutError> {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, pool)
        .await
        .map_err(|e| ScoutError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor })
}

/// Open the pool for `database_url` and spawn the database actor on it.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, ScoutError> {
    let pool = connect(database_url).await?;
    spawn_with_pool(pool).await
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), ScoutError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
