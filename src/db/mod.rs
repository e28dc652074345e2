//! Database module: the relational cache behind every lookup.
//!
//! Layout:
//! - `kind.rs`: entity kinds and the static kind -> SQL statement mapping
//! - `records.rs`: normalized records waiting to be persisted
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `actor.rs`: the actor that owns the pool and serves store RPCs

pub mod actor;
pub mod kind;
pub mod models;
pub mod records;
pub mod schema;

pub use actor::{DbActorHandle, spawn};
pub use kind::{EntityKind, LookupKey};
pub use models::{CachedRows, EventRow, LocationRow, WeatherRow};
pub use records::{NewEvent, NewLocation, NewRecords, NewWeatherDay};
pub use schema::SQLITE_INIT;
