//! Pure mappings from raw provider JSON to the records the store persists.
//!
//! Every function either returns complete records or fails with
//! `MalformedProviderResponse`; partial output is never produced.

mod event;
mod location;
mod weather;

pub use event::{event, events};
pub use location::location;
pub use weather::{weather_day, weather_days};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ScoutError;
use crate::providers::ProviderKind;

/// Calendar-day rendering shared by weather days and events, e.g. `Mon Jan 01 2024`.
pub const DAY_FORMAT: &str = "%a %b %d %Y";

fn parse<T: DeserializeOwned>(provider: ProviderKind, raw: &Value) -> Result<T, ScoutError> {
    T::deserialize(raw).map_err(|e| ScoutError::malformed(provider, e.to_string()))
}
