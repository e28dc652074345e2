use chrono::DateTime;
use cityscout_schema::{DailyDataPoint, ForecastResponse};
use serde_json::Value;

use super::{DAY_FORMAT, parse};
use crate::db::NewWeatherDay;
use crate::error::ScoutError;
use crate::providers::ProviderKind;

/// Normalize a single `daily.data[]` item.
pub fn weather_day(raw_item: &Value) -> Result<NewWeatherDay, ScoutError> {
    let point: DailyDataPoint = parse(ProviderKind::Weather, raw_item)?;
    day_record(point)
}

/// Normalize every day of a forecast response. An empty `daily.data` yields no records.
pub fn weather_days(raw: &Value) -> Result<Vec<NewWeatherDay>, ScoutError> {
    let resp: ForecastResponse = parse(ProviderKind::Weather, raw)?;
    resp.daily.data.into_iter().map(day_record).collect()
}

/// The provider encodes local midnight as unix seconds; the day is read in UTC.
fn day_record(point: DailyDataPoint) -> Result<NewWeatherDay, ScoutError> {
    let Some(at) = DateTime::from_timestamp(point.time, 0) else {
        return Err(ScoutError::malformed(
            ProviderKind::Weather,
            format!("forecast time {} out of range", point.time),
        ));
    };

    Ok(NewWeatherDay {
        forecast: point.summary,
        time: at.format(DAY_FORMAT).to_string(),
    })
}
