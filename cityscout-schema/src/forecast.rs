use serde::{Deserialize, Serialize};

/// Dark Sky style forecast response (`/forecast/{key}/{lat},{lon}`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub timezone: Option<String>,
    pub daily: DailyBlock,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DailyBlock {
    #[serde(default)]
    pub summary: Option<String>,
    pub data: Vec<DailyDataPoint>,
}

/// One forecast day. `time` is unix seconds at local midnight as encoded by the provider.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DailyDataPoint {
    pub time: i64,
    pub summary: String,
}
