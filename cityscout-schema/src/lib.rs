pub mod eventbrite;
pub mod forecast;
pub mod geocode;

pub use eventbrite::{EventItem, EventSearchResponse};
pub use forecast::{DailyDataPoint, ForecastResponse};
pub use geocode::{GeocodeResponse, GeocodeResult};
