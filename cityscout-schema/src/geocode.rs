use serde::{Deserialize, Serialize};

/// Google Geocoding API response (`/maps/api/geocode/json`).
///
/// Only the members the server reads are modelled; everything else is ignored.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct GeocodeResponse {
    /// `OK`, `ZERO_RESULTS`, `REQUEST_DENIED`, ...
    #[serde(default)]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,

    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl GeocodeResponse {
    /// The geocoder reports `ZERO_RESULTS` with a 200 status; everything other than
    /// `OK` and `ZERO_RESULTS` means the request itself was refused.
    pub fn rejected(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s != "OK" && s != "ZERO_RESULTS")
    }
}
