use serde::{Deserialize, Serialize};

use super::lat_lng::LatLng;

/// One row of a geocoding response. `raw_address` keeps the whole object the
/// geocoder returned so callers can show every field it had.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchResult {
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
    pub raw_address: serde_json::Value,
}

impl SearchResult {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lon)
    }
}
