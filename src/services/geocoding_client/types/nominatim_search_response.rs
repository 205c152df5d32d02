use serde::{Deserialize, Serialize};

/// Nominatim sends coordinates as strings; other geocoders speaking the same
/// format send plain numbers.
#[derive(Deserialize, Serialize)]
#[serde(untagged)]
pub enum NominatimCoordinate {
    Number(f64),
    Text(String),
}

impl NominatimCoordinate {
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            NominatimCoordinate::Number(n) => *n,
            NominatimCoordinate::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// The fields of a Nominatim `/search?format=json` row that we rely on.
#[derive(Deserialize, Serialize)]
pub struct NominatimSearchResult {
    pub lat: NominatimCoordinate,
    pub lon: NominatimCoordinate,
    pub display_name: String,
}
