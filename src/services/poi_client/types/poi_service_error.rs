use crate::services::poi_client::poi_category::PoiCategory;

#[derive(Debug)]
pub enum PoiServiceError {
    Request(PoiCategory, String),
    Status(PoiCategory, u16),
    Parse(PoiCategory, String),
}

impl std::fmt::Display for PoiServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            PoiServiceError::Request(category, e) => {
                write!(f, "Request error for {}: {}", category, e)
            }
            PoiServiceError::Status(category, code) => {
                write!(f, "Overpass responded with status {} for {}", code, category)
            }
            PoiServiceError::Parse(category, e) => {
                write!(f, "Parse error for {}: {}", category, e)
            }
        }
    }
}

impl std::error::Error for PoiServiceError {}
