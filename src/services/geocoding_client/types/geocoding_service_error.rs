#[derive(Debug)]
pub enum GeocodingServiceError {
    Request(String),
    Status(u16),
    Parse(String),
}

impl std::fmt::Display for GeocodingServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            GeocodingServiceError::Request(e) => write!(f, "Request error: {}", e),
            GeocodingServiceError::Status(code) => {
                write!(f, "Geocoder responded with status {}", code)
            }
            GeocodingServiceError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for GeocodingServiceError {}
