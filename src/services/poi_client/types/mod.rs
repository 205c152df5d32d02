pub mod overpass_response;
pub mod poi_service_error;
