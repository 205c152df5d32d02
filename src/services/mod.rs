pub mod geocoding_client;
pub mod poi_client;
