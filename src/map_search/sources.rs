use async_trait::async_trait;

use crate::{
    services::{
        geocoding_client::{
            geocoding_service::GeocodingService,
            types::geocoding_service_error::GeocodingServiceError,
        },
        poi_client::{poi_service::PoiService, types::poi_service_error::PoiServiceError},
    },
    types::{lat_lng::LatLng, point_of_interest::NearbyPois, search_result::SearchResult},
};

/// Resolves free text to candidate locations, best match first.
#[async_trait]
pub trait Geocoder: Send + Sync {
    type Error: std::fmt::Display + Send;

    async fn geocode(&self, query: &str) -> Result<Vec<SearchResult>, Self::Error>;
}

/// Finds places of interest around a point. Must be all-or-nothing across
/// categories.
#[async_trait]
pub trait PoiSource: Send + Sync {
    type Error: std::fmt::Display + Send;

    async fn nearby(&self, center: LatLng, radius_m: u32) -> Result<NearbyPois, Self::Error>;
}

#[async_trait]
impl Geocoder for GeocodingService {
    type Error = GeocodingServiceError;

    async fn geocode(&self, query: &str) -> Result<Vec<SearchResult>, Self::Error> {
        self.search(query).await
    }
}

#[async_trait]
impl PoiSource for PoiService {
    type Error = PoiServiceError;

    async fn nearby(&self, center: LatLng, radius_m: u32) -> Result<NearbyPois, Self::Error> {
        self.fetch_nearby(center, radius_m).await
    }
}
