use std::time::Duration;

use futures::future::try_join3;
use tracing::info;
use urlencoding::encode;

use super::{
    poi_category::PoiCategory,
    types::{
        overpass_response::{OverpassElement, OverpassResponse},
        poi_service_error::PoiServiceError,
    },
};
use crate::types::{
    lat_lng::LatLng,
    point_of_interest::{NearbyPois, PointOfInterest},
};

pub const MISSING_ADDRESS: &str = "Address not available";

#[derive(Clone)]
pub struct PoiServiceConfig {
    pub host: String,
    pub user_agent: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct PoiService {
    config: PoiServiceConfig,
    client: reqwest::Client,
}

impl PoiService {
    pub fn new(config: PoiServiceConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Looks up hotels, restaurants and attractions around `center`.
    ///
    /// The three category queries run concurrently. If any one of them fails
    /// the whole lookup fails and none of the partial results are returned.
    pub async fn fetch_nearby(
        &self,
        center: LatLng,
        radius_m: u32,
    ) -> Result<NearbyPois, PoiServiceError> {
        let (hotels, restaurants, attractions) = try_join3(
            self.fetch_category(PoiCategory::Hotel, center, radius_m),
            self.fetch_category(PoiCategory::Restaurant, center, radius_m),
            self.fetch_category(PoiCategory::Attraction, center, radius_m),
        )
        .await?;

        info!(
            "Found {} hotels, {} restaurants, {} attractions within {}m of ({}, {})",
            hotels.len(),
            restaurants.len(),
            attractions.len(),
            radius_m,
            center.lat,
            center.lon
        );

        Ok(NearbyPois {
            hotels,
            restaurants,
            attractions,
        })
    }

    async fn fetch_category(
        &self,
        category: PoiCategory,
        center: LatLng,
        radius_m: u32,
    ) -> Result<Vec<PointOfInterest>, PoiServiceError> {
        let url = format!(
            "{}/api/interpreter?data={}",
            self.config.host,
            encode(&build_query(category, center, radius_m))
        );

        let resp = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, &self.config.user_agent)
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| {
                PoiServiceError::Request(category, format!("Failed to send request: {}", e))
            })?;

        if !resp.status().is_success() {
            return Err(PoiServiceError::Status(category, resp.status().as_u16()));
        }

        let body = resp.json::<OverpassResponse>().await.map_err(|e| {
            PoiServiceError::Parse(category, format!("Failed to get response body: {}", e))
        })?;

        Ok(body
            .elements
            .into_iter()
            .filter_map(|element| to_point_of_interest(element, category))
            .collect())
    }
}

/// Builds the Overpass QL selecting every node, way and relation of
/// `category` within `radius_m` meters of `center`.
pub fn build_query(category: PoiCategory, center: LatLng, radius_m: u32) -> String {
    let filter = category.tag_filter();
    let around = format!("(around:{},{},{})", radius_m, center.lat, center.lon);

    format!(
        "[out:json][timeout:25];(node{filter}{around};way{filter}{around};relation{filter}{around};);out center;"
    )
}

/// Elements with neither their own coordinates nor a `center` cannot be
/// placed on the map and are dropped.
pub fn to_point_of_interest(
    mut element: OverpassElement,
    category: PoiCategory,
) -> Option<PointOfInterest> {
    let (lat, lon) = match (element.lat, element.lon, element.center) {
        (Some(lat), Some(lon), _) => (lat, lon),
        (_, _, Some(center)) => (center.lat, center.lon),
        _ => return None,
    };

    let name = element
        .tags
        .remove("name")
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("Unnamed {}", category.label()));

    let address = element
        .tags
        .remove("addr:street")
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| MISSING_ADDRESS.to_string());

    Some(PointOfInterest {
        id: element.id,
        lat,
        lon,
        name,
        category,
        address,
    })
}
