use serde::{Deserialize, Serialize};

use crate::services::poi_client::poi_category::PoiCategory;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PointOfInterest {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    pub category: PoiCategory,
    pub address: String,
}

/// Nearby places grouped by category. Always replaced as a whole.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NearbyPois {
    pub hotels: Vec<PointOfInterest>,
    pub restaurants: Vec<PointOfInterest>,
    pub attractions: Vec<PointOfInterest>,
}

impl NearbyPois {
    pub fn by_category(&self, category: PoiCategory) -> &[PointOfInterest] {
        match category {
            PoiCategory::Hotel => &self.hotels,
            PoiCategory::Restaurant => &self.restaurants,
            PoiCategory::Attraction => &self.attractions,
        }
    }

    pub fn len(&self) -> usize {
        self.hotels.len() + self.restaurants.len() + self.attractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
