use serde::Serialize;

use super::view_state::{ViewState, POI_RADIUS_M};
use crate::{
    services::poi_client::poi_category::PoiCategory,
    types::{lat_lng::LatLng, point_of_interest::PointOfInterest},
};

const HOTEL_ICON_URL: &str =
    "https://cdn0.iconfinder.com/data/icons/small-n-flat/24/678111-map-marker-512.png";
const RESTAURANT_ICON_URL: &str =
    "https://cdn0.iconfinder.com/data/icons/small-n-flat/24/678132-map-marker-512.png";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerIcon {
    pub icon_url: &'static str,
    pub icon_size: [u32; 2],
    pub icon_anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerKind {
    Location,
    Poi { category: PoiCategory, id: i64 },
}

/// A marker with no `icon` uses the map's default pin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub key: String,
    pub position: LatLng,
    #[serde(flatten)]
    pub kind: MarkerKind,
    pub icon: Option<MarkerIcon>,
    pub popup: Popup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadiusCircle {
    pub center: LatLng,
    pub radius_m: u32,
    pub color: &'static str,
    pub fill_color: &'static str,
    pub fill_opacity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOverlay {
    pub center: LatLng,
    pub zoom: u8,
    pub markers: Vec<Marker>,
    pub radius_circle: RadiusCircle,
    pub legend: Vec<LegendEntry>,
}

pub fn legend_color(category: PoiCategory) -> &'static str {
    match category {
        PoiCategory::Hotel => "red",
        PoiCategory::Restaurant => "green",
        PoiCategory::Attraction => "purple",
    }
}

pub fn marker_icon(category: PoiCategory) -> MarkerIcon {
    let icon_url = match category {
        PoiCategory::Hotel | PoiCategory::Attraction => HOTEL_ICON_URL,
        PoiCategory::Restaurant => RESTAURANT_ICON_URL,
    };

    MarkerIcon {
        icon_url,
        icon_size: [25, 41],
        icon_anchor: [12, 41],
        popup_anchor: [1, -34],
        color: legend_color(category),
    }
}

fn legend_label(category: PoiCategory) -> &'static str {
    match category {
        PoiCategory::Hotel => "Hotels",
        PoiCategory::Restaurant => "Restaurants",
        PoiCategory::Attraction => "Attractions",
    }
}

fn poi_marker(index: usize, poi: &PointOfInterest) -> Marker {
    Marker {
        key: format!("{}-{}", poi.category.label(), index),
        position: LatLng::new(poi.lat, poi.lon),
        kind: MarkerKind::Poi {
            category: poi.category,
            id: poi.id,
        },
        icon: Some(marker_icon(poi.category)),
        popup: Popup {
            title: poi.name.clone(),
            lines: vec![poi.category.title().to_string(), poi.address.clone()],
        },
    }
}

/// Everything drawn on top of the base tiles for `state`: the searched
/// location, one marker per place of interest, the search radius and the
/// legend.
pub fn map_overlay(state: &ViewState) -> MapOverlay {
    let location_label = state
        .search_results
        .first()
        .map(|r| r.display_name.clone())
        .unwrap_or_else(|| "Selected Location".to_string());

    let mut markers = vec![Marker {
        key: "location".to_string(),
        position: state.center,
        kind: MarkerKind::Location,
        icon: None,
        popup: Popup {
            title: "Your Location".to_string(),
            lines: vec![location_label],
        },
    }];

    for category in PoiCategory::ALL {
        markers.extend(
            state
                .pois
                .by_category(category)
                .iter()
                .enumerate()
                .map(|(i, poi)| poi_marker(i, poi)),
        );
    }

    MapOverlay {
        center: state.center,
        zoom: state.zoom_level,
        markers,
        radius_circle: RadiusCircle {
            center: state.center,
            radius_m: POI_RADIUS_M,
            color: "blue",
            fill_color: "blue",
            fill_opacity: 0.1,
        },
        legend: PoiCategory::ALL
            .into_iter()
            .map(|category| LegendEntry {
                label: legend_label(category),
                color: legend_color(category),
            })
            .collect(),
    }
}
