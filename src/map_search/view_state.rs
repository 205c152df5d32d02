use serde::Serialize;

use crate::types::{lat_lng::LatLng, point_of_interest::NearbyPois, search_result::SearchResult};

pub const DEFAULT_CENTER: LatLng = LatLng::new(20.5937, 78.9629);
pub const DEFAULT_ZOOM: u8 = 13;
pub const POI_RADIUS_M: u32 = 2000;
pub const MAX_LISTED_RESULTS: usize = 5;

pub const NO_RESULTS_MESSAGE: &str = "No results found. Please try a different search term.";
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to search location. Please try again.";
pub const POI_FAILED_MESSAGE: &str = "Failed to load nearby places. Please try again.";

/// The location last picked by the user, either the best match of a search or
/// a result clicked in the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedLocation {
    pub lat: f64,
    pub lng: f64,
    pub display_name: String,
    pub address: serde_json::Value,
}

impl From<&SearchResult> for SelectedLocation {
    fn from(result: &SearchResult) -> Self {
        Self {
            lat: result.lat,
            lng: result.lon,
            display_name: result.display_name.clone(),
            address: result.raw_address.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub center: LatLng,
    pub zoom_level: u8,
    pub search_query: String,
    pub search_results: Vec<SearchResult>,
    pub selected_location: Option<SelectedLocation>,
    pub pois: NearbyPois,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::centered_on(DEFAULT_CENTER)
    }
}

/// Everything that can change the view. Each event turns one state into the
/// next through [`ViewState::apply`].
#[derive(Debug, Clone)]
pub enum ViewEvent {
    SearchStarted(String),
    SearchResolved(Vec<SearchResult>),
    SearchFailed,
    /// Carries the chosen result itself so the new centre never depends on
    /// the list at the time the event is applied.
    ResultSelected(SearchResult),
    PoisLoaded(NearbyPois),
    PoisFailed,
    LoadingFinished,
}

impl ViewState {
    pub fn centered_on(center: LatLng) -> Self {
        Self {
            center,
            zoom_level: DEFAULT_ZOOM,
            search_query: String::new(),
            search_results: Vec::new(),
            selected_location: None,
            pois: NearbyPois::default(),
            is_loading: false,
            error: None,
        }
    }

    pub fn apply(&self, event: ViewEvent) -> ViewState {
        let mut next = self.clone();

        match event {
            ViewEvent::SearchStarted(query) => {
                next.search_query = query;
                next.is_loading = true;
                next.error = None;
            }
            ViewEvent::SearchResolved(results) => match results.first() {
                Some(first) => {
                    next.center = first.position();
                    next.zoom_level = DEFAULT_ZOOM;
                    next.selected_location = Some(SelectedLocation::from(first));
                    next.search_results = results.into_iter().take(MAX_LISTED_RESULTS).collect();
                }
                None => {
                    next.search_results = Vec::new();
                    next.error = Some(NO_RESULTS_MESSAGE.to_string());
                }
            },
            ViewEvent::SearchFailed => {
                next.error = Some(SEARCH_FAILED_MESSAGE.to_string());
            }
            ViewEvent::ResultSelected(result) => {
                next.center = result.position();
                next.selected_location = Some(SelectedLocation::from(&result));
                next.search_query = result.display_name;
                next.is_loading = true;
                next.error = None;
            }
            ViewEvent::PoisLoaded(pois) => {
                next.pois = pois;
            }
            ViewEvent::PoisFailed => {
                next.error = Some(POI_FAILED_MESSAGE.to_string());
            }
            ViewEvent::LoadingFinished => {
                next.is_loading = false;
            }
        }

        next
    }
}
