use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{info, warn};

use super::{
    sources::{Geocoder, PoiSource},
    view_state::{ViewEvent, ViewState, POI_RADIUS_M},
};
use crate::types::{lat_lng::LatLng, search_result::SearchResult};

/// One user's map search. Every search or selection takes a new request
/// token; responses that arrive after a newer request started are dropped.
pub struct MapSearch<G, P> {
    geocoder: G,
    poi_source: P,
    state: watch::Sender<ViewState>,
    latest_request: AtomicU64,
}

impl<G, P> MapSearch<G, P>
where
    G: Geocoder,
    P: PoiSource,
{
    pub fn new(geocoder: G, poi_source: P) -> Self {
        Self::with_state(geocoder, poi_source, ViewState::default())
    }

    pub fn with_state(geocoder: G, poi_source: P, initial: ViewState) -> Self {
        let (state, _) = watch::channel(initial);

        Self {
            geocoder,
            poi_source,
            state,
            latest_request: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Geocodes `query`, recentres on the best match and loads the places
    /// around it. Blank queries are ignored.
    pub async fn submit_search(&self, query: &str) -> ViewState {
        if query.trim().is_empty() {
            return self.snapshot();
        }

        let token = self.begin_request();
        self.apply(ViewEvent::SearchStarted(query.to_string()));

        match self.geocoder.geocode(query.trim()).await {
            Ok(results) => {
                info!("Geocoded {:?} to {} results", query, results.len());
                let center = results.first().map(SearchResult::position);

                if !self.apply_if_current(token, ViewEvent::SearchResolved(results)) {
                    return self.snapshot();
                }

                if let Some(center) = center {
                    self.load_pois(token, center).await;
                }
            }
            Err(e) => {
                warn!("Failed to geocode {:?}: {}", query, e);
                self.apply_if_current(token, ViewEvent::SearchFailed);
            }
        }

        self.apply_if_current(token, ViewEvent::LoadingFinished);
        self.snapshot()
    }

    /// Recentres on one of the listed results and reloads the places around
    /// it. Returns `None` when `index` does not address a listed result.
    pub async fn select_result(&self, index: usize) -> Option<ViewState> {
        let selected = self.state.borrow().search_results.get(index).cloned()?;
        let center = selected.position();

        let token = self.begin_request();
        self.apply_if_current(token, ViewEvent::ResultSelected(selected));
        self.load_pois(token, center).await;
        self.apply_if_current(token, ViewEvent::LoadingFinished);

        Some(self.snapshot())
    }

    async fn load_pois(&self, token: u64, center: LatLng) {
        match self.poi_source.nearby(center, POI_RADIUS_M).await {
            Ok(pois) => {
                self.apply_if_current(token, ViewEvent::PoisLoaded(pois));
            }
            Err(e) => {
                warn!(
                    "Failed to load places around ({}, {}): {}",
                    center.lat, center.lon, e
                );
                self.apply_if_current(token, ViewEvent::PoisFailed);
            }
        }
    }

    fn begin_request(&self) -> u64 {
        self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn apply(&self, event: ViewEvent) {
        self.state.send_modify(|state| *state = state.apply(event));
    }

    /// Applies `event` only if no newer request has started since `token`
    /// was issued. The check happens under the channel lock.
    fn apply_if_current(&self, token: u64, event: ViewEvent) -> bool {
        self.state.send_if_modified(|state| {
            if self.latest_request.load(Ordering::SeqCst) != token {
                return false;
            }
            *state = state.apply(event);
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashMap,
        sync::{Arc, Mutex},
        time::Duration,
    };

    use async_trait::async_trait;
    use serde_json::json;

    use super::*;
    use crate::{
        map_search::view_state::{
            DEFAULT_CENTER, NO_RESULTS_MESSAGE, POI_FAILED_MESSAGE, SEARCH_FAILED_MESSAGE,
        },
        services::poi_client::poi_category::PoiCategory,
        types::point_of_interest::{NearbyPois, PointOfInterest},
    };

    #[derive(Default)]
    struct FakeGeocoder {
        places: HashMap<String, Vec<SearchResult>>,
        delays: HashMap<String, Duration>,
        failing: bool,
    }

    impl FakeGeocoder {
        fn with_place(mut self, query: &str, results: Vec<SearchResult>) -> Self {
            self.places.insert(query.to_string(), results);
            self
        }

        fn with_delay(mut self, query: &str, delay: Duration) -> Self {
            self.delays.insert(query.to_string(), delay);
            self
        }
    }

    #[async_trait]
    impl Geocoder for FakeGeocoder {
        type Error = String;

        async fn geocode(&self, query: &str) -> Result<Vec<SearchResult>, String> {
            if let Some(delay) = self.delays.get(query) {
                tokio::time::sleep(*delay).await;
            }
            if self.failing {
                return Err("connection reset".to_string());
            }
            Ok(self.places.get(query).cloned().unwrap_or_default())
        }
    }

    #[derive(Default, Clone)]
    struct FakePoiSource {
        calls: Arc<Mutex<Vec<(LatLng, u32)>>>,
        failing: Arc<Mutex<bool>>,
    }

    #[async_trait]
    impl PoiSource for FakePoiSource {
        type Error = String;

        async fn nearby(&self, center: LatLng, radius_m: u32) -> Result<NearbyPois, String> {
            self.calls.lock().unwrap().push((center, radius_m));
            if *self.failing.lock().unwrap() {
                return Err("restaurants query timed out".to_string());
            }
            Ok(NearbyPois {
                hotels: vec![PointOfInterest {
                    id: 1,
                    lat: center.lat + 0.001,
                    lon: center.lon,
                    name: "Nearby Hotel".to_string(),
                    category: PoiCategory::Hotel,
                    address: "Address not available".to_string(),
                }],
                ..Default::default()
            })
        }
    }

    fn result(lat: f64, lon: f64, name: &str) -> SearchResult {
        SearchResult {
            lat,
            lon,
            display_name: name.to_string(),
            raw_address: json!({ "display_name": name }),
        }
    }

    fn taj_mahal() -> Vec<SearchResult> {
        vec![
            result(27.1751, 78.0421, "Taj Mahal, Agra, Uttar Pradesh, India"),
            result(27.1795, 78.0211, "Taj Mahal Museum, Agra, India"),
        ]
    }

    #[tokio::test]
    async fn test_search_recentres_and_loads_pois() {
        let pois = FakePoiSource::default();
        let session = MapSearch::new(
            FakeGeocoder::default().with_place("Taj Mahal, India", taj_mahal()),
            pois.clone(),
        );

        let state = session.submit_search("Taj Mahal, India").await;

        assert_eq!(state.center, LatLng::new(27.1751, 78.0421));
        assert_eq!(state.search_results.len(), 2);
        assert_eq!(state.pois.hotels.len(), 1);
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
        assert_eq!(
            pois.calls.lock().unwrap().as_slice(),
            &[(LatLng::new(27.1751, 78.0421), 2000)]
        );
    }

    #[tokio::test]
    async fn test_search_without_matches() {
        let pois = FakePoiSource::default();
        let session = MapSearch::new(FakeGeocoder::default(), pois.clone());

        let state = session.submit_search("qwertyuiop").await;

        assert_eq!(state.center, DEFAULT_CENTER);
        assert!(state.search_results.is_empty());
        assert_eq!(state.error.as_deref(), Some(NO_RESULTS_MESSAGE));
        assert!(!state.is_loading);
        assert!(pois.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_network_failure() {
        let session = MapSearch::new(
            FakeGeocoder {
                failing: true,
                ..Default::default()
            },
            FakePoiSource::default(),
        );

        let state = session.submit_search("Agra").await;

        assert_eq!(state.center, DEFAULT_CENTER);
        assert_eq!(state.error.as_deref(), Some(SEARCH_FAILED_MESSAGE));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_blank_query_is_ignored() {
        let pois = FakePoiSource::default();
        let session = MapSearch::new(FakeGeocoder::default(), pois.clone());

        let state = session.submit_search("   ").await;

        assert_eq!(state, ViewState::default());
        assert!(pois.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_select_result_replays_poi_lookup() {
        let pois = FakePoiSource::default();
        let session = MapSearch::new(
            FakeGeocoder::default().with_place("Taj Mahal, India", taj_mahal()),
            pois.clone(),
        );
        session.submit_search("Taj Mahal, India").await;

        let state = session.select_result(1).await.unwrap();

        assert_eq!(state.center, LatLng::new(27.1795, 78.0211));
        assert_eq!(state.search_query, "Taj Mahal Museum, Agra, India");
        assert_eq!(
            state.selected_location.unwrap().display_name,
            "Taj Mahal Museum, Agra, India"
        );
        let calls = pois.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1], (LatLng::new(27.1795, 78.0211), 2000));
    }

    #[tokio::test]
    async fn test_select_unknown_result() {
        let session = MapSearch::new(FakeGeocoder::default(), FakePoiSource::default());

        assert!(session.select_result(0).await.is_none());
    }

    #[tokio::test]
    async fn test_poi_failure_keeps_markers_and_reports() {
        let pois = FakePoiSource::default();
        let session = MapSearch::new(
            FakeGeocoder::default().with_place("Taj Mahal, India", taj_mahal()),
            pois.clone(),
        );
        let loaded = session.submit_search("Taj Mahal, India").await;

        *pois.failing.lock().unwrap() = true;
        let state = session.select_result(1).await.unwrap();

        assert_eq!(state.pois, loaded.pois);
        assert_eq!(state.error.as_deref(), Some(POI_FAILED_MESSAGE));
        assert_eq!(state.center, LatLng::new(27.1795, 78.0211));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn test_stale_search_is_discarded() {
        let pois = FakePoiSource::default();
        let session = MapSearch::new(
            FakeGeocoder::default()
                .with_place("Paris", vec![result(48.8566, 2.3522, "Paris, France")])
                .with_delay("Paris", Duration::from_millis(100))
                .with_place("Agra", vec![result(27.1767, 78.0081, "Agra, India")]),
            pois.clone(),
        );

        let (slow, fast) = tokio::join!(session.submit_search("Paris"), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            session.submit_search("Agra").await
        });

        assert_eq!(fast.center, LatLng::new(27.1767, 78.0081));
        assert_eq!(slow.center, LatLng::new(27.1767, 78.0081));
        assert_eq!(session.snapshot().search_query, "Agra");
        assert_eq!(
            pois.calls.lock().unwrap().as_slice(),
            &[(LatLng::new(27.1767, 78.0081), 2000)]
        );
    }

    #[tokio::test]
    async fn test_subscribers_see_updates() {
        let session = MapSearch::new(
            FakeGeocoder::default().with_place("Taj Mahal, India", taj_mahal()),
            FakePoiSource::default(),
        );
        let mut rx = session.subscribe();

        session.submit_search("Taj Mahal, India").await;

        assert!(rx.has_changed().unwrap());
        assert_eq!(
            rx.borrow_and_update().center,
            LatLng::new(27.1751, 78.0421)
        );
    }
}
