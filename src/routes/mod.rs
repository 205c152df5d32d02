use axum::{routing::get, Router};

use crate::types::app_state::AppState;

pub mod get_explore;
pub mod get_geocode;
pub mod get_nearby_pois;
pub mod get_static;

pub fn apply_routes(app: Router<AppState>) -> Router<AppState> {
    app.route("/api/geocode", get(get_geocode::get_geocode))
        .route("/api/pois", get(get_nearby_pois::get_nearby_pois))
        .route("/api/explore", get(get_explore::get_explore))
}
