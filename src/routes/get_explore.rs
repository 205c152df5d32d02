use crate::{
    map_search::{
        render::{map_overlay, MapOverlay},
        session::MapSearch,
        view_state::ViewState,
    },
    types::app_state::AppState,
    utils::{app_error::AppError, validated_query::ValidatedQuery},
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
#[cfg(test)]
use axum_macros::debug_handler;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

#[derive(Validate, Deserialize)]
pub struct GetExplorePayload {
    #[validate(length(min = 1, message = "Must be at least 1 character"))]
    pub q: String,

    /// Index into the listed results to select after the search.
    pub select: Option<usize>,
}

#[derive(Serialize)]
pub struct GetExploreResponseData {
    pub view: ViewState,
    pub overlay: MapOverlay,
}

#[derive(Serialize)]
pub struct GetExploreResponse {
    pub data: GetExploreResponseData,
}

/// Runs one map search session: search, optionally pick a listed result, and
/// return the resulting view with its map overlay. Upstream failures surface
/// as the view's error message, not as an HTTP error.
#[cfg_attr(test, debug_handler)]
pub async fn get_explore(
    State(state): State<AppState>,
    ValidatedQuery(payload): ValidatedQuery<GetExplorePayload>,
) -> Result<Response, AppError> {
    if payload.q.trim().is_empty() {
        return Err(AppError::bad_request("Invalid query: q must not be blank"));
    }

    let session = MapSearch::new(state.geocoding_service, state.poi_service);
    let mut view = session.submit_search(&payload.q).await;

    if let Some(index) = payload.select {
        view = session.select_result(index).await.ok_or_else(|| {
            AppError::bad_request(&format!(
                "Invalid query: select must be below {}",
                view.search_results.len()
            ))
        })?;
    }

    info!(
        "Explored {:?}: center ({}, {}), {} places",
        payload.q,
        view.center.lat,
        view.center.lon,
        view.pois.len()
    );

    let overlay = map_overlay(&view);

    Ok((
        StatusCode::OK,
        Json(GetExploreResponse {
            data: GetExploreResponseData { view, overlay },
        }),
    )
        .into_response())
}
