use crate::{
    map_search::view_state::MAX_LISTED_RESULTS,
    types::{app_state::AppState, search_result::SearchResult},
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
use tracing::error;
use validator::Validate;

#[derive(Validate, Deserialize)]
pub struct GetGeocodePayload {
    #[validate(length(min = 1, message = "Must be at least 1 character"))]
    pub q: String,
}

#[derive(Serialize, Deserialize)]
pub struct GetGeocodeResponseData {
    pub results: Vec<SearchResult>,
}

#[derive(Serialize, Deserialize)]
pub struct GetGeocodeResponse {
    pub data: GetGeocodeResponseData,
}

#[cfg_attr(test, debug_handler)]
pub async fn get_geocode(
    State(state): State<AppState>,
    ValidatedQuery(payload): ValidatedQuery<GetGeocodePayload>,
) -> Result<Response, AppError> {
    let query = payload.q.trim();
    if query.is_empty() {
        return Err(AppError::bad_request("Invalid query: q must not be blank"));
    }

    let results = state
        .geocoding_service
        .search(query)
        .await
        .map_err(|e| {
            error!("Failed to geocode {:?}: {}", query, e);
            AppError::bad_gateway("Failed to search location")
        })?
        .into_iter()
        .take(MAX_LISTED_RESULTS)
        .collect::<Vec<SearchResult>>();

    Ok((
        StatusCode::OK,
        Json(GetGeocodeResponse {
            data: GetGeocodeResponseData { results },
        }),
    )
        .into_response())
}
