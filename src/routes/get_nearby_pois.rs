use crate::{
    map_search::view_state::POI_RADIUS_M,
    types::{app_state::AppState, lat_lng::LatLng, point_of_interest::NearbyPois},
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
pub struct GetNearbyPoisPayload {
    #[validate(range(min = -90.0, max = 90.0, message = "Must be between -90 and 90"))]
    pub lat: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Must be between -180 and 180"))]
    pub lon: f64,

    #[validate(range(min = 1, max = 50000, message = "Must be between 1 and 50000 meters"))]
    pub radius: Option<u32>,
}

#[derive(Serialize, Deserialize)]
pub struct GetNearbyPoisResponse {
    pub data: NearbyPois,
}

#[cfg_attr(test, debug_handler)]
pub async fn get_nearby_pois(
    State(state): State<AppState>,
    ValidatedQuery(payload): ValidatedQuery<GetNearbyPoisPayload>,
) -> Result<Response, AppError> {
    let center = LatLng::new(payload.lat, payload.lon);

    let pois = state
        .poi_service
        .fetch_nearby(center, payload.radius.unwrap_or(POI_RADIUS_M))
        .await
        .map_err(|e| {
            error!("Failed to fetch nearby places: {}", e);
            AppError::bad_gateway("Failed to load nearby places")
        })?;

    Ok((StatusCode::OK, Json(GetNearbyPoisResponse { data: pois })).into_response())
}
