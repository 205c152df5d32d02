use std::error::Error;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::app_error::AppError;

/// Query string extractor that also runs the payload's `validator` rules.
/// Both malformed and invalid queries are rejected with `400`.
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| match e.source() {
                Some(source) => AppError::bad_request(&format!("Invalid query: {}", source)),
                None => AppError::bad_request(&e.body_text()),
            })?;

        data.validate()
            .map_err(|e| AppError::bad_request(&format!("Invalid query: {}", e)))?;

        Ok(ValidatedQuery(data))
    }
}
