use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;

use crate::server::{dtos::stream_dto::EpisodeQuery, error::Error};

/// `s`/`e` query params, a non integer value is a 422 instead of axum's default 400
pub struct EpisodeParams(pub EpisodeQuery);

impl<S> FromRequestParts<S> for EpisodeParams
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<EpisodeQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| Error::UnprocessableEntity(rejection.body_text()))?;

        Ok(EpisodeParams(query))
    }
}
