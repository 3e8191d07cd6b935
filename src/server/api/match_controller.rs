use axum::{Extension, Json, Router, routing::get};
use serde_json::value::RawValue;

use crate::server::{
    error::AppResult, extractors::RequiredId, services::app_services::AppServices,
};

pub struct MatchController;

impl MatchController {
    pub fn app() -> Router {
        Router::new()
            .route("/matches", get(Self::list_matches))
            // "/matches/" is the channel route with an empty id, so like a whitespace-only id it
            // gets the extractor's 404 instead of the listing
            .route("/matches/", get(Self::list_channels))
            .route("/matches/{ts_id}", get(Self::list_channels))
    }

    /// today's listing, whatever the api sends is what the caller gets
    async fn list_matches(
        Extension(services): Extension<AppServices>,
    ) -> AppResult<Json<Box<RawValue>>> {
        let listing = services.matches.list_matches().await?;
        Ok(Json(listing))
    }

    async fn list_channels(
        RequiredId(ts_id): RequiredId,
        Extension(services): Extension<AppServices>,
    ) -> AppResult<Json<Box<RawValue>>> {
        let channels = services.matches.list_channels(&ts_id).await?;
        Ok(Json(channels))
    }
}
