use axum::{Extension, Json, Router, routing::get};
use tracing::debug;

use crate::server::{
    dtos::stream_dto::{StreamRequest, StreamResult},
    error::AppResult,
    extractors::{EpisodeParams, RequiredId},
    services::app_services::AppServices,
};

pub struct VidsrcController;

impl VidsrcController {
    pub fn app() -> Router {
        Router::new()
            // an empty or whitespace-only id is a 404 from the id extractor, before any upstream
            // call. the bare trailing-slash route exists so that case reaches it too
            .route("/vidsrc/", get(Self::resolve))
            .route("/vidsrc/{dbid}", get(Self::resolve))
    }

    async fn resolve(
        RequiredId(dbid): RequiredId,
        EpisodeParams(query): EpisodeParams,
        Extension(services): Extension<AppServices>,
    ) -> AppResult<Json<StreamResult>> {
        let request = StreamRequest::new(dbid, query);
        debug!(
            "vidsrc request for {} (s={:?}, e={:?})",
            request.content_id, request.season, request.episode
        );

        let result = services.embeds.resolve_embed(&request).await?;
        Ok(Json(result))
    }
}
