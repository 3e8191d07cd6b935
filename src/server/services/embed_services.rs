use async_trait::async_trait;
use mockall::automock;
use serde_json::value::RawValue;
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

use crate::server::{
    dtos::stream_dto::{StreamRequest, StreamResult, SubtitleQuery},
    error::{AppResult, Error},
    services::upstream_services::UpstreamClient,
    utils::embed_tokens::extract_embed_tokens,
};

pub type DynEmbedService = Arc<dyn EmbedServiceTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait EmbedServiceTrait {
    /// embed page -> tokens -> subtitles -> result, all sequential
    async fn resolve_embed(&self, request: &StreamRequest) -> AppResult<StreamResult>;
    async fn fetch_subtitles(&self, query: &SubtitleQuery) -> AppResult<Box<RawValue>>;
}

pub struct EmbedService {
    upstream: UpstreamClient,
    // set from OPTIONAL_CAPTIONS, otherwise a subtitle failure takes the whole request down
    optional_captions: bool,
}

impl EmbedService {
    pub fn new(upstream: UpstreamClient, optional_captions: bool) -> Self {
        Self {
            upstream,
            optional_captions,
        }
    }

    /// hydraxtv.php with season/episode for shows, plain hydrax.php for everything else
    pub fn embed_url(&self, request: &StreamRequest) -> AppResult<Url> {
        match request.episode() {
            Some((season, episode)) => {
                let mut url = self.upstream.endpoint(&["hydraxtv.php"])?;
                url.query_pairs_mut()
                    .append_pair("id", &request.content_id)
                    .append_pair("season", &season.to_string())
                    .append_pair("episode", &episode.to_string());
                Ok(url)
            }
            None => {
                let mut url = self.upstream.endpoint(&["hydrax.php"])?;
                url.query_pairs_mut().append_pair("id", &request.content_id);
                Ok(url)
            }
        }
    }

    pub fn subtitle_url(&self, query: &SubtitleQuery) -> AppResult<Url> {
        self.upstream.endpoint(&["subs", &query.file_name()])
    }
}

#[async_trait]
impl EmbedServiceTrait for EmbedService {
    async fn resolve_embed(&self, request: &StreamRequest) -> AppResult<StreamResult> {
        let url = self.embed_url(request)?;
        info!("resolving embed for {} via {}", request.content_id, url);

        let page = self.upstream.get_text(url).await?;
        let tokens = extract_embed_tokens(&page);

        // subtitle lookup happens before the source token is checked
        let captions = match tokens.imdb_id {
            Some(imdb_id) => {
                let query = SubtitleQuery::for_request(imdb_id, request);
                match self.fetch_subtitles(&query).await {
                    Ok(subs) => Some(subs),
                    Err(e) if self.optional_captions => {
                        warn!(
                            "subtitles for {} failed, continuing without captions: {}",
                            query.imdb_id, e
                        );
                        None
                    }
                    Err(e) => return Err(e),
                }
            }
            None => {
                info!("no imdb id on embed page for {}", request.content_id);
                None
            }
        };

        let src = tokens.source_url.ok_or_else(|| {
            warn!("vpro link missing from embed page for {}", request.content_id);
            Error::ExtractionFailed("vpro link not found in the response".to_string())
        })?;

        info!("resolved {} to {}", request.content_id, src);
        Ok(StreamResult::hydrax(src, captions))
    }

    async fn fetch_subtitles(&self, query: &SubtitleQuery) -> AppResult<Box<RawValue>> {
        let url = self.subtitle_url(query)?;
        info!("fetching subtitles for {} via {}", query.imdb_id, url);

        self.upstream.get_json(url).await
    }
}
