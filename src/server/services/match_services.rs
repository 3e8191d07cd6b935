use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use mockall::automock;
use serde_json::value::RawValue;
use std::sync::Arc;
use tracing::info;
use url::Url;

use crate::server::{error::AppResult, services::upstream_services::UpstreamClient};

pub type DynMatchService = Arc<dyn MatchServiceTrait + Send + Sync>;

/// straight passthrough of the match api, no schema is assumed on either listing
#[automock]
#[async_trait]
pub trait MatchServiceTrait {
    async fn list_matches(&self) -> AppResult<Box<RawValue>>;
    async fn list_matches_on(&self, date: NaiveDate) -> AppResult<Box<RawValue>>;
    async fn list_channels(&self, match_id: &str) -> AppResult<Box<RawValue>>;
}

pub struct MatchService {
    upstream: UpstreamClient,
}

impl MatchService {
    pub fn new(upstream: UpstreamClient) -> Self {
        Self { upstream }
    }

    pub fn listing_url(&self, date: NaiveDate) -> AppResult<Url> {
        let mut url = self.upstream.endpoint(&["v1", "match", "list"])?;
        url.query_pairs_mut()
            .append_pair("date", &date.format("%Y-%m-%d").to_string());
        Ok(url)
    }

    pub fn channels_url(&self, match_id: &str) -> AppResult<Url> {
        let mut url = self.upstream.endpoint(&["v1", "match", "channels"])?;
        url.query_pairs_mut().append_pair("matchId", match_id);
        Ok(url)
    }
}

#[async_trait]
impl MatchServiceTrait for MatchService {
    async fn list_matches(&self) -> AppResult<Box<RawValue>> {
        // server local date, the api has no idea what timezone the caller is in anyways
        self.list_matches_on(Local::now().date_naive()).await
    }

    async fn list_matches_on(&self, date: NaiveDate) -> AppResult<Box<RawValue>> {
        let url = self.listing_url(date)?;
        info!("fetching match listing for {}", date);

        self.upstream.get_json(url).await
    }

    async fn list_channels(&self, match_id: &str) -> AppResult<Box<RawValue>> {
        let url = self.channels_url(match_id)?;
        info!("fetching channels for match {}", match_id);

        self.upstream.get_json(url).await
    }
}
