use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::AppConfig;

use super::{
    embed_services::{DynEmbedService, EmbedService},
    match_services::{DynMatchService, MatchService},
    upstream_services::{UpstreamClient, UpstreamProfile},
};

/// everything the handlers reach for, handed to the router as an Extension. nothing in here is
/// mutable so requests never have to coordinate with each other
#[derive(Clone)]
pub struct AppServices {
    pub embeds: DynEmbedService,
    pub matches: DynMatchService,
    pub config: Arc<AppConfig>,
}

impl AppServices {
    pub fn new(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        info!("starting services...");

        let embed_upstream = UpstreamClient::new(UpstreamProfile::embed(&config), &config)
            .context("embed upstream client")?;
        let match_upstream = UpstreamClient::new(UpstreamProfile::matches(&config), &config)
            .context("match upstream client")?;

        let embeds = Arc::new(EmbedService::new(embed_upstream, config.optional_captions))
            as DynEmbedService;
        let matches = Arc::new(MatchService::new(match_upstream)) as DynMatchService;

        info!("services ok");

        Ok(Self::from_parts(embeds, matches, config))
    }

    /// used directly by tests to swap in mocks
    pub fn from_parts(
        embeds: DynEmbedService,
        matches: DynMatchService,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            embeds,
            matches,
            config,
        }
    }
}
