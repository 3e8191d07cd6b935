use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;

use tracing::info;

use stream_resolver::{AppConfig, ApplicationServer, Logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = Arc::new(AppConfig::parse());

    // guards have to live as long as main or buffered logs and sentry events get dropped
    let _guards = Logger::init(&config);

    info!(
        "logger and env prepped, embed upstream {}, match upstream {}",
        config.embed_base_url, config.match_api_base_url
    );

    ApplicationServer::serve(config)
        .await
        .context("server failed to start")?;

    Ok(())
}
