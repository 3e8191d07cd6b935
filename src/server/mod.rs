pub mod api;
pub mod dtos;
pub mod error;
pub mod extractors;
pub mod services;
pub mod utils;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use axum::{Extension, Router, http::HeaderValue, routing::get};
use metrics_exporter_prometheus::PrometheusBuilder;
use once_cell::sync::Lazy;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use api::{
    health_controller::health_endpoint, match_controller::MatchController,
    vidsrc_controller::VidsrcController,
};
use services::app_services::AppServices;

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

pub fn get_uptime_seconds() -> u64 {
    START_TIME.elapsed().as_secs()
}

pub fn get_app_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub struct ApplicationServer;

impl ApplicationServer {
    pub async fn serve(config: Arc<AppConfig>) -> anyhow::Result<()> {
        Lazy::force(&START_TIME);

        let prometheus = PrometheusBuilder::new()
            .install_recorder()
            .context("failed to install prometheus recorder")?;

        let services = AppServices::new(config.clone())?;

        // metrics sit outside the cors/trace stack, scrapers don't need either
        let router = Self::router(services).route(
            "/metrics",
            get(move || std::future::ready(prometheus.render())),
        );

        let listener = tokio::net::TcpListener::bind(config.bind_address())
            .await
            .with_context(|| format!("failed to bind {}", config.bind_address()))?;

        info!("listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("server error")?;

        info!("server shut down");
        Ok(())
    }

    /// every public route plus the shared layers, split out from `serve` so tests can drive it
    /// with their own services
    pub fn router(services: AppServices) -> Router {
        let cors = Self::cors_layer(&services.config);

        Router::new()
            .route("/health", get(health_endpoint))
            .merge(VidsrcController::app())
            .merge(MatchController::app())
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(cors)
                    .layer(Extension(services)),
            )
    }

    fn cors_layer(config: &AppConfig) -> CorsLayer {
        let origin = config.cors_origin.trim();

        let allow_origin = if origin == "*" {
            AllowOrigin::any()
        } else {
            let origins: Vec<HeaderValue> = origin
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .filter_map(|o| match HeaderValue::from_str(o) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("skipping invalid cors origin: {}", o);
                        None
                    }
                })
                .collect();
            info!("cors allow list has {} origin(s)", origins.len());
            AllowOrigin::list(origins)
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("failed to install ctrl+c handler: {}", e);
    }
}
