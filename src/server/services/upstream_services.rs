use std::time::Duration;

use anyhow::Context;
use axum::body::Bytes;
use axum::http::{HeaderMap, HeaderValue, header};
use serde_json::value::RawValue;
use tracing::{debug, error, info};
use url::Url;

use crate::{
    config::AppConfig,
    server::error::{AppResult, Error},
};

/// hop limit when redirects are on, same as what reqwest uses by default
const MAX_REDIRECTS: usize = 10;

/// fixed identity for one upstream. both sites check Referer/Origin against their own frontend
/// and reject anything that doesn't look like a browser, so these go out on every call
#[derive(Debug, Clone)]
pub struct UpstreamProfile {
    pub name: &'static str,
    pub base_url: Url,
    pub referer: String,
    pub origin: String,
    pub user_agent: String,
}

impl UpstreamProfile {
    pub fn embed(config: &AppConfig) -> Self {
        Self {
            name: "embed",
            base_url: config.embed_base_url.clone(),
            referer: config.embed_referer.clone(),
            origin: config.embed_referer.clone(),
            user_agent: config.upstream_user_agent.clone(),
        }
    }

    pub fn matches(config: &AppConfig) -> Self {
        Self {
            name: "matches",
            base_url: config.match_api_base_url.clone(),
            referer: config.match_referer.clone(),
            origin: config.match_referer.clone(),
            user_agent: config.upstream_user_agent.clone(),
        }
    }

    fn default_headers(&self) -> anyhow::Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::REFERER,
            HeaderValue::from_str(&self.referer).context("invalid referer header value")?,
        );
        headers.insert(
            header::ORIGIN,
            HeaderValue::from_str(&self.origin).context("invalid origin header value")?,
        );
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(&self.user_agent).context("invalid user agent header value")?,
        );
        Ok(headers)
    }
}

/// one pooled client per upstream with the profile baked in as default headers
#[derive(Clone)]
pub struct UpstreamClient {
    profile: UpstreamProfile,
    http: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(profile: UpstreamProfile, config: &AppConfig) -> anyhow::Result<Self> {
        let redirect = if config.follow_redirects {
            reqwest::redirect::Policy::limited(MAX_REDIRECTS)
        } else {
            reqwest::redirect::Policy::none()
        };

        let http = reqwest::Client::builder()
            .default_headers(profile.default_headers()?)
            .redirect(redirect)
            // reqwest would swap our Referer for the redirecting url on every hop
            .referer(false)
            .timeout(Duration::from_secs(config.upstream_timeout_secs))
            .build()
            .with_context(|| format!("failed to build http client for {}", profile.name))?;

        info!(
            "{} upstream client ready ({}, timeout {}s)",
            profile.name, profile.base_url, config.upstream_timeout_secs
        );

        Ok(Self { profile, http })
    }

    /// appends path segments to the base url, segments get percent encoded
    pub fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = self.profile.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                Error::InternalServerErrorWithContext(format!(
                    "{} base url can't take a path: {}",
                    self.profile.name, self.profile.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get_text(&self, url: Url) -> AppResult<String> {
        let body = self.get_bytes(url).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// parses just enough to know it's json, the raw text is what goes back out
    pub async fn get_json(&self, url: Url) -> AppResult<Box<RawValue>> {
        let body = self.get_bytes(url.clone()).await?;

        serde_json::from_slice::<Box<RawValue>>(&body).map_err(|e| {
            error!("{} upstream sent a non json body for {}: {}", self.profile.name, url, e);
            self.record("invalid_body");
            Error::InternalServerErrorWithContext(format!(
                "An unexpected error occurred: invalid JSON from {}: {}",
                url, e
            ))
        })
    }

    async fn get_bytes(&self, url: Url) -> AppResult<Bytes> {
        debug!("GET {} ({})", url, self.profile.name);

        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            error!("{} upstream request failed: {}", self.profile.name, e);
            self.record("unreachable");
            Error::UpstreamUnreachable(format!(
                "An error occurred while requesting {}: {}",
                url, e
            ))
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("{} upstream returned {} for {}", self.profile.name, status, url);
            self.record("http_error");
            return Err(Error::UpstreamStatus {
                status,
                detail: format!("HTTP error occurred: {} returned {}", url, status),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            error!("failed to read {} upstream body: {}", self.profile.name, e);
            self.record("unreachable");
            Error::UpstreamUnreachable(format!(
                "An error occurred while reading {}: {}",
                url, e
            ))
        })?;

        debug!("{} upstream sent {} bytes", self.profile.name, body.len());
        self.record("ok");
        Ok(body)
    }

    fn record(&self, outcome: &'static str) {
        metrics::counter!(
            "upstream_requests_total",
            "upstream" => self.profile.name,
            "outcome" => outcome
        )
        .increment(1);
    }
}
