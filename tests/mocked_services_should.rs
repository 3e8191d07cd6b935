mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::value::RawValue;
use stream_resolver::{
    AppConfig, ApplicationServer,
    server::{
        dtos::stream_dto::StreamResult,
        error::Error,
        services::{
            DynEmbedService, DynMatchService,
            app_services::AppServices,
            embed_services::MockEmbedServiceTrait,
            match_services::MockMatchServiceTrait,
        },
    },
};

use tower::ServiceExt;

use common::get_json;

fn app(embeds: MockEmbedServiceTrait, matches: MockMatchServiceTrait) -> axum::Router {
    app_with_config(embeds, matches, AppConfig::default())
}

fn app_with_config(
    embeds: MockEmbedServiceTrait,
    matches: MockMatchServiceTrait,
    config: AppConfig,
) -> axum::Router {
    let services = AppServices::from_parts(
        Arc::new(embeds) as DynEmbedService,
        Arc::new(matches) as DynMatchService,
        Arc::new(config),
    );
    ApplicationServer::router(services)
}

fn preflight(uri: &str, origin: &str) -> Request<Body> {
    Request::builder()
        .method(Method::OPTIONS)
        .uri(uri)
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_blank_ids_never_reach_the_services() {
    let mut embeds = MockEmbedServiceTrait::new();
    embeds.expect_resolve_embed().never();
    let mut matches = MockMatchServiceTrait::new();
    matches.expect_list_channels().never();

    let router = app(embeds, matches);

    for uri in ["/vidsrc/", "/matches/", "/matches/%20%20"] {
        let (status, _) = get_json(router.clone(), uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn test_query_params_become_the_stream_request() {
    let mut embeds = MockEmbedServiceTrait::new();
    embeds
        .expect_resolve_embed()
        .withf(|req| req.content_id == "1396" && req.season == Some(2) && req.episode == Some(7))
        .times(1)
        .returning(|_| {
            Ok(StreamResult::hydrax(
                "https://cdn.example/s.m3u8",
                Some(RawValue::from_string("[]".to_string()).unwrap()),
            ))
        });

    let (status, body) = get_json(
        app(embeds, MockMatchServiceTrait::new()),
        "/vidsrc/1396?s=2&e=7",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["src"], "https://cdn.example/s.m3u8");
    assert_eq!(body["captions"], serde_json::json!([]));
}

#[tokio::test]
async fn test_extraction_failure_renders_as_not_found() {
    let mut embeds = MockEmbedServiceTrait::new();
    embeds.expect_resolve_embed().returning(|_| {
        Err(Error::ExtractionFailed(
            "vpro link not found in the response".to_string(),
        ))
    });

    let (status, body) = get_json(app(embeds, MockMatchServiceTrait::new()), "/vidsrc/550").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "vpro link not found in the response");
}

#[tokio::test]
async fn test_match_listing_goes_through_list_matches() {
    let mut matches = MockMatchServiceTrait::new();
    matches
        .expect_list_matches()
        .times(1)
        .returning(|| Ok(RawValue::from_string(r#"{"data":[]}"#.to_string()).unwrap()));
    matches.expect_list_channels().never();

    let (status, body) = get_json(app(MockEmbedServiceTrait::new(), matches), "/matches").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"data": []}));
}

#[tokio::test]
async fn test_health_reports_healthy() {
    let (status, body) = get_json(
        app(MockEmbedServiceTrait::new(), MockMatchServiceTrait::new()),
        "/health",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["environment"], "development");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_preflight_allows_any_origin_by_default() {
    let mut matches = MockMatchServiceTrait::new();
    matches.expect_list_matches().never();

    let response = app(MockEmbedServiceTrait::new(), matches)
        .oneshot(preflight("/matches", "https://frontend.example"))
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_plain_get_carries_allow_origin_header() {
    let response = app(MockEmbedServiceTrait::new(), MockMatchServiceTrait::new())
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://frontend.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_cors_allow_list_only_echoes_listed_origins() {
    let config = AppConfig {
        cors_origin: "https://a.example, https://b.example".to_string(),
        ..Default::default()
    };
    let router = app_with_config(
        MockEmbedServiceTrait::new(),
        MockMatchServiceTrait::new(),
        config,
    );

    let allowed = router
        .clone()
        .oneshot(preflight("/vidsrc/550", "https://b.example"))
        .await
        .unwrap();
    assert_eq!(
        allowed.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://b.example"
    );

    let denied = router
        .oneshot(preflight("/vidsrc/550", "https://c.example"))
        .await
        .unwrap();
    assert!(
        denied
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
