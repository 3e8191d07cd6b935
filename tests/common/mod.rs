// shared pieces for the route tests: a throwaway upstream on a random port that remembers every
// request it saw, and a couple of helpers to push requests through the real router
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::{self, Next},
    response::Response,
};
use stream_resolver::{
    AppConfig, ApplicationServer,
    server::services::app_services::AppServices,
};
use tower::ServiceExt;
use url::Url;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub referer: Option<String>,
    pub origin: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<RecordedRequest>>>);

impl Recorder {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.0.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.path).collect()
    }
}

async fn record(State(recorder): State<Recorder>, request: Request, next: Next) -> Response {
    // the borrow of `request` has to end before `next.run`, Body isn't Sync
    let recorded = {
        let header_value = |name: header::HeaderName| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string())
        };

        RecordedRequest {
            path: request.uri().path().to_string(),
            query: request.uri().query().map(|q| q.to_string()),
            referer: header_value(header::REFERER),
            origin: header_value(header::ORIGIN),
            user_agent: header_value(header::USER_AGENT),
        }
    };
    recorder.0.lock().unwrap().push(recorded);

    next.run(request).await
}

/// serves `routes` on 127.0.0.1 with a random port, unknown paths are a plain 404
pub async fn spawn_upstream(routes: Router) -> (Url, Recorder) {
    let recorder = Recorder::default();
    let app = routes
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(middleware::from_fn_with_state(recorder.clone(), record));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (Url::parse(&format!("http://{}/", addr)).unwrap(), recorder)
}

/// an address nothing listens on anymore
pub async fn dead_upstream() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}/", addr)).unwrap()
}

pub fn config_for(upstream: &Url) -> AppConfig {
    AppConfig {
        embed_base_url: upstream.clone(),
        match_api_base_url: upstream.clone(),
        upstream_timeout_secs: 5,
        ..Default::default()
    }
}

pub fn app_with(config: AppConfig) -> Router {
    let services = AppServices::new(Arc::new(config)).unwrap();
    ApplicationServer::router(services)
}

pub async fn get_raw(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get_raw(app, uri).await;
    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

pub fn embed_page(vpro: Option<&str>, imdb_id: Option<&str>) -> String {
    let mut script = String::new();
    if let Some(id) = imdb_id {
        script.push_str(&format!("const imdbId = \"{}\";\n", id));
    }
    if let Some(src) = vpro {
        script.push_str(&format!("const vpro = \"{}\";\n", src));
    }
    format!(
        "<!DOCTYPE html><html><head><title>player</title></head><body><script>\n{}</script></body></html>",
        script
    )
}
