#![allow(dead_code)]

use api_lib::{
    adapters::{FsExporter, InMemorySettingsStore},
    config::Config,
    web::{build_router, AppState},
};
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use seo_writer_core::{
    domain::{GenerationRequest, SynthesizedDocument},
    ports::{GenerationProvider, PortError, PortResult},
    synthesizer,
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tower::util::ServiceExt;

/// Synthesizes immediately.
pub struct InstantProvider;

#[async_trait]
impl GenerationProvider for InstantProvider {
    async fn generate(&self, request: &GenerationRequest) -> PortResult<SynthesizedDocument> {
        Ok(synthesizer::synthesize(request))
    }
}

/// Holds every generation until `release` is notified once per attempt.
#[derive(Default)]
pub struct GatedProvider {
    pub release: Notify,
}

#[async_trait]
impl GenerationProvider for GatedProvider {
    async fn generate(&self, request: &GenerationRequest) -> PortResult<SynthesizedDocument> {
        self.release.notified().await;
        Ok(synthesizer::synthesize(request))
    }
}

pub struct FailingProvider;

#[async_trait]
impl GenerationProvider for FailingProvider {
    async fn generate(&self, _request: &GenerationRequest) -> PortResult<SynthesizedDocument> {
        Err(PortError::Unexpected("model unavailable".to_string()))
    }
}

pub fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!("seo-writer-test-{}", uuid::Uuid::new_v4()))
}

pub async fn test_app(generator: Arc<dyn GenerationProvider>, config: Config) -> (Arc<AppState>, Router) {
    let exporter = Arc::new(FsExporter::new(config.export_dir.clone()));
    let state = AppState::new(
        Arc::new(config),
        generator,
        exporter,
        Arc::new(InMemorySettingsStore::new()),
    )
    .await;
    let app = build_router(state.clone());
    (state, app)
}

pub fn test_config() -> Config {
    Config {
        export_dir: scratch_dir(),
        ..Config::default()
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub async fn send_text(
    app: &Router,
    method: Method,
    uri: &str,
    body: &str,
) -> (StatusCode, HeaderMap, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "text/plain")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

/// Polls `/generations/current` until the session reaches `phase`.
pub async fn wait_for_phase(app: &Router, phase: &str) -> Value {
    for _ in 0..200 {
        let (_, session) = send(app, Method::GET, "/generations/current", None).await;
        if session["phase"] == phase {
            return session;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("session never reached phase {phase}");
}
