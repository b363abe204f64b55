//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the generation session endpoints and the
//! master definition for the OpenAPI specification.

use crate::error::{ApiError, ErrorBody};
use crate::web::{
    articles, generation_task::{generation_process, CANCELLED_REASON},
    protocol::{CommitBody, GenerationBody, HealthResponse, ReviseBody},
    settings,
    state::{AppState, GenerationControl},
};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Json,
    },
};
use chrono::Utc;
use futures::Stream;
use seo_writer_core::{
    domain::{GenerationRequest, NewArticle, SessionPhase},
    error::CoreError,
    export::ExportPayload,
    synthesizer,
};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        submit_generation_handler,
        current_session_handler,
        session_events_handler,
        cancel_generation_handler,
        revise_document_handler,
        commit_article_handler,
        download_current_handler,
        export_current_handler,
        articles::list_articles_handler,
        articles::article_stats_handler,
        articles::get_article_handler,
        articles::update_article_handler,
        articles::delete_article_handler,
        articles::download_article_handler,
        articles::export_article_handler,
        settings::get_settings_handler,
        settings::put_settings_handler,
        settings::export_settings_handler,
        settings::import_settings_handler,
    ),
    components(
        schemas(GenerationBody, ReviseBody, CommitBody, HealthResponse, ErrorBody)
    ),
    tags(
        (name = "SEO Writer API", description = "Generate, score, and manage SEO articles.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Shared Helpers
//=========================================================================================

/// A markdown file download with its suggested filename.
pub(crate) fn attachment(
    content_type: &'static str,
    filename: &str,
    body: String,
) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        body,
    )
}

pub(crate) const MARKDOWN: &str = "text/markdown; charset=utf-8";

/// The export payload of the current draft, if the session has one.
fn current_payload(control: &GenerationControl) -> Result<ExportPayload, ApiError> {
    let session = control.machine.session();
    match (session.phase, session.request.as_ref(), session.document.as_ref()) {
        (SessionPhase::Succeeded, Some(request), Some(document)) => {
            Ok(ExportPayload::from_document(&request.topic, document))
        }
        (SessionPhase::Failed, _, _) => Err(CoreError::Generation(
            session
                .error_reason
                .clone()
                .unwrap_or_else(|| "generation failed".to_string()),
        )
        .into()),
        (SessionPhase::Generating | SessionPhase::Validating, _, _) => {
            Err(CoreError::SessionBusy.into())
        }
        _ => Err(CoreError::Validation("no article has been generated".to_string()).into()),
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Start generating an article.
///
/// Returns immediately with the `generating` session; poll
/// `/generations/current` or subscribe to `/generations/events` for the result.
#[utoipa::path(
    post,
    path = "/generations",
    request_body = GenerationBody,
    responses(
        (status = 202, description = "Generation started; body is the session snapshot"),
        (status = 400, description = "Empty topic", body = ErrorBody),
        (status = 409, description = "A generation is already in progress", body = ErrorBody)
    )
)]
pub async fn submit_generation_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<GenerationBody>,
) -> Result<impl IntoResponse, ApiError> {
    let (tone, target, language) = {
        let settings = app_state.settings.read().await;
        (
            body.tone.unwrap_or(settings.default_tone),
            body.target_word_count.unwrap_or(settings.default_word_count),
            body.language.unwrap_or(settings.default_language),
        )
    };
    let request = GenerationRequest::new(&body.topic, &body.keywords, tone, target, language);

    let mut control = app_state.generation.lock().await;
    let attempt = control.machine.submit(request).map_err(|e| {
        warn!("Generation request rejected: {}", e);
        e
    })?;
    let request = control
        .machine
        .session()
        .request
        .clone()
        .ok_or_else(|| ApiError::Internal("submitted session has no request".to_string()))?;

    let token = app_state.shutdown.child_token();
    control.in_flight = Some(token.clone());
    let snapshot = control.machine.session().clone();
    app_state.publish(&snapshot);
    drop(control);

    tokio::spawn(generation_process(app_state.clone(), attempt, request, token));
    Ok((StatusCode::ACCEPTED, Json(snapshot)))
}

#[utoipa::path(
    get,
    path = "/generations/current",
    responses((status = 200, description = "The current session snapshot"))
)]
pub async fn current_session_handler(State(app_state): State<Arc<AppState>>) -> impl IntoResponse {
    let control = app_state.generation.lock().await;
    Json(control.machine.session().clone())
}

/// Server-sent events: the current snapshot, then one per change.
#[utoipa::path(
    get,
    path = "/generations/events",
    responses((status = 200, description = "text/event-stream of session snapshots"))
)]
pub async fn session_events_handler(
    State(app_state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = app_state.session_tx.subscribe();
    let stream = async_stream::stream! {
        loop {
            let snapshot = rx.borrow_and_update().clone();
            match Event::default().event("session").json_data(&snapshot) {
                Ok(event) => yield Ok::<Event, Infallible>(event),
                Err(e) => warn!("Failed to serialize session snapshot: {}", e),
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Cancel the in-flight generation. The session ends `failed`.
#[utoipa::path(
    delete,
    path = "/generations/current",
    responses(
        (status = 200, description = "Cancelled; body is the failed session"),
        (status = 400, description = "Nothing is generating", body = ErrorBody)
    )
)]
pub async fn cancel_generation_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let mut control = app_state.generation.lock().await;
    if control.machine.phase() != SessionPhase::Generating {
        return Err(CoreError::Validation("no generation is in progress".to_string()).into());
    }
    if let Some(token) = control.in_flight.take() {
        token.cancel();
    }
    let attempt = control.machine.session().attempt;
    control.machine.fail(attempt, CANCELLED_REASON);
    info!(%attempt, "Generation cancelled.");

    let snapshot = control.machine.session().clone();
    app_state.publish(&snapshot);
    Ok(Json(snapshot))
}

/// Replace the draft with edited markdown and re-score it.
#[utoipa::path(
    put,
    path = "/generations/current/document",
    request_body = ReviseBody,
    responses(
        (status = 200, description = "Re-scored session snapshot"),
        (status = 400, description = "No uncommitted draft", body = ErrorBody)
    )
)]
pub async fn revise_document_handler(
    State(app_state): State<Arc<AppState>>,
    Json(body): Json<ReviseBody>,
) -> Result<impl IntoResponse, ApiError> {
    let document = synthesizer::parse_markdown(&body.markdown);
    let mut control = app_state.generation.lock().await;
    control.machine.revise(document)?;

    let snapshot = control.machine.session().clone();
    app_state.publish(&snapshot);
    Ok(Json(snapshot))
}

/// Save the succeeded draft into the article history.
#[utoipa::path(
    post,
    path = "/generations/current/commit",
    request_body = CommitBody,
    responses(
        (status = 201, description = "The stored article"),
        (status = 400, description = "Nothing to commit", body = ErrorBody),
        (status = 502, description = "The generation failed", body = ErrorBody)
    )
)]
pub async fn commit_article_handler(
    State(app_state): State<Arc<AppState>>,
    body: Option<Json<CommitBody>>,
) -> Result<impl IntoResponse, ApiError> {
    let status = body.and_then(|Json(b)| b.status);
    let mut control = app_state.generation.lock().await;

    let new = {
        let source = control.machine.commit_source()?;
        let mut new = NewArticle::from_generation(
            source.request,
            source.document,
            source.assessment,
            Utc::now(),
        );
        if let Some(status) = status {
            new.status = status;
        }
        new
    };

    let article = {
        let mut articles = app_state.articles.write().await;
        let id = articles.insert(new);
        articles
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::Internal("inserted article vanished".to_string()))?
    };
    control.machine.mark_committed(article.id);
    app_state.publish(control.machine.session());
    info!("Committed article {} ({})", article.id, article.title);

    Ok((StatusCode::CREATED, Json(article)))
}

#[utoipa::path(
    get,
    path = "/generations/current/download",
    responses(
        (status = 200, description = "The draft as a markdown attachment"),
        (status = 400, description = "No draft", body = ErrorBody)
    )
)]
pub async fn download_current_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = current_payload(&*app_state.generation.lock().await)?;
    Ok(attachment(MARKDOWN, &payload.filename, payload.markdown))
}

#[utoipa::path(
    post,
    path = "/generations/current/export",
    responses(
        (status = 200, description = "Export receipt"),
        (status = 400, description = "No draft", body = ErrorBody)
    )
)]
pub async fn export_current_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = current_payload(&*app_state.generation.lock().await)?;
    let receipt = app_state.exporter.export(&payload).await?;
    Ok(Json(receipt))
}
