//! services/api/src/web/articles.rs
//!
//! Handlers for the article history: search, stats, edit, delete, download.

use crate::error::{ApiError, ErrorBody};
use crate::web::{
    protocol::{ArticleQuery, StatsQuery, StatsResponse},
    rest::{attachment, MARKDOWN},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::Utc;
use seo_writer_core::{
    domain::{Article, ArticlePatch},
    error::CoreError,
    export::ExportPayload,
    query::{self, StatsPeriod},
    synthesizer,
};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

fn not_found(id: Uuid) -> ApiError {
    CoreError::NotFound {
        entity: "Article",
        id: id.to_string(),
    }
    .into()
}

fn payload_for(article: &Article) -> ExportPayload {
    ExportPayload::from_document(&article.topic, &synthesizer::parse_markdown(&article.content))
}

#[utoipa::path(
    get,
    path = "/articles",
    params(ArticleQuery),
    responses((status = 200, description = "Matching articles in creation order"))
)]
pub async fn list_articles_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<ArticleQuery>,
) -> Json<Vec<Article>> {
    let articles = app_state.articles.read().await;
    let matches = query::query(
        articles.list(),
        params.search.as_deref().unwrap_or(""),
        params.status.unwrap_or_default(),
    );
    Json(matches.into_iter().cloned().collect())
}

/// Totals over the same view `/articles` would return for these filters.
#[utoipa::path(
    get,
    path = "/articles/stats",
    params(StatsQuery),
    responses(
        (status = 200, description = "Aggregate stats"),
        (status = 400, description = "Malformed period", body = ErrorBody)
    )
)]
pub async fn article_stats_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<StatsResponse>, ApiError> {
    let period = match params.period.as_deref() {
        Some(month) => StatsPeriod::parse_month(month)?,
        None => StatsPeriod::containing(Utc::now())?,
    };
    let articles = app_state.articles.read().await;
    let view = query::query(
        articles.list(),
        params.search.as_deref().unwrap_or(""),
        params.status.unwrap_or_default(),
    );
    Ok(Json(StatsResponse {
        stats: query::stats(view, &period),
        period,
    }))
}

#[utoipa::path(
    get,
    path = "/articles/{id}",
    params(("id" = Uuid, Path, description = "Article id")),
    responses(
        (status = 200, description = "The article"),
        (status = 404, description = "No such article", body = ErrorBody)
    )
)]
pub async fn get_article_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Article>, ApiError> {
    let articles = app_state.articles.read().await;
    articles.get(id).cloned().map(Json).ok_or_else(|| not_found(id))
}

#[utoipa::path(
    patch,
    path = "/articles/{id}",
    params(("id" = Uuid, Path, description = "Article id")),
    request_body(content_type = "application/json", description = "Any of title, topic, status, keywords, content."),
    responses(
        (status = 200, description = "The updated article"),
        (status = 400, description = "Empty title or topic", body = ErrorBody),
        (status = 404, description = "No such article", body = ErrorBody)
    )
)]
pub async fn update_article_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ArticlePatch>,
) -> Result<Json<Article>, ApiError> {
    let updated = app_state.articles.write().await.update(id, patch)?;
    info!("Updated article {}", id);
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/articles/{id}",
    params(("id" = Uuid, Path, description = "Article id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No such article", body = ErrorBody)
    )
)]
pub async fn delete_article_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app_state.articles.write().await.delete(id)?;
    info!("Deleted article {}", id);
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/articles/{id}/download",
    params(("id" = Uuid, Path, description = "Article id")),
    responses(
        (status = 200, description = "The article as a markdown attachment"),
        (status = 404, description = "No such article", body = ErrorBody)
    )
)]
pub async fn download_article_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let articles = app_state.articles.read().await;
    let article = articles.get(id).ok_or_else(|| not_found(id))?;
    let payload = payload_for(article);
    Ok(attachment(MARKDOWN, &payload.filename, payload.markdown))
}

#[utoipa::path(
    post,
    path = "/articles/{id}/export",
    params(("id" = Uuid, Path, description = "Article id")),
    responses(
        (status = 200, description = "Export receipt"),
        (status = 404, description = "No such article", body = ErrorBody)
    )
)]
pub async fn export_article_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = {
        let articles = app_state.articles.read().await;
        let article = articles.get(id).ok_or_else(|| not_found(id))?;
        payload_for(article)
    };
    let receipt = app_state.exporter.export(&payload).await?;
    Ok(Json(receipt))
}
