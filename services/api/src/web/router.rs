//! services/api/src/web/router.rs
//!
//! Assembles every route, the Swagger UI, and the HTTP layers into one router.

use crate::web::{articles, rest, rest::ApiDoc, settings, state::AppState};
use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn build_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(app_state.config.cors_origin.clone())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    let generation_routes = Router::new()
        .route("/generations", post(rest::submit_generation_handler))
        .route(
            "/generations/current",
            get(rest::current_session_handler).delete(rest::cancel_generation_handler),
        )
        .route("/generations/events", get(rest::session_events_handler))
        .route("/generations/current/document", put(rest::revise_document_handler))
        .route("/generations/current/commit", post(rest::commit_article_handler))
        .route("/generations/current/download", get(rest::download_current_handler))
        .route("/generations/current/export", post(rest::export_current_handler));

    let article_routes = Router::new()
        .route("/articles", get(articles::list_articles_handler))
        .route("/articles/stats", get(articles::article_stats_handler))
        .route(
            "/articles/{id}",
            get(articles::get_article_handler)
                .patch(articles::update_article_handler)
                .delete(articles::delete_article_handler),
        )
        .route("/articles/{id}/download", get(articles::download_article_handler))
        .route("/articles/{id}/export", post(articles::export_article_handler));

    let settings_routes = Router::new()
        .route(
            "/settings",
            get(settings::get_settings_handler).put(settings::put_settings_handler),
        )
        .route("/settings/export", get(settings::export_settings_handler))
        .route("/settings/import", post(settings::import_settings_handler));

    let api_router = Router::new()
        .route("/health", get(rest::health_handler))
        .merge(generation_routes)
        .merge(article_routes)
        .merge(settings_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
