//! services/api/src/web/settings.rs

use crate::error::{ApiError, ErrorBody};
use crate::web::{rest::attachment, state::AppState};
use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use seo_writer_core::settings::{Settings, EXPORT_FILENAME};
use std::sync::Arc;
use tracing::info;

/// Saves through the store first; the in-memory copy changes only if that worked.
async fn replace_settings(app_state: &AppState, settings: Settings) -> Result<Settings, ApiError> {
    app_state.settings_store.save(&settings).await?;
    let redacted = settings.redacted();
    *app_state.settings.write().await = settings;
    Ok(redacted)
}

/// Current settings with the API key masked.
#[utoipa::path(
    get,
    path = "/settings",
    responses((status = 200, description = "Settings, API key redacted"))
)]
pub async fn get_settings_handler(State(app_state): State<Arc<AppState>>) -> Json<Settings> {
    Json(app_state.settings.read().await.redacted())
}

#[utoipa::path(
    put,
    path = "/settings",
    request_body(content_type = "application/json", description = "The complete settings record."),
    responses(
        (status = 200, description = "Saved settings, API key redacted"),
        (status = 400, description = "Invalid settings", body = ErrorBody)
    )
)]
pub async fn put_settings_handler(
    State(app_state): State<Arc<AppState>>,
    Json(mut settings): Json<Settings>,
) -> Result<Json<Settings>, ApiError> {
    settings.validate()?;
    {
        // A masked key echoed back from GET keeps the stored key.
        let current = app_state.settings.read().await;
        if !current.api_key.is_empty() && settings.api_key == current.redacted().api_key {
            settings.api_key = current.api_key.clone();
        }
    }
    let saved = replace_settings(&app_state, settings).await?;
    info!("Settings saved.");
    Ok(Json(saved))
}

/// The full settings record as a downloadable JSON file.
#[utoipa::path(
    get,
    path = "/settings/export",
    responses((status = 200, description = "seo-writer-settings.json attachment"))
)]
pub async fn export_settings_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let text = app_state.settings.read().await.export()?;
    Ok(attachment("application/json", EXPORT_FILENAME, text))
}

/// Replace settings from a previously exported file. A malformed file
/// leaves the current settings untouched.
#[utoipa::path(
    post,
    path = "/settings/import",
    request_body(content_type = "text/plain", description = "Exported settings JSON."),
    responses(
        (status = 200, description = "Imported settings, API key redacted"),
        (status = 400, description = "Not a settings export", body = ErrorBody)
    )
)]
pub async fn import_settings_handler(
    State(app_state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<Settings>, ApiError> {
    let settings = Settings::import(&body)?;
    let saved = replace_settings(&app_state, settings).await?;
    info!("Settings imported.");
    Ok(Json(saved))
}
