mod common;

use axum::http::{header, Method, StatusCode};
use common::{send, send_text, test_app, test_config, InstantProvider};
use seo_writer_core::ports::SettingsStore;
use serde_json::{json, Value};
use std::sync::Arc;

fn full_settings() -> Value {
    json!({
        "name": "John Doe",
        "email": "john@example.com",
        "bio": "Content writer and SEO specialist",
        "apiKey": "sk-secret-9876",
        "defaultLanguage": "english",
        "defaultTone": "professional",
        "defaultWordCount": 1000,
        "theme": "dark",
        "emailNotifications": true,
        "autoSave": false,
        "showSeoTips": true
    })
}

#[tokio::test]
async fn defaults_are_served_before_anything_is_saved() {
    let (_state, app) = test_app(Arc::new(InstantProvider), test_config()).await;
    let (status, settings) = send(&app, Method::GET, "/settings", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["defaultLanguage"], "english");
    assert_eq!(settings["defaultTone"], "professional");
    assert_eq!(settings["defaultWordCount"], 1000);
    assert_eq!(settings["theme"], "light");
    assert_eq!(settings["autoSave"], true);
    assert_eq!(settings["apiKey"], "");
}

#[tokio::test]
async fn saved_api_key_is_redacted_but_exported_in_full() {
    let (state, app) = test_app(Arc::new(InstantProvider), test_config()).await;

    let (status, saved) = send(&app, Method::PUT, "/settings", Some(full_settings())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["apiKey"], "****9876");
    assert_eq!(saved["theme"], "dark");

    // Echoing the masked key back keeps the real one.
    let (status, _) = send(&app, Method::PUT, "/settings", Some(saved)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.settings.read().await.api_key, "sk-secret-9876");

    let (status, headers, text) = send_text(&app, Method::GET, "/settings/export", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers[header::CONTENT_DISPOSITION].to_str().unwrap(),
        "attachment; filename=\"seo-writer-settings.json\""
    );
    let exported: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(exported, full_settings());

    let stored = state.settings_store.load().await.unwrap().unwrap();
    assert_eq!(stored.api_key, "sk-secret-9876");
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let (_state, app) = test_app(Arc::new(InstantProvider), test_config()).await;
    let mut settings = full_settings();
    settings["email"] = json!("john.example.com");
    let (status, body) = send(&app, Method::PUT, "/settings", Some(settings)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn import_replaces_settings() {
    let (_state, app) = test_app(Arc::new(InstantProvider), test_config()).await;
    let mut settings = full_settings();
    settings["name"] = json!("Jane Roe");
    settings["defaultWordCount"] = json!(2500);

    let (status, _, text) = send_text(&app, Method::POST, "/settings/import", &settings.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    let imported: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(imported["name"], "Jane Roe");
    assert_eq!(imported["apiKey"], "****9876");

    let (_, current) = send(&app, Method::GET, "/settings", None).await;
    assert_eq!(current["defaultWordCount"], 2500);
}

#[tokio::test]
async fn malformed_import_keeps_existing_settings() {
    let (_state, app) = test_app(Arc::new(InstantProvider), test_config()).await;
    send(&app, Method::PUT, "/settings", Some(full_settings())).await;

    let mut unknown = full_settings();
    unknown["fontSize"] = json!(14);
    let mut missing = full_settings();
    missing.as_object_mut().unwrap().remove("bio");
    let mut out_of_range = full_settings();
    out_of_range["defaultWordCount"] = json!(750);

    for body in [
        "definitely not json".to_string(),
        unknown.to_string(),
        missing.to_string(),
        out_of_range.to_string(),
    ] {
        let (status, _, text) = send_text(&app, Method::POST, "/settings/import", &body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        let error: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(error["code"], "IMPORT_FORMAT");
    }

    let (_, current) = send(&app, Method::GET, "/settings", None).await;
    assert_eq!(current["name"], "John Doe");
    assert_eq!(current["theme"], "dark");
}
