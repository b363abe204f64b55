//! services/api/src/adapters/settings_store.rs
//!
//! Persistence for the single settings record.

use async_trait::async_trait;
use seo_writer_core::{
    ports::{PortError, PortResult, SettingsStore},
    settings::Settings,
};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Keeps settings as the exported JSON document on disk.
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SettingsStore for JsonFileSettingsStore {
    async fn load(&self) -> PortResult<Option<Settings>> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PortError::Unexpected(e.to_string())),
        };
        Settings::import(&text)
            .map(Some)
            .map_err(|e| PortError::Unexpected(format!("{}: {}", self.path.display(), e)))
    }

    /// Writes to a sibling temp file and renames it over the target, so a
    /// crash never leaves a half-written record behind.
    async fn save(&self, settings: &Settings) -> PortResult<()> {
        let text = settings
            .export()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| PortError::Unexpected(e.to_string()))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, text)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))
    }
}

#[derive(Default)]
pub struct InMemorySettingsStore {
    inner: RwLock<Option<Settings>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load(&self) -> PortResult<Option<Settings>> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, settings: &Settings) -> PortResult<()> {
        *self.inner.write().await = Some(settings.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seo_writer_core::settings::Theme;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("seo-writer-{}", uuid::Uuid::new_v4()))
            .join("settings.json")
    }

    #[tokio::test]
    async fn file_store_round_trips_and_starts_empty() {
        let path = scratch_path();
        let store = JsonFileSettingsStore::new(&path);
        assert!(store.load().await.unwrap().is_none());

        let settings = Settings {
            name: "John Doe".into(),
            theme: Theme::Dark,
            ..Settings::default()
        };
        store.save(&settings).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(settings));
        assert!(!path.with_extension("json.tmp").exists());

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[tokio::test]
    async fn malformed_file_is_an_error() {
        let path = scratch_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        let store = JsonFileSettingsStore::new(&path);
        assert!(store.load().await.is_err());
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
