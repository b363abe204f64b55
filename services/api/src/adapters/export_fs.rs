use async_trait::async_trait;
use seo_writer_core::{
    export::{ExportPayload, ExportReceipt},
    ports::{DocumentExporter, PortError, PortResult},
};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes exported articles as markdown files into one directory.
pub struct FsExporter {
    dir: PathBuf,
}

impl FsExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

/// Only the final path component of a suggested name is used.
fn file_name_only(name: &str) -> String {
    Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("article.md")
        .to_string()
}

#[async_trait]
impl DocumentExporter for FsExporter {
    async fn export(&self, payload: &ExportPayload) -> PortResult<ExportReceipt> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let path = self.dir.join(file_name_only(&payload.filename));
        tokio::fs::write(&path, payload.markdown.as_bytes())
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        info!("Exported article to {}", path.display());
        Ok(ExportReceipt {
            location: path.display().to_string(),
            bytes: payload.markdown.len() as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_components_are_stripped() {
        assert_eq!(file_name_only("../../etc/passwd"), "passwd");
        assert_eq!(file_name_only("remote-work.md"), "remote-work.md");
        assert_eq!(file_name_only(".."), "article.md");
    }

    #[tokio::test]
    async fn writes_markdown_into_the_export_dir() {
        let dir = std::env::temp_dir().join(format!("seo-writer-export-{}", uuid::Uuid::new_v4()));
        let exporter = FsExporter::new(&dir);
        let payload = ExportPayload {
            filename: "nested/remote-work.md".into(),
            markdown: "# Remote Work\n".into(),
            meta_description: None,
        };
        let receipt = exporter.export(&payload).await.unwrap();
        assert_eq!(receipt.bytes, 14);
        let written = std::fs::read_to_string(dir.join("remote-work.md")).unwrap();
        assert_eq!(written, "# Remote Work\n");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
