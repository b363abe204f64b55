//! crates/seo_writer_core/src/export.rs

use serde::{Deserialize, Serialize};

use crate::domain::SynthesizedDocument;
use crate::{seo, synthesizer};

/// `"Remote Work"` becomes `remote-work.md`. Quotes, slashes and control
/// characters are dropped so the name is safe in a header and on disk.
pub fn suggested_filename(topic: &str) -> String {
    let stem = topic
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| !matches!(c, '"' | '\\' | '/') && !c.is_control())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if stem.is_empty() {
        "article.md".to_string()
    } else {
        format!("{stem}.md")
    }
}

/// Everything an exporter needs to write one article out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub filename: String,
    pub markdown: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
}

impl ExportPayload {
    pub fn from_document(topic: &str, document: &SynthesizedDocument) -> Self {
        Self {
            filename: suggested_filename(topic),
            markdown: synthesizer::render_markdown(document),
            meta_description: seo::meta_description(document).map(|m| m.text),
        }
    }
}

/// Where an exporter put the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReceipt {
    pub location: String,
    pub bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GenerationRequest, Language, TargetWordCount, Tone};
    use crate::synthesizer::synthesize;

    #[test]
    fn filenames_are_slugged() {
        assert_eq!(suggested_filename("Remote Work"), "remote-work.md");
        assert_eq!(suggested_filename("  AI   in Healthcare "), "ai-in-healthcare.md");
        assert_eq!(suggested_filename("   "), "article.md");
        assert_eq!(suggested_filename("Say \"Hi\" / Bye"), "say-hi-bye.md");
        assert_eq!(suggested_filename("\"\" //"), "article.md");
    }

    #[test]
    fn payload_carries_markdown_and_meta() {
        let request = GenerationRequest::new(
            "Remote Work",
            "",
            Tone::Casual,
            TargetWordCount::Words500,
            Language::English,
        );
        let document = synthesize(&request);
        let payload = ExportPayload::from_document(&request.topic, &document);
        assert_eq!(payload.filename, "remote-work.md");
        assert!(payload.markdown.starts_with("# Remote Work"));
        let meta = payload.meta_description.unwrap();
        assert!(!meta.is_empty() && meta.chars().count() <= 160);
    }
}
