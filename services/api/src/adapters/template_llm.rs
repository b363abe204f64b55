use async_trait::async_trait;
use seo_writer_core::{
    domain::{GenerationRequest, SynthesizedDocument},
    ports::{GenerationProvider, PortResult},
    synthesizer,
};
use std::time::Duration;
use tracing::debug;

/// Stands in for a language model: waits for the configured latency, then
/// expands the built-in article template.
pub struct TemplateGenerationAdapter {
    delay: Duration,
}

impl TemplateGenerationAdapter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl GenerationProvider for TemplateGenerationAdapter {
    async fn generate(&self, request: &GenerationRequest) -> PortResult<SynthesizedDocument> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let document = synthesizer::synthesize(request);
        debug!(
            topic = %request.topic,
            words = document.word_count(),
            "template article synthesized"
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seo_writer_core::domain::{Language, TargetWordCount, Tone};

    #[tokio::test]
    async fn generates_the_template_for_the_topic() {
        let adapter = TemplateGenerationAdapter::new(Duration::ZERO);
        let request = GenerationRequest::new(
            "Remote Work",
            "productivity",
            Tone::Professional,
            TargetWordCount::Words500,
            Language::English,
        );
        let document = adapter.generate(&request).await.unwrap();
        assert_eq!(document.title, "Remote Work");
        assert!(document.word_count() >= 500);
    }
}
