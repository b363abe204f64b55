//! crates/seo_writer_core/src/repository.rs
//!
//! The in-memory article repository. It owns every `Article`; readers get
//! slices or clones, never mutable access.

use chrono::{DateTime, Utc};
use std::collections::HashSet;
use uuid::Uuid;

use crate::domain::{
    Article, ArticlePatch, ArticleStatus, GenerationRequest, NewArticle, SeoAssessment,
    SynthesizedDocument,
};
use crate::error::{CoreError, CoreResult};
use crate::{keywords, synthesizer};

impl NewArticle {
    /// Turns a succeeded session's output into a draft record.
    pub fn from_generation(
        request: &GenerationRequest,
        document: &SynthesizedDocument,
        assessment: &SeoAssessment,
        created_at: DateTime<Utc>,
    ) -> Self {
        let title = if document.title.trim().is_empty() {
            request.topic.clone()
        } else {
            document.title.clone()
        };
        Self {
            title,
            topic: request.topic.clone(),
            word_count: u32::try_from(document.word_count()).unwrap_or(u32::MAX),
            seo_score: assessment.score,
            created_at,
            status: ArticleStatus::Draft,
            keywords: request.keywords.clone(),
            content: synthesizer::render_markdown(document),
        }
    }
}

/// Insertion-ordered article storage.
#[derive(Debug, Default)]
pub struct ArticleRepository {
    articles: Vec<Article>,
    /// Every id ever handed out, so ids stay unique after deletes.
    issued: HashSet<Uuid>,
}

impl ArticleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, new: NewArticle) -> Uuid {
        let mut id = Uuid::new_v4();
        while !self.issued.insert(id) {
            id = Uuid::new_v4();
        }
        self.articles.push(Article {
            id,
            title: new.title,
            topic: new.topic,
            word_count: new.word_count,
            seo_score: new.seo_score.min(100),
            created_at: new.created_at,
            status: new.status,
            keywords: keywords::normalize_terms(&new.keywords),
            content: new.content,
        });
        id
    }

    pub fn get(&self, id: Uuid) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// Applies `patch` to the article. Validation happens before any field
    /// is touched, so a rejected patch changes nothing.
    pub fn update(&mut self, id: Uuid, patch: ArticlePatch) -> CoreResult<Article> {
        let article = self
            .articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| not_found(id))?;

        let title = patch.title.map(|t| t.trim().to_string());
        let topic = patch.topic.map(|t| t.trim().to_string());
        if title.as_deref() == Some("") {
            return Err(CoreError::Validation("title must not be empty".into()));
        }
        if topic.as_deref() == Some("") {
            return Err(CoreError::Validation("topic must not be empty".into()));
        }

        if let Some(title) = title {
            article.title = title;
        }
        if let Some(topic) = topic {
            article.topic = topic;
        }
        if let Some(status) = patch.status {
            article.status = status;
        }
        if let Some(terms) = patch.keywords {
            article.keywords = keywords::normalize_terms(&terms);
        }
        if let Some(content) = patch.content {
            let words = synthesizer::parse_markdown(&content).word_count();
            article.word_count = u32::try_from(words).unwrap_or(u32::MAX);
            article.content = content;
        }
        Ok(article.clone())
    }

    pub fn delete(&mut self, id: Uuid) -> CoreResult<()> {
        let index = self
            .articles
            .iter()
            .position(|a| a.id == id)
            .ok_or_else(|| not_found(id))?;
        self.articles.remove(index);
        Ok(())
    }

    pub fn list(&self) -> &[Article] {
        &self.articles
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

fn not_found(id: Uuid) -> CoreError {
    CoreError::NotFound {
        entity: "Article",
        id: id.to_string(),
    }
}
