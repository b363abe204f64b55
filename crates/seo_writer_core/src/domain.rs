//! crates/seo_writer_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs carry no I/O; serde derives only describe their JSON shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::keywords;
use crate::text;

//=========================================================================================
// Generation Request
//=========================================================================================

/// The writing tone requested for an article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Casual,
    Friendly,
    Authoritative,
    Conversational,
}

/// Languages offered by the writer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Italian,
}

/// The fixed set of article lengths a user can ask for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TargetWordCount {
    Words500,
    #[default]
    Words1000,
    Words1500,
    Words2000,
    Words2500,
}

impl TargetWordCount {
    pub const ALL: [TargetWordCount; 5] = [
        TargetWordCount::Words500,
        TargetWordCount::Words1000,
        TargetWordCount::Words1500,
        TargetWordCount::Words2000,
        TargetWordCount::Words2500,
    ];

    pub fn words(self) -> u32 {
        match self {
            TargetWordCount::Words500 => 500,
            TargetWordCount::Words1000 => 1000,
            TargetWordCount::Words1500 => 1500,
            TargetWordCount::Words2000 => 2000,
            TargetWordCount::Words2500 => 2500,
        }
    }
}

impl TryFrom<u32> for TargetWordCount {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        TargetWordCount::ALL
            .into_iter()
            .find(|target| target.words() == value)
            .ok_or_else(|| {
                format!("unsupported word count {value}, expected one of 500, 1000, 1500, 2000, 2500")
            })
    }
}

impl From<TargetWordCount> for u32 {
    fn from(value: TargetWordCount) -> Self {
        value.words()
    }
}

/// Everything the synthesizer needs to produce one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub topic: String,
    pub keywords: Vec<String>,
    pub tone: Tone,
    pub target_word_count: TargetWordCount,
    pub language: Language,
}

impl GenerationRequest {
    /// Builds a request from raw form input: the topic is trimmed and the
    /// keyword text is normalized into an ordered term set.
    pub fn new(
        topic: &str,
        raw_keywords: &str,
        tone: Tone,
        target_word_count: TargetWordCount,
        language: Language,
    ) -> Self {
        Self {
            topic: topic.trim().to_string(),
            keywords: keywords::normalize(raw_keywords),
            tone,
            target_word_count,
            language,
        }
    }
}

//=========================================================================================
// Synthesized Document
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    pub fn depth(self) -> u8 {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(HeadingLevel::H1),
            2 => Ok(HeadingLevel::H2),
            3 => Ok(HeadingLevel::H3),
            other => Err(format!("unsupported heading level {other}")),
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(value: HeadingLevel) -> Self {
        value.depth()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    pub level: HeadingLevel,
    pub body: String,
}

/// A structured article: a title and its ordered, leveled sections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SynthesizedDocument {
    pub title: String,
    pub sections: Vec<Section>,
}

impl SynthesizedDocument {
    /// Words across every heading and body.
    pub fn word_count(&self) -> usize {
        self.sections
            .iter()
            .map(|s| text::word_count(&s.heading) + text::word_count(&s.body))
            .sum()
    }

    pub fn to_markdown(&self) -> String {
        crate::synthesizer::render_markdown(self)
    }
}

//=========================================================================================
// SEO Assessment
//=========================================================================================

/// The six canonical rubric rules, in checklist order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RubricRule {
    TitleOptimization,
    MetaDescription,
    HeaderStructure,
    KeywordDensity,
    ContentLength,
    Readability,
}

impl RubricRule {
    pub const ALL: [RubricRule; 6] = [
        RubricRule::TitleOptimization,
        RubricRule::MetaDescription,
        RubricRule::HeaderStructure,
        RubricRule::KeywordDensity,
        RubricRule::ContentLength,
        RubricRule::Readability,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RubricRule::TitleOptimization => "Title Optimization",
            RubricRule::MetaDescription => "Meta Description",
            RubricRule::HeaderStructure => "Header Structure",
            RubricRule::KeywordDensity => "Keyword Density",
            RubricRule::ContentLength => "Content Length",
            RubricRule::Readability => "Readability",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RubricRule::TitleOptimization => "Title contains target keywords",
            RubricRule::MetaDescription => "Compelling meta description under 160 characters",
            RubricRule::HeaderStructure => "Proper H1, H2, H3 hierarchy",
            RubricRule::KeywordDensity => "Optimal keyword density (1-3%)",
            RubricRule::ContentLength => "Adequate word count for topic coverage",
            RubricRule::Readability => "Content is easy to read and understand",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RubricStatus {
    Pending,
    Passed,
    Warning,
    Failed,
}

impl RubricStatus {
    /// Higher is worse. `Pending` sorts below every resolved status.
    pub fn severity(self) -> u8 {
        match self {
            RubricStatus::Pending => 0,
            RubricStatus::Passed => 1,
            RubricStatus::Warning => 2,
            RubricStatus::Failed => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricItem {
    pub rule: RubricRule,
    pub name: String,
    pub status: RubricStatus,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl RubricItem {
    pub fn new(rule: RubricRule, status: RubricStatus, detail: Option<String>) -> Self {
        Self {
            rule,
            name: rule.name().to_string(),
            status,
            description: rule.description().to_string(),
            detail,
        }
    }
}

/// The label shown next to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreGrade {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl ScoreGrade {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => ScoreGrade::Excellent,
            80..=89 => ScoreGrade::Good,
            70..=79 => ScoreGrade::Fair,
            _ => ScoreGrade::NeedsImprovement,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreGrade::Excellent => "Excellent",
            ScoreGrade::Good => "Good",
            ScoreGrade::Fair => "Fair",
            ScoreGrade::NeedsImprovement => "Needs Improvement",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoAssessment {
    pub score: u8,
    pub checklist: Vec<RubricItem>,
}

impl SeoAssessment {
    /// The assessment shown before any document exists.
    pub fn pending() -> Self {
        Self {
            score: 0,
            checklist: RubricRule::ALL
                .into_iter()
                .map(|rule| RubricItem::new(rule, RubricStatus::Pending, None))
                .collect(),
        }
    }

    pub fn grade(&self) -> ScoreGrade {
        ScoreGrade::from_score(self.score)
    }

    pub fn worst_status(&self) -> RubricStatus {
        self.checklist
            .iter()
            .map(|item| item.status)
            .max_by_key(|status| status.severity())
            .unwrap_or(RubricStatus::Pending)
    }
}

//=========================================================================================
// Generation Session
//=========================================================================================

/// Sequence number of an accepted submit. Results carrying an older
/// attempt than the session's current one are stale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttemptId(u64);

impl AttemptId {
    pub fn next(self) -> Self {
        AttemptId(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Idle,
    Validating,
    Generating,
    Succeeded,
    Failed,
}

/// What a caller observes about the current generation attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSession {
    pub attempt: AttemptId,
    pub request: Option<GenerationRequest>,
    pub phase: SessionPhase,
    pub document: Option<SynthesizedDocument>,
    pub assessment: Option<SeoAssessment>,
    pub error_reason: Option<String>,
    pub committed_article_id: Option<Uuid>,
}

//=========================================================================================
// Articles
//=========================================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    Published,
    #[default]
    Draft,
    Archived,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Published,
    Draft,
    Archived,
}

impl StatusFilter {
    pub fn matches(self, status: ArticleStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Published => status == ArticleStatus::Published,
            StatusFilter::Draft => status == ArticleStatus::Draft,
            StatusFilter::Archived => status == ArticleStatus::Archived,
        }
    }
}

/// A stored article record. Owned by the `ArticleRepository`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub topic: String,
    pub word_count: u32,
    pub seo_score: u8,
    pub created_at: DateTime<Utc>,
    pub status: ArticleStatus,
    pub keywords: Vec<String>,
    /// Markdown body, empty for records that were never generated here.
    #[serde(default)]
    pub content: String,
}

/// An article before the repository has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle {
    pub title: String,
    pub topic: String,
    pub word_count: u32,
    pub seo_score: u8,
    pub created_at: DateTime<Utc>,
    pub status: ArticleStatus,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub content: String,
}

/// A partial edit of an article. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArticlePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub status: Option<ArticleStatus>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub content: Option<String>,
}
