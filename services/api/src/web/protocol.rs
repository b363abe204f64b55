//! services/api/src/web/protocol.rs
//!
//! Request and response payloads of the HTTP API that are not core records.
//! Core records (`GenerationSession`, `Article`, `Settings`, ...) are sent as
//! their own camelCase JSON.

use seo_writer_core::domain::{ArticleStatus, Language, StatusFilter, TargetWordCount, Tone};
use seo_writer_core::query::{ArticleStats, StatsPeriod};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

//=========================================================================================
// Generation
//=========================================================================================

/// Form input for a new generation. Omitted options fall back to the
/// user's default settings.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationBody {
    pub topic: String,
    /// Comma-separated keywords.
    #[serde(default)]
    pub keywords: String,
    #[schema(value_type = Option<String>, example = "professional")]
    pub tone: Option<Tone>,
    #[schema(value_type = Option<u32>, example = 1000)]
    pub target_word_count: Option<TargetWordCount>,
    #[schema(value_type = Option<String>, example = "english")]
    pub language: Option<Language>,
}

/// A user-edited version of the current draft.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviseBody {
    pub markdown: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CommitBody {
    /// Defaults to `draft`.
    #[schema(value_type = Option<String>, example = "draft")]
    pub status: Option<ArticleStatus>,
}

//=========================================================================================
// Articles
//=========================================================================================

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ArticleQuery {
    /// Case-insensitive match against title, topic and keywords.
    pub search: Option<String>,
    #[param(value_type = Option<String>)]
    pub status: Option<StatusFilter>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatsQuery {
    /// Calendar month as `YYYY-MM`; the current month when omitted.
    pub period: Option<String>,
    pub search: Option<String>,
    #[param(value_type = Option<String>)]
    pub status: Option<StatusFilter>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    #[serde(flatten)]
    pub stats: ArticleStats,
    pub period: StatsPeriod,
}

//=========================================================================================
// Misc
//=========================================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}
