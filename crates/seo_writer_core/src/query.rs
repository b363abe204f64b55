//! crates/seo_writer_core/src/query.rs
//!
//! Read-only search, filtering and aggregation over an article snapshot.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::Serialize;

use crate::domain::{Article, StatusFilter};
use crate::error::{CoreError, CoreResult};

/// Articles whose status matches `filter` and whose title, topic or any
/// keyword contains `search_term` (case-insensitive). A blank term matches
/// everything. Input order is preserved.
pub fn query<'a>(collection: &'a [Article], search_term: &str, filter: StatusFilter) -> Vec<&'a Article> {
    let needle = search_term.trim().to_lowercase();
    collection
        .iter()
        .filter(|article| filter.matches(article.status))
        .filter(|article| needle.is_empty() || matches_term(article, &needle))
        .collect()
}

fn matches_term(article: &Article, needle: &str) -> bool {
    article.title.to_lowercase().contains(needle)
        || article.topic.to_lowercase().contains(needle)
        || article.keywords.iter().any(|k| k.to_lowercase().contains(needle))
}

/// A half-open UTC time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl StatsPeriod {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> CoreResult<Self> {
        if end < start {
            return Err(CoreError::Validation("period ends before it starts".into()));
        }
        Ok(Self { start, end })
    }

    /// The calendar month `year`-`month`.
    pub fn month(year: i32, month: u32) -> CoreResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::Validation(format!("{month} is not a calendar month")));
        }
        let (next_year, next_month) = if month == 12 {
            let next = year
                .checked_add(1)
                .ok_or_else(|| CoreError::Validation(format!("year {year} is out of range")))?;
            (next, 1)
        } else {
            (year, month + 1)
        };
        let start = month_start(year, month)?;
        let end = month_start(next_year, next_month)?;
        Ok(Self { start, end })
    }

    /// Parses `YYYY-MM`.
    pub fn parse_month(value: &str) -> CoreResult<Self> {
        let invalid = || CoreError::Validation(format!("invalid period '{value}', expected YYYY-MM"));
        let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::month(year, month).map_err(|_| invalid())
    }

    /// The calendar month containing `instant`.
    pub fn containing(instant: DateTime<Utc>) -> CoreResult<Self> {
        Self::month(instant.year(), instant.month())
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }
}

fn month_start(year: i32, month: u32) -> CoreResult<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .ok_or_else(|| CoreError::Validation(format!("{year}-{month:02} is not a valid month")))
}

/// Aggregate figures over a collection view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleStats {
    pub total: usize,
    pub average_seo_score: u8,
    pub total_words: u64,
    pub count_this_period: usize,
}

/// Computes totals over `articles`. An empty view averages to 0.
pub fn stats<'a, I>(articles: I, period: &StatsPeriod) -> ArticleStats
where
    I: IntoIterator<Item = &'a Article>,
{
    let mut out = ArticleStats::default();
    let mut score_sum: u64 = 0;
    for article in articles {
        out.total += 1;
        score_sum += u64::from(article.seo_score);
        out.total_words += u64::from(article.word_count);
        if period.contains(article.created_at) {
            out.count_this_period += 1;
        }
    }
    if out.total > 0 {
        let mean = score_sum as f64 / out.total as f64;
        out.average_seo_score = mean.round().clamp(0.0, 100.0) as u8;
    }
    out
}
