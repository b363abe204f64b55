//! crates/seo_writer_core/src/seo.rs
//!
//! The SEO evaluator: six independent rubric rules plus an aggregate score
//! whose band is fixed by the worst rule outcome.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::{
    GenerationRequest, HeadingLevel, RubricItem, RubricRule, RubricStatus, SeoAssessment,
    SynthesizedDocument,
};
use crate::text;

pub const META_DESCRIPTION_LIMIT: usize = 160;
const MAX_SENTENCE_WORDS: f64 = 20.0;
const WARN_SENTENCE_WORDS: f64 = 25.0;

/// A meta description derived from the first prose paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaDescription {
    pub text: String,
    pub truncated: bool,
}

/// Evaluates `document` against the request that produced it.
///
/// Without a document every rule is pending and the score is 0.
pub fn evaluate(document: Option<&SynthesizedDocument>, request: &GenerationRequest) -> SeoAssessment {
    let Some(document) = document else {
        return SeoAssessment::pending();
    };

    let checklist = vec![
        check_title(document, request),
        check_meta_description(document),
        check_header_structure(document),
        check_keyword_density(document, request),
        check_content_length(document, request),
        check_readability(document),
    ];
    let score = score_for(&checklist, document);
    SeoAssessment { score, checklist }
}

/// The first sentence of the first prose paragraph, cut to fit the limit.
pub fn meta_description(document: &SynthesizedDocument) -> Option<MetaDescription> {
    let paragraph = document
        .sections
        .iter()
        .flat_map(|s| s.body.split("\n\n"))
        .map(str::trim)
        .find(|p| !p.is_empty() && !is_list_block(p))?;

    let sentence = text::first_sentence(paragraph);
    if sentence.chars().count() <= META_DESCRIPTION_LIMIT {
        return Some(MetaDescription {
            text: sentence.to_string(),
            truncated: false,
        });
    }

    let budget = META_DESCRIPTION_LIMIT - 3;
    let clipped: String = sentence.chars().take(budget).collect();
    let cut = match clipped.rfind(char::is_whitespace) {
        Some(idx) if idx > 0 => clipped[..idx].trim_end().to_string(),
        _ => clipped,
    };
    Some(MetaDescription {
        text: format!("{cut}..."),
        truncated: true,
    })
}

fn is_list_block(paragraph: &str) -> bool {
    let first = paragraph.trim_start();
    first.starts_with("- ")
        || first.starts_with("* ")
        || first.starts_with("**")
        || first
            .split_once(". ")
            .is_some_and(|(n, _)| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

fn check_title(document: &SynthesizedDocument, request: &GenerationRequest) -> RubricItem {
    let rule = RubricRule::TitleOptimization;
    let title = document.title.to_lowercase();
    if title.trim().is_empty() {
        return RubricItem::new(rule, RubricStatus::Failed, Some("Document has no title".into()));
    }

    let matched = request
        .keywords
        .iter()
        .find(|k| title.contains(&k.to_lowercase()))
        .cloned()
        .or_else(|| {
            let topic = request.topic.to_lowercase();
            (!topic.is_empty() && title.contains(&topic)).then(|| request.topic.clone())
        });

    match matched {
        Some(term) => RubricItem::new(rule, RubricStatus::Passed, Some(format!("Title mentions \"{term}\""))),
        None => RubricItem::new(
            rule,
            RubricStatus::Failed,
            Some("Title mentions neither a keyword nor the topic".into()),
        ),
    }
}

fn check_meta_description(document: &SynthesizedDocument) -> RubricItem {
    let rule = RubricRule::MetaDescription;
    match meta_description(document) {
        None => RubricItem::new(rule, RubricStatus::Failed, Some("No paragraph to summarize".into())),
        Some(meta) if meta.truncated => RubricItem::new(
            rule,
            RubricStatus::Warning,
            Some(format!(
                "Opening sentence exceeds {META_DESCRIPTION_LIMIT} characters and was truncated"
            )),
        ),
        Some(meta) => RubricItem::new(
            rule,
            RubricStatus::Passed,
            Some(format!("{} characters", meta.text.chars().count())),
        ),
    }
}

/// Checks that headings form a hierarchy under a single H1.
pub fn header_structure_problem(document: &SynthesizedDocument) -> Option<String> {
    let first = document.sections.first()?;
    if first.level != HeadingLevel::H1 {
        return Some("Document does not start with an H1 heading".into());
    }
    let h1_count = document
        .sections
        .iter()
        .filter(|s| s.level == HeadingLevel::H1)
        .count();
    if h1_count > 1 {
        return Some(format!("Found {h1_count} H1 headings"));
    }
    document.sections.windows(2).find_map(|pair| {
        (pair[1].level.depth() > pair[0].level.depth() + 1)
            .then(|| format!("\"{}\" skips a heading level", pair[1].heading))
    })
}

fn check_header_structure(document: &SynthesizedDocument) -> RubricItem {
    let rule = RubricRule::HeaderStructure;
    if document.sections.is_empty() {
        return RubricItem::new(rule, RubricStatus::Failed, Some("Document has no headings".into()));
    }
    match header_structure_problem(document) {
        Some(problem) => RubricItem::new(rule, RubricStatus::Failed, Some(problem)),
        None => RubricItem::new(
            rule,
            RubricStatus::Passed,
            Some(format!("{} headings in order", document.sections.len())),
        ),
    }
}

fn check_keyword_density(document: &SynthesizedDocument, request: &GenerationRequest) -> RubricItem {
    let rule = RubricRule::KeywordDensity;
    let phrases = text::keyword_phrases(request);

    let mut body_words = 0;
    let mut hits = 0;
    for section in &document.sections {
        let tokens = text::words(&section.body);
        body_words += tokens.len();
        hits += text::count_keywords(&tokens, &phrases);
    }
    if body_words == 0 {
        return RubricItem::new(rule, RubricStatus::Failed, Some("Document has no body text".into()));
    }

    let density = hits as f64 * 100.0 / body_words as f64;
    let status = if (1.0..=3.0).contains(&density) {
        RubricStatus::Passed
    } else if hits > 0 && density <= 5.0 {
        RubricStatus::Warning
    } else {
        RubricStatus::Failed
    };
    RubricItem::new(
        rule,
        status,
        Some(format!("Keyword density {density:.1}% ({hits} of {body_words} words)")),
    )
}

fn check_content_length(document: &SynthesizedDocument, request: &GenerationRequest) -> RubricItem {
    let rule = RubricRule::ContentLength;
    let words = document.word_count() as f64;
    let target = request.target_word_count.words() as f64;
    let deviation = (words - target).abs() / target;
    let status = if deviation <= 0.20 {
        RubricStatus::Passed
    } else if deviation <= 0.35 {
        RubricStatus::Warning
    } else {
        RubricStatus::Failed
    };
    RubricItem::new(
        rule,
        status,
        Some(format!("{words} words against a target of {target}")),
    )
}

fn check_readability(document: &SynthesizedDocument) -> RubricItem {
    let rule = RubricRule::Readability;
    let lengths: Vec<usize> = document
        .sections
        .iter()
        .flat_map(|s| text::sentences(&s.body))
        .map(text::word_count)
        .collect();
    if lengths.is_empty() {
        return RubricItem::new(rule, RubricStatus::Failed, Some("Document has no sentences".into()));
    }

    let mean = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
    let status = if mean <= MAX_SENTENCE_WORDS {
        RubricStatus::Passed
    } else if mean <= WARN_SENTENCE_WORDS {
        RubricStatus::Warning
    } else {
        RubricStatus::Failed
    };
    RubricItem::new(
        rule,
        status,
        Some(format!("Average sentence length {mean:.1} words")),
    )
}

/// Draws a score from the band allowed by the worst outcome. The generator
/// is seeded with a hash of the document, so within one build the same
/// document always scores the same.
fn score_for(checklist: &[RubricItem], document: &SynthesizedDocument) -> u8 {
    let passed = checklist
        .iter()
        .filter(|item| item.status == RubricStatus::Passed)
        .count() as u8;
    let worst = checklist
        .iter()
        .map(|item| item.status)
        .max_by_key(|status| status.severity())
        .unwrap_or(RubricStatus::Pending);

    let (low, high) = match worst {
        RubricStatus::Failed => (20 + 7 * passed, 69),
        RubricStatus::Warning => (70, 84),
        RubricStatus::Passed => (80, 100),
        RubricStatus::Pending => return 0,
    };

    let mut hasher = DefaultHasher::new();
    document.hash(&mut hasher);
    StdRng::seed_from_u64(hasher.finish()).gen_range(low..=high)
}
