//! services/api/src/web/seed.rs
//!
//! Sample history used for demos.
//!
//! Word counts and scores are the recorded figures of each sample. The body
//! is a template stand-in, so its own length does not match `word_count`.

use chrono::{TimeZone, Utc};
use seo_writer_core::{
    domain::{ArticleStatus, GenerationRequest, Language, NewArticle, TargetWordCount, Tone},
    repository::ArticleRepository,
    synthesizer,
};

struct Sample {
    title: &'static str,
    topic: &'static str,
    word_count: u32,
    seo_score: u8,
    day: u32,
    status: ArticleStatus,
    keywords: &'static str,
}

const SAMPLES: [Sample; 5] = [
    Sample {
        title: "The Future of Remote Work in 2024",
        topic: "Remote Work",
        word_count: 1250,
        seo_score: 95,
        day: 15,
        status: ArticleStatus::Published,
        keywords: "remote work, future trends, productivity",
    },
    Sample {
        title: "Complete Guide to Digital Marketing",
        topic: "Digital Marketing",
        word_count: 1800,
        seo_score: 88,
        day: 14,
        status: ArticleStatus::Draft,
        keywords: "digital marketing, SEO, content marketing",
    },
    Sample {
        title: "Benefits of Sustainable Living",
        topic: "Sustainability",
        word_count: 950,
        seo_score: 92,
        day: 13,
        status: ArticleStatus::Published,
        keywords: "sustainability, environment, green living",
    },
    Sample {
        title: "AI in Healthcare: Transforming Patient Care",
        topic: "Healthcare AI",
        word_count: 1400,
        seo_score: 89,
        day: 12,
        status: ArticleStatus::Archived,
        keywords: "AI, healthcare, technology",
    },
    Sample {
        title: "Cybersecurity Best Practices for Small Business",
        topic: "Cybersecurity",
        word_count: 1100,
        seo_score: 91,
        day: 11,
        status: ArticleStatus::Published,
        keywords: "cybersecurity, small business, data protection",
    },
];

/// Inserts the sample articles and returns how many were added. Each gets a
/// template body so it can be downloaded like a committed article.
pub fn seed_demo_articles(repository: &mut ArticleRepository) -> usize {
    let mut inserted = 0;
    for sample in &SAMPLES {
        let Some(created_at) = Utc.with_ymd_and_hms(2024, 1, sample.day, 9, 0, 0).single() else {
            continue;
        };
        let request = GenerationRequest::new(
            sample.topic,
            sample.keywords,
            Tone::Professional,
            closest_target(sample.word_count),
            Language::English,
        );
        let mut document = synthesizer::synthesize(&request);
        document.title = sample.title.to_string();
        if let Some(first) = document.sections.first_mut() {
            first.heading = sample.title.to_string();
        }

        repository.insert(NewArticle {
            title: sample.title.to_string(),
            topic: sample.topic.to_string(),
            word_count: sample.word_count,
            seo_score: sample.seo_score,
            created_at,
            status: sample.status,
            keywords: request.keywords.clone(),
            content: synthesizer::render_markdown(&document),
        });
        inserted += 1;
    }
    inserted
}

fn closest_target(words: u32) -> TargetWordCount {
    TargetWordCount::ALL
        .into_iter()
        .min_by_key(|t| t.words().abs_diff(words))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_the_five_samples_in_order() {
        let mut repo = ArticleRepository::new();
        assert_eq!(seed_demo_articles(&mut repo), 5);
        let topics: Vec<&str> = repo.list().iter().map(|a| a.topic.as_str()).collect();
        assert_eq!(
            topics,
            vec!["Remote Work", "Digital Marketing", "Sustainability", "Healthcare AI", "Cybersecurity"]
        );
        assert!(repo.list()[0].content.starts_with("# The Future of Remote Work in 2024"));
    }

    #[test]
    fn recorded_figures_are_kept_over_the_template_body() {
        let mut repo = ArticleRepository::new();
        seed_demo_articles(&mut repo);
        let counts: Vec<u32> = repo.list().iter().map(|a| a.word_count).collect();
        assert_eq!(counts, vec![1250, 1800, 950, 1400, 1100]);
    }

    #[test]
    fn closest_target_picks_nearest_option() {
        assert_eq!(closest_target(1250), TargetWordCount::Words1000);
        assert_eq!(closest_target(1400), TargetWordCount::Words1500);
        assert_eq!(closest_target(950), TargetWordCount::Words1000);
    }
}
