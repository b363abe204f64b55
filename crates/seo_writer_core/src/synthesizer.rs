//! crates/seo_writer_core/src/synthesizer.rs
//!
//! Deterministic template expansion from a `GenerationRequest` into a
//! `SynthesizedDocument`, plus the markdown form of a document.
//!
//! The template fixes the section structure. Tone only swaps the opening and
//! closing lines. The requested length is reached by appending elaboration
//! sentences to the prose sections; while keyword density is under 2% those
//! sentences mention the next keyword in turn.

use crate::domain::{GenerationRequest, HeadingLevel, Section, SynthesizedDocument, Tone};
use crate::text;

/// Elaboration sentences are grouped into paragraphs of this many.
const SENTENCES_PER_PARAGRAPH: usize = 4;

/// Density the keyword weaving aims for, in percent.
const TARGET_DENSITY_PERCENT: usize = 2;

const NEUTRAL_SENTENCES: [&str; 12] = [
    "Teams that document their assumptions early find it much easier to explain their decisions later.",
    "Small, measurable goals make it simpler to see what is working and what needs another look.",
    "Regular reviews keep the whole effort aligned with the needs of the people it is meant to serve.",
    "Clear ownership prevents important tasks from slipping through the cracks as priorities shift.",
    "Feedback gathered from real users is often more valuable than any internal assumption.",
    "A realistic timeline leaves room for learning, iteration, and the occasional unexpected detour.",
    "Sharing results openly builds trust and encourages others to contribute their own ideas.",
    "Lessons from each cycle should feed directly into the plan for the next one.",
    "Simple tools used consistently tend to outperform complex tools used only occasionally.",
    "Investing in training pays off quickly once more people understand the underlying principles.",
    "Good documentation turns individual experience into knowledge the whole organization can reuse.",
    "Measuring the right outcomes matters far more than measuring everything that moves.",
];

const KEYWORD_SENTENCES: [&str; 6] = [
    "Paying close attention to {k} helps keep the overall strategy focused and effective.",
    "Many experts consider {k} one of the most important factors to get right.",
    "A practical first step is to review how {k} fits into your current workflow.",
    "When planning ahead, make {k} part of every conversation about priorities.",
    "Case studies consistently show that {k} rewards steady, long-term attention.",
    "It is worth revisiting {k} regularly as circumstances and goals change.",
];

/// Indices (into the template) of the sections that receive elaboration.
const FILL_SLOTS: [usize; 6] = [1, 2, 3, 8, 9, 10];

/// A section under construction: prose paragraphs plus an optional closing line.
struct Draft {
    heading: String,
    level: HeadingLevel,
    paragraphs: Vec<String>,
    extra: Vec<Vec<String>>,
    closing: Option<String>,
}

impl Draft {
    fn new(level: HeadingLevel, heading: impl Into<String>, paragraphs: Vec<String>) -> Self {
        Self {
            heading: heading.into(),
            level,
            paragraphs,
            extra: Vec::new(),
            closing: None,
        }
    }

    fn with_closing(mut self, closing: String) -> Self {
        self.closing = Some(closing);
        self
    }

    fn push_sentence(&mut self, sentence: String) {
        match self.extra.last_mut() {
            Some(paragraph) if paragraph.len() < SENTENCES_PER_PARAGRAPH => paragraph.push(sentence),
            _ => self.extra.push(vec![sentence]),
        }
    }

    fn into_section(self) -> Section {
        let mut blocks = self.paragraphs;
        blocks.extend(self.extra.into_iter().map(|p| p.join(" ")));
        blocks.extend(self.closing);
        Section {
            heading: self.heading,
            level: self.level,
            body: blocks.join("\n\n"),
        }
    }
}

/// Expands the fixed article template for `request`.
///
/// Callers must reject empty topics before getting here.
pub fn synthesize(request: &GenerationRequest) -> SynthesizedDocument {
    let topic = request.topic.as_str();
    let lower = topic.to_lowercase();
    let mut drafts = template(topic, &lower, request.tone);
    fill_to_target(&mut drafts, request);

    SynthesizedDocument {
        title: topic.to_string(),
        sections: drafts.into_iter().map(Draft::into_section).collect(),
    }
}

fn opening_line(topic: &str, tone: Tone) -> String {
    match tone {
        Tone::Professional => format!(
            "{topic} is a fascinating subject that has gained significant attention in recent years."
        ),
        Tone::Casual => format!("Let's be honest: {topic} is everywhere right now, and for good reason."),
        Tone::Friendly => format!("If you have been curious about {topic}, you are in good company."),
        Tone::Authoritative => {
            format!("{topic} has become one of the defining subjects of the modern landscape.")
        }
        Tone::Conversational => {
            format!("Have you ever wondered why so many people are talking about {topic}?")
        }
    }
}

fn closing_line(tone: Tone) -> String {
    match tone {
        Tone::Professional => "Remember to start small, measure results, and continuously optimize your approach for the best outcomes.",
        Tone::Casual => "So start small, keep an eye on the results, and tweak things as you go.",
        Tone::Friendly => "Take it one step at a time, celebrate the small wins, and enjoy the journey.",
        Tone::Authoritative => "Start with a focused pilot, measure rigorously, and scale only what the evidence supports.",
        Tone::Conversational => "Why not pick one idea from this guide and try it out this week?",
    }
    .to_string()
}

fn template(topic: &str, lower: &str, tone: Tone) -> Vec<Draft> {
    use HeadingLevel::{H1, H2, H3};

    vec![
        Draft::new(H1, topic, Vec::new()),
        Draft::new(
            H2,
            "Introduction",
            vec![format!(
                "{} This comprehensive guide will explore the key aspects, benefits, and practical applications of {lower}.",
                opening_line(topic, tone)
            )],
        ),
        Draft::new(
            H2,
            format!("What is {topic}?"),
            vec![format!(
                "{topic} refers to the process and methodologies involved in creating effective solutions for modern challenges. Understanding the fundamentals is crucial for anyone looking to implement these strategies successfully."
            )],
        ),
        Draft::new(
            H2,
            "Key Benefits",
            vec![
                format!("1. **Improved Efficiency**: Implementing {lower} strategies can significantly boost productivity and streamline operations."),
                "2. **Enhanced Performance**: Organizations that adopt these practices often see substantial improvements in their overall performance metrics.".to_string(),
                "3. **Cost Reduction**: Proper implementation can lead to significant cost savings over time.".to_string(),
                "4. **Better User Experience**: End users benefit from more intuitive and effective solutions.".to_string(),
            ],
        ),
        Draft::new(H2, "Best Practices", Vec::new()),
        Draft::new(
            H3,
            "Planning Phase",
            vec![[
                "- Conduct thorough research before implementation",
                "- Define clear objectives and success metrics",
                "- Engage stakeholders early in the process",
            ]
            .join("\n")],
        ),
        Draft::new(
            H3,
            "Implementation Phase",
            vec![[
                "- Start with a pilot program",
                "- Monitor progress regularly",
                "- Adjust strategies based on feedback",
            ]
            .join("\n")],
        ),
        Draft::new(
            H3,
            "Optimization Phase",
            vec![[
                "- Continuously analyze performance data",
                "- Implement improvements iteratively",
                "- Stay updated with latest trends and technologies",
            ]
            .join("\n")],
        ),
        Draft::new(
            H2,
            "Common Challenges and Solutions",
            vec![
                format!("Many organizations face challenges when implementing {lower}. Here are some common issues and their solutions:"),
                "**Challenge 1: Resistance to Change**\n- Solution: Provide comprehensive training and clear communication about benefits".to_string(),
                "**Challenge 2: Limited Resources**\n- Solution: Prioritize high-impact initiatives and phase implementation".to_string(),
                "**Challenge 3: Technical Complexity**\n- Solution: Start with simpler solutions and gradually increase complexity".to_string(),
            ],
        ),
        Draft::new(
            H2,
            "Future Trends",
            vec![
                format!("The future of {lower} looks promising with emerging technologies and evolving methodologies. Key trends to watch include:"),
                [
                    "- Integration with artificial intelligence",
                    "- Enhanced automation capabilities",
                    "- Improved user interfaces",
                    "- Greater emphasis on sustainability",
                ]
                .join("\n"),
            ],
        ),
        Draft::new(
            H2,
            "Conclusion",
            vec![format!(
                "{topic} represents a significant opportunity for organizations to improve their operations and deliver better value to their customers. By following the best practices outlined in this guide and staying aware of emerging trends, you can successfully implement these strategies in your own context."
            )],
        )
        .with_closing(closing_line(tone)),
    ]
}

/// Appends elaboration sentences until the document reaches the target length.
fn fill_to_target(drafts: &mut [Draft], request: &GenerationRequest) {
    let target = request.target_word_count.words() as usize;
    let phrases = text::keyword_phrases(request);
    let terms = request.keywords_or_topic();

    let mut total_words = 0;
    let mut body_words = 0;
    let mut hits = 0;
    for draft in drafts.iter() {
        total_words += text::word_count(&draft.heading);
        for block in draft.paragraphs.iter().chain(draft.closing.iter()) {
            let tokens = text::words(block);
            body_words += tokens.len();
            hits += text::count_keywords(&tokens, &phrases);
        }
    }
    total_words += body_words;

    let mut step = 0;
    let mut neutral = 0;
    let mut keyword = 0;
    while total_words < target {
        let under_density = hits * 100 < TARGET_DENSITY_PERCENT * body_words;
        let sentence = if under_density && !terms.is_empty() {
            let term = terms[keyword % terms.len()];
            let template = KEYWORD_SENTENCES[keyword % KEYWORD_SENTENCES.len()];
            keyword += 1;
            template.replace("{k}", term)
        } else {
            let sentence = NEUTRAL_SENTENCES[neutral % NEUTRAL_SENTENCES.len()];
            neutral += 1;
            sentence.to_string()
        };

        let tokens = text::words(&sentence);
        if tokens.is_empty() {
            break;
        }
        total_words += tokens.len();
        body_words += tokens.len();
        hits += text::count_keywords(&tokens, &phrases);

        let slot = FILL_SLOTS[step % FILL_SLOTS.len()];
        if let Some(draft) = drafts.get_mut(slot) {
            draft.push_sentence(sentence);
        }
        step += 1;
    }
}

impl GenerationRequest {
    /// Terms woven into elaboration sentences: the keywords, or the topic
    /// (lower-cased) when there are none.
    fn keywords_or_topic(&self) -> Vec<&str> {
        if self.keywords.is_empty() {
            if self.topic.is_empty() {
                Vec::new()
            } else {
                vec![self.topic.as_str()]
            }
        } else {
            self.keywords.iter().map(String::as_str).collect()
        }
    }
}

//=========================================================================================
// Markdown
//=========================================================================================

/// Renders `#`-style headings, each followed by its body.
pub fn render_markdown(document: &SynthesizedDocument) -> String {
    let mut blocks = Vec::with_capacity(document.sections.len() * 2);
    for section in &document.sections {
        let hashes = "#".repeat(section.level.depth() as usize);
        blocks.push(format!("{hashes} {}", section.heading));
        if !section.body.trim().is_empty() {
            blocks.push(section.body.clone());
        }
    }
    blocks.join("\n\n")
}

/// Reads a markdown article back into sections.
///
/// Only `#`, `##` and `###` start a section; deeper headings stay body text.
/// Text before the first heading becomes an unnamed level-1 section.
pub fn parse_markdown(markdown: &str) -> SynthesizedDocument {
    let mut sections: Vec<(HeadingLevel, String, Vec<&str>)> = Vec::new();

    for line in markdown.lines() {
        if let Some((level, heading)) = parse_heading(line) {
            sections.push((level, heading.to_string(), Vec::new()));
            continue;
        }
        match sections.last_mut() {
            Some((_, _, body)) => body.push(line),
            None if line.trim().is_empty() => {}
            None => sections.push((HeadingLevel::H1, String::new(), vec![line])),
        }
    }

    let sections: Vec<Section> = sections
        .into_iter()
        .map(|(level, heading, body)| Section {
            heading,
            level,
            body: body.join("\n").trim_matches('\n').trim_end().to_string(),
        })
        .collect();

    let title = sections
        .iter()
        .find(|s| s.level == HeadingLevel::H1 && !s.heading.is_empty())
        .map(|s| s.heading.clone())
        .unwrap_or_default();

    SynthesizedDocument { title, sections }
}

fn parse_heading(line: &str) -> Option<(HeadingLevel, &str)> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    let rest = &line[hashes..];
    let level = HeadingLevel::try_from(u8::try_from(hashes).ok()?).ok()?;
    if !rest.starts_with(' ') {
        return None;
    }
    Some((level, rest.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Language, TargetWordCount};

    fn remote_work() -> GenerationRequest {
        GenerationRequest::new(
            "Remote Work",
            "future trends, productivity",
            Tone::Professional,
            TargetWordCount::Words1000,
            Language::English,
        )
    }

    #[test]
    fn first_section_is_the_topic_at_level_one() {
        let doc = synthesize(&remote_work());
        assert_eq!(doc.title, "Remote Work");
        assert_eq!(doc.sections[0].level, HeadingLevel::H1);
        assert_eq!(doc.sections[0].heading, "Remote Work");
    }

    #[test]
    fn template_sections_are_in_canonical_order() {
        let doc = synthesize(&remote_work());
        let headings: Vec<&str> = doc.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(
            headings,
            vec![
                "Remote Work",
                "Introduction",
                "What is Remote Work?",
                "Key Benefits",
                "Best Practices",
                "Planning Phase",
                "Implementation Phase",
                "Optimization Phase",
                "Common Challenges and Solutions",
                "Future Trends",
                "Conclusion",
            ]
        );
        let benefits = &doc.sections[3].body;
        for n in 1..=4 {
            assert!(benefits.contains(&format!("{n}. **")));
        }
        assert_eq!(doc.sections[8].body.matches("**Challenge ").count(), 3);
        assert_eq!(doc.sections[9].body.lines().filter(|l| l.starts_with("- ")).count(), 4);
    }

    #[test]
    fn synthesis_is_deterministic() {
        assert_eq!(synthesize(&remote_work()), synthesize(&remote_work()));
    }

    #[test]
    fn structure_is_shared_across_tones_and_lengths() {
        let base = synthesize(&remote_work());
        let mut other = remote_work();
        other.tone = Tone::Casual;
        other.target_word_count = TargetWordCount::Words2500;
        let other = synthesize(&other);
        let shape = |d: &SynthesizedDocument| {
            d.sections
                .iter()
                .map(|s| (s.level, s.heading.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(shape(&base), shape(&other));
        assert_ne!(base.sections[1].body, other.sections[1].body);
    }

    #[test]
    fn topic_is_interpolated_in_lower_case() {
        let doc = synthesize(&remote_work());
        assert!(doc.sections[1].body.contains("practical applications of remote work"));
    }

    #[test]
    fn length_lands_near_each_target() {
        for target in TargetWordCount::ALL {
            let mut request = remote_work();
            request.target_word_count = target;
            let words = synthesize(&request).word_count() as f64;
            let goal = target.words() as f64;
            assert!(words >= goal, "{words} below {goal}");
            assert!(words <= goal * 1.05, "{words} far above {goal}");
        }
    }

    #[test]
    fn markdown_round_trips_synthesized_documents() {
        let doc = synthesize(&remote_work());
        let markdown = render_markdown(&doc);
        assert!(markdown.starts_with("# Remote Work\n\n## Introduction\n\n"));
        assert_eq!(parse_markdown(&markdown), doc);
    }

    #[test]
    fn parse_keeps_deep_headings_and_preamble_as_text() {
        let doc = parse_markdown("intro line\n# Title\n#### not a section\n##NoSpace");
        assert_eq!(doc.sections.len(), 2);
        assert_eq!(doc.sections[0].heading, "");
        assert_eq!(doc.sections[0].body, "intro line");
        assert_eq!(doc.title, "Title");
        assert_eq!(doc.sections[1].body, "#### not a section\n##NoSpace");
    }
}
