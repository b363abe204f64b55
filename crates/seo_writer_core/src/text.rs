//! Small text-analysis helpers shared by the synthesizer and the evaluator.

use crate::domain::GenerationRequest;

/// Lower-cased word tokens with surrounding punctuation stripped.
/// Tokens without any letter or digit (list bullets, `**`) are skipped.
pub fn words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|raw| raw.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn word_count(text: &str) -> usize {
    words(text).len()
}

/// Non-overlapping occurrences of `phrase` as a run of whole tokens.
pub fn count_phrase(haystack: &[String], phrase: &[String]) -> usize {
    if phrase.is_empty() || phrase.len() > haystack.len() {
        return 0;
    }
    let mut count = 0;
    let mut i = 0;
    while i + phrase.len() <= haystack.len() {
        if haystack[i..i + phrase.len()] == *phrase {
            count += 1;
            i += phrase.len();
        } else {
            i += 1;
        }
    }
    count
}

/// Sentences of a body: split on terminal punctuation and on line breaks,
/// so list items count as their own sentence.
pub fn sentences(text: &str) -> Vec<&str> {
    text.split(|c: char| matches!(c, '.' | '!' | '?' | '\n'))
        .map(str::trim)
        .filter(|s| word_count(s) > 0)
        .collect()
}

/// The first sentence of a paragraph, terminator included.
pub fn first_sentence(paragraph: &str) -> &str {
    let paragraph = paragraph.trim();
    let mut chars = paragraph.char_indices().peekable();
    while let Some((idx, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
            if at_boundary {
                return &paragraph[..idx + c.len_utf8()];
            }
        }
    }
    paragraph
}

/// Tokenized keyword phrases for density checks. Falls back to the topic
/// when the request carries no usable keyword.
pub fn keyword_phrases(request: &GenerationRequest) -> Vec<Vec<String>> {
    let phrases: Vec<Vec<String>> = request
        .keywords
        .iter()
        .map(|k| words(k))
        .filter(|p| !p.is_empty())
        .collect();
    if !phrases.is_empty() {
        return phrases;
    }
    let topic = words(&request.topic);
    if topic.is_empty() {
        Vec::new()
    } else {
        vec![topic]
    }
}

pub fn count_keywords(haystack: &[String], phrases: &[Vec<String>]) -> usize {
    phrases.iter().map(|p| count_phrase(haystack, p)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_strip_markup_and_lowercase() {
        assert_eq!(
            words("1. **Improved Efficiency**: boost - it"),
            vec!["1", "improved", "efficiency", "boost", "it"]
        );
    }

    #[test]
    fn count_phrase_is_whole_word_and_non_overlapping() {
        let hay = words("AI helps. Maintain the ai ai stack");
        assert_eq!(count_phrase(&hay, &words("ai")), 3);
        assert_eq!(count_phrase(&hay, &words("ai ai")), 1);
        assert_eq!(count_phrase(&hay, &[]), 0);
    }

    #[test]
    fn sentences_split_on_punctuation_and_lines() {
        let s = sentences("One two. Three four!\n- five six\n\n");
        assert_eq!(s, vec!["One two", "Three four", "- five six"]);
    }

    #[test]
    fn first_sentence_ignores_inner_dots() {
        assert_eq!(first_sentence("Version 2.0 is out. More later."), "Version 2.0 is out.");
        assert_eq!(first_sentence("no terminator"), "no terminator");
    }
}
