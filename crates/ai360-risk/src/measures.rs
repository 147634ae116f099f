//! Break a finding's description into short actionable measures.

use std::sync::LazyLock;

use regex::Regex;

static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[•\-*]\s*([^\n•\-*]+)").expect("bullet pattern is valid"));
static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+[.)]\s*([^\n\d]+)").expect("numbered pattern is valid"));
static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("sentence pattern is valid"));

const MIN_LIST_ENTRY: usize = 10;
const MIN_SENTENCE: usize = 15;
const MAX_SENTENCES: usize = 5;

fn list_entries(pattern: &Regex, text: &str) -> Option<Vec<String>> {
    let bodies: Vec<&str> = pattern
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();
    if bodies.len() <= 1 {
        return None;
    }
    Some(
        bodies
            .into_iter()
            .map(str::trim)
            .filter(|s| s.chars().count() > MIN_LIST_ENTRY)
            .map(str::to_string)
            .collect(),
    )
}

/// Bullet entries, else numbered entries, else the first few sentences.
///
/// A list style only counts when it appears more than once. Short fragments
/// are dropped, and when nothing survives the whole description is returned
/// as the single measure.
#[must_use]
pub fn extract_measures(description: &str) -> Vec<String> {
    let measures = list_entries(&BULLET, description)
        .or_else(|| list_entries(&NUMBERED, description))
        .unwrap_or_else(|| {
            SENTENCE_END
                .split(description)
                .map(str::trim)
                .filter(|s| s.chars().count() > MIN_SENTENCE)
                .take(MAX_SENTENCES)
                .map(str::to_string)
                .collect()
        });

    if measures.is_empty() {
        vec![description.to_string()]
    } else {
        measures
    }
}
