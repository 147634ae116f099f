//! Chat message formatting.
//!
//! The assistant is told to use `**double asterisks**` for headings and
//! critical points and never single asterisks, but models slip. Bold spans
//! survive as [`Span`]s; every other `*` is dropped.

use std::sync::LazyLock;

use regex::Regex;

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"));

/// A run of message text with its emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
}

/// Split an assistant message into plain and bold spans with stray
/// asterisks removed. Bold spans never cross a line break.
#[must_use]
pub fn format_message(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut push = |text: &str, bold: bool| {
        let cleaned = text.replace('*', "");
        if !cleaned.is_empty() {
            spans.push(Span {
                text: cleaned,
                bold,
            });
        }
    };

    let mut last = 0;
    for caps in BOLD.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push(&text[last..whole.start()], false);
        push(inner.as_str(), true);
        last = whole.end();
    }
    push(&text[last..], false);
    spans
}

/// Plain text with every asterisk removed, for speech synthesis.
#[must_use]
pub fn speech_text(text: &str) -> String {
    text.replace('*', "")
}
