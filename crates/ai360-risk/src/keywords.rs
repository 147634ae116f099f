//! Fixed English keyword sets used for risk inference.
//!
//! Matching is a lowercase substring test against an item's heading and
//! description. Text in other languages simply never matches, so scoring
//! degrades to the priority flags and the default-moderate fallback.

/// Terms that mark an item as high risk in the overall score.
pub const HIGH_RISK: &[&str] = &[
    "life-threatening",
    "critical",
    "severe",
    "urgent",
    "emergency",
    "dangerous",
    "serious",
    "acute",
    "chronic",
    "cancer",
    "tumor",
    "malignant",
    "stroke",
    "heart attack",
    "diabetes",
    "hypertension",
    "kidney failure",
    "liver disease",
];

/// Terms that mark an item as medium risk in the overall score.
pub const MEDIUM_RISK: &[&str] = &[
    "moderate",
    "elevated",
    "increased risk",
    "warning",
    "caution",
    "monitor",
    "preventive",
    "early stage",
    "developing",
];

/// Reduced set used when a category has items but none are flagged.
pub const CATEGORY_HIGH_RISK: &[&str] = &[
    "life-threatening",
    "critical",
    "severe",
    "urgent",
    "serious",
    "chronic",
];

/// True if `text` (already lowercased) contains any of `keywords`.
#[must_use]
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}
