//! Overall and per-category risk scores.
//!
//! The overall score is a weighted sum over 100 points:
//!
//! | Factor                   | Max | Formula                                   |
//! |--------------------------|-----|-------------------------------------------|
//! | category count           | 30  | `min(categories × 10, 30)`                |
//! | high-priority ratio      | 40  | `min(high / items × 40, 40)`, 0 if empty  |
//! | keywords                 | 20  | `min((3 × high-kw + 1 × medium-kw) × 2, 20)` |
//! | monitoring urgency       | 10  | `min(avg weight / 3 × 10, 10)`, 0 if none |
//!
//! The monitoring slot stays in the denominator even when there are no signs.
//! After rounding, floors only ever raise the result: 15 when any category
//! exists, 25 when anything is flagged high-priority or any sign is `High`.
//! The result is capped at [`SCORE_CEILING`].

use ai360_core::prediction::{HealthPrediction, RiskCategory};
use serde::Serialize;

use crate::keywords::{self, CATEGORY_HIGH_RISK, HIGH_RISK, MEDIUM_RISK};

/// No score ever reaches certainty.
pub const SCORE_CEILING: u8 = 95;

const CATEGORY_WEIGHT: f64 = 30.0;
const PRIORITY_WEIGHT: f64 = 40.0;
const KEYWORD_WEIGHT: f64 = 20.0;
const URGENCY_WEIGHT: f64 = 10.0;
const MAX_POINTS: f64 = CATEGORY_WEIGHT + PRIORITY_WEIGHT + KEYWORD_WEIGHT + URGENCY_WEIGHT;

const POINTS_PER_CATEGORY: f64 = 10.0;
const HIGH_KEYWORD_POINTS: u32 = 3;
const MEDIUM_KEYWORD_POINTS: u32 = 1;
const KEYWORD_MULTIPLIER: f64 = 2.0;

const CATEGORY_FLOOR: u8 = 15;
const PRIORITY_FLOOR: u8 = 25;

const KEYWORD_SPAN: f64 = 60.0;
const KEYWORD_BASE: f64 = 20.0;
const UNFLAGGED_DEFAULT: u8 = 30;

/// Each factor's contribution to the overall score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskBreakdown {
    pub category_points: f64,
    pub priority_points: f64,
    pub keyword_points: f64,
    pub urgency_points: f64,
    /// Rounded percentage before floors and ceiling.
    pub raw_percent: u8,
    pub score: u8,
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

impl RiskBreakdown {
    /// Compute every factor for `prediction`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(prediction: &HealthPrediction) -> Self {
        let category_count = prediction.risk_categories.len();
        let category_points =
            (category_count as f64 * POINTS_PER_CATEGORY).min(CATEGORY_WEIGHT);

        let mut total_items = 0usize;
        let mut high_priority = 0usize;
        let mut keyword_raw = 0u32;
        for item in prediction.items() {
            total_items += 1;
            if item.is_high_priority {
                high_priority += 1;
            }
            let text = item.search_text();
            if keywords::contains_any(&text, HIGH_RISK) {
                keyword_raw += HIGH_KEYWORD_POINTS;
            } else if keywords::contains_any(&text, MEDIUM_RISK) {
                keyword_raw += MEDIUM_KEYWORD_POINTS;
            }
        }

        let priority_points = if total_items > 0 {
            (ratio(high_priority, total_items) * PRIORITY_WEIGHT).min(PRIORITY_WEIGHT)
        } else {
            0.0
        };
        let keyword_points = (f64::from(keyword_raw) * KEYWORD_MULTIPLIER).min(KEYWORD_WEIGHT);

        let signs = &prediction.monitoring_signs;
        let urgency_points = if signs.is_empty() {
            0.0
        } else {
            let total: u32 = signs.iter().map(|s| s.urgency.weight()).sum();
            let average = f64::from(total) / signs.len() as f64;
            (average / 3.0 * URGENCY_WEIGHT).min(URGENCY_WEIGHT)
        };

        let sum = category_points + priority_points + keyword_points + urgency_points;
        let raw_percent = round_percent(sum / MAX_POINTS * 100.0);

        let mut score = raw_percent;
        if category_count > 0 && score < CATEGORY_FLOOR {
            score = CATEGORY_FLOOR;
        }
        if (high_priority > 0 || prediction.has_high_urgency_sign()) && raw_percent < PRIORITY_FLOOR
        {
            score = score.max(PRIORITY_FLOOR);
        }
        let score = score.min(SCORE_CEILING);

        tracing::debug!(
            category_count,
            total_items,
            high_priority,
            raw_percent,
            score,
            "computed overall risk score"
        );

        Self {
            category_points,
            priority_points,
            keyword_points,
            urgency_points,
            raw_percent,
            score,
        }
    }
}

/// Overall risk percentage for a prediction, in `0..=95`.
#[must_use]
pub fn overall_risk_score(prediction: &HealthPrediction) -> u8 {
    RiskBreakdown::compute(prediction).score
}

/// Risk percentage for one category, in `0..=95`.
///
/// Zero only when the category has no items. Unflagged categories fall back
/// to keyword inference, and to a moderate default when nothing matches,
/// because present-but-unflagged findings are unknown risk rather than none.
#[must_use]
pub fn category_risk_score(category: &RiskCategory) -> u8 {
    let total = category.items.len();
    if total == 0 {
        return 0;
    }

    let mut base = round_percent(ratio(category.high_priority_count(), total) * 100.0);
    if base == 0 {
        let matches = category
            .items
            .iter()
            .filter(|item| keywords::contains_any(&item.search_text(), CATEGORY_HIGH_RISK))
            .count();
        base = if matches > 0 {
            round_percent(ratio(matches, total) * KEYWORD_SPAN + KEYWORD_BASE)
        } else {
            UNFLAGGED_DEFAULT
        };
    }
    base.min(SCORE_CEILING)
}
