//! Derived view model for the health forecast screen.

use ai360_core::prediction::{HealthPrediction, MonitoringSign, RiskCategory, Urgency};
use serde::Serialize;

use crate::measures::extract_measures;
use crate::score::{RiskBreakdown, category_risk_score};

const RED_ABOVE: u8 = 60;
const ORANGE_ABOVE: u8 = 30;

/// Display bucket for a category's risk bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskColor {
    Red,
    Orange,
    /// Brand accent used for low risk.
    Olive,
}

impl RiskColor {
    #[must_use]
    pub const fn for_score(score: u8) -> Self {
        if score > RED_ABOVE {
            Self::Red
        } else if score > ORANGE_ABOVE {
            Self::Orange
        } else {
            Self::Olive
        }
    }

    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            Self::Red => "#ef4444",
            Self::Orange => "#f97316",
            Self::Olive => "#6B705C",
        }
    }
}

/// Hex color for an urgency badge.
#[must_use]
pub const fn urgency_hex(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::High => "#ef4444",
        Urgency::Medium => "#f59e0b",
        Urgency::Low | Urgency::Unspecified => "#9ca3af",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FindingView {
    pub heading: String,
    pub high_priority: bool,
    pub measures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRisk {
    pub category: String,
    pub score: u8,
    pub color: RiskColor,
    pub findings: Vec<FindingView>,
}

impl CategoryRisk {
    #[must_use]
    pub fn from_category(category: &RiskCategory) -> Self {
        let score = category_risk_score(category);
        Self {
            category: category.category.clone(),
            score,
            color: RiskColor::for_score(score),
            findings: category
                .items
                .iter()
                .map(|item| FindingView {
                    heading: item.heading.clone(),
                    high_priority: item.is_high_priority,
                    measures: extract_measures(&item.description),
                })
                .collect(),
        }
    }
}

/// Share of monitoring signs at one urgency level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrgencyShare {
    pub urgency: Urgency,
    pub count: usize,
    pub percent: u8,
}

/// Count and rounded percentage for High, Medium and Low, in that order.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn urgency_distribution(signs: &[MonitoringSign]) -> Vec<UrgencyShare> {
    let total = signs.len().max(1);
    Urgency::LEVELS
        .iter()
        .map(|&urgency| {
            let count = signs.iter().filter(|s| s.urgency == urgency).count();
            let percent = (count as f64 / total as f64 * 100.0).round() as u8;
            UrgencyShare {
                urgency,
                count,
                percent,
            }
        })
        .collect()
}

/// Everything the forecast screen shows, derived from one prediction snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionView {
    pub summary: String,
    pub overall_score: u8,
    pub breakdown: RiskBreakdown,
    pub categories: Vec<CategoryRisk>,
    pub urgency: Vec<UrgencyShare>,
    pub monitoring_signs: Vec<MonitoringSign>,
}

impl PredictionView {
    #[must_use]
    pub fn from_prediction(prediction: &HealthPrediction) -> Self {
        let breakdown = RiskBreakdown::compute(prediction);
        Self {
            summary: prediction.summary.clone(),
            overall_score: breakdown.score,
            breakdown,
            categories: prediction
                .risk_categories
                .iter()
                .map(CategoryRisk::from_category)
                .collect(),
            urgency: urgency_distribution(&prediction.monitoring_signs),
            monitoring_signs: prediction.monitoring_signs.clone(),
        }
    }
}
