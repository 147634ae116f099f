//! The health prediction aggregate returned by the forecasting service.
//!
//! A [`HealthPrediction`] is built from one external call, optionally cached,
//! displayed, and replaced wholesale on the next fetch. Nothing here is ever
//! partially updated. Every field deserializes leniently: missing, `null` or
//! wrong-typed values become empty defaults, and list entries that are not
//! well-formed objects are dropped, so scoring only ever sees usable data.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lenient::{or_default, skip_invalid};

// ---------------------------------------------------------------------------
// Urgency
// ---------------------------------------------------------------------------

/// Three-level ordinal attached to a monitoring sign.
///
/// Values the service sends outside the three known levels deserialize as
/// [`Urgency::Unspecified`], which weighs like `Low` in scoring but is not
/// counted in any bucket of the urgency distribution.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Urgency {
    Low,
    Medium,
    High,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl Urgency {
    /// The three levels shown in the urgency distribution, most urgent first.
    pub const LEVELS: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Ordinal weight used by the overall risk score.
    #[must_use]
    pub const fn weight(self) -> u32 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low | Self::Unspecified => 1,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Unspecified => "Unspecified",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// Atomic finding within a risk category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskItem {
    #[serde(default, deserialize_with = "or_default")]
    pub heading: String,
    #[serde(default, deserialize_with = "or_default")]
    pub description: String,
    #[serde(default, deserialize_with = "or_default")]
    pub is_high_priority: bool,
}

impl RiskItem {
    /// Heading and description joined and lowercased, for keyword scans.
    #[must_use]
    pub fn search_text(&self) -> String {
        format!("{} {}", self.heading, self.description).to_lowercase()
    }
}

/// One clinical domain (e.g. "Cardiovascular") and its findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RiskCategory {
    #[serde(default, deserialize_with = "or_default")]
    pub category: String,
    #[serde(default, deserialize_with = "skip_invalid")]
    pub items: Vec<RiskItem>,
}

impl RiskCategory {
    #[must_use]
    pub fn high_priority_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_high_priority).count()
    }
}

/// An early warning sign the user should watch for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonitoringSign {
    #[serde(default, deserialize_with = "or_default")]
    pub sign: String,
    #[serde(default, deserialize_with = "or_default")]
    pub description: String,
    #[serde(default, deserialize_with = "or_default")]
    pub urgency: Urgency,
}

/// Aggregate root produced by the prediction service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthPrediction {
    #[serde(default, deserialize_with = "or_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "skip_invalid")]
    pub risk_categories: Vec<RiskCategory>,
    #[serde(default, deserialize_with = "skip_invalid")]
    pub monitoring_signs: Vec<MonitoringSign>,
}

impl HealthPrediction {
    /// Iterate every item across all categories.
    pub fn items(&self) -> impl Iterator<Item = &RiskItem> {
        self.risk_categories.iter().flat_map(|cat| cat.items.iter())
    }

    #[must_use]
    pub fn has_high_urgency_sign(&self) -> bool {
        self.monitoring_signs
            .iter()
            .any(|sign| sign.urgency == Urgency::High)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_camel_case_service_output() {
        let json = r#"{
            "summary": "Overall stable",
            "riskCategories": [
                {"category": "Cardio", "items": [
                    {"heading": "BP", "description": "elevated", "isHighPriority": true}
                ]}
            ],
            "monitoringSigns": [
                {"sign": "Headache", "description": "persistent", "urgency": "Medium"}
            ]
        }"#;

        let prediction: HealthPrediction = serde_json::from_str(json).unwrap();
        assert_eq!(prediction.summary, "Overall stable");
        assert_eq!(prediction.risk_categories[0].high_priority_count(), 1);
        assert_eq!(prediction.monitoring_signs[0].urgency, Urgency::Medium);
    }

    #[test]
    fn missing_and_null_fields_fall_back_to_defaults() {
        let json = r#"{
            "riskCategories": [{"category": "Derm", "items": null}, {"items": [{}]}],
            "monitoringSigns": null
        }"#;

        let prediction: HealthPrediction = serde_json::from_str(json).unwrap();
        assert!(prediction.summary.is_empty());
        assert!(prediction.risk_categories[0].items.is_empty());
        assert_eq!(prediction.risk_categories[1].category, "");
        assert!(!prediction.risk_categories[1].items[0].is_high_priority);
        assert!(prediction.monitoring_signs.is_empty());
    }

    #[test]
    fn unknown_urgency_is_unspecified_and_weighs_like_low() {
        let sign: MonitoringSign =
            serde_json::from_str(r#"{"sign": "s", "description": "d", "urgency": "Critical"}"#)
                .unwrap();
        assert_eq!(sign.urgency, Urgency::Unspecified);
        assert_eq!(sign.urgency.weight(), Urgency::Low.weight());
    }

    #[test]
    fn search_text_is_lowercased_heading_and_description() {
        let item = RiskItem {
            heading: "Heart".into(),
            description: "Severe Strain".into(),
            is_high_priority: false,
        };
        assert_eq!(item.search_text(), "heart severe strain");
    }

    #[test]
    fn malformed_entries_are_dropped_and_wrong_types_defaulted() {
        let json = r#"{
            "riskCategories": [
                "Cardio",
                {"category": "Renal", "items": [
                    null,
                    {"heading": "eGFR", "description": "low", "isHighPriority": "yes"},
                    {"heading": "Creatinine", "description": "high", "isHighPriority": true}
                ]}
            ],
            "monitoringSigns": [
                {"sign": "Swelling", "description": "ankles", "urgency": 3},
                42
            ]
        }"#;

        let prediction: HealthPrediction = serde_json::from_str(json).unwrap();
        assert_eq!(prediction.risk_categories.len(), 1);
        let renal = &prediction.risk_categories[0];
        assert_eq!(renal.items.len(), 2);
        assert!(!renal.items[0].is_high_priority);
        assert_eq!(renal.high_priority_count(), 1);
        assert_eq!(prediction.monitoring_signs.len(), 1);
        assert_eq!(prediction.monitoring_signs[0].urgency, Urgency::Unspecified);
    }
}
