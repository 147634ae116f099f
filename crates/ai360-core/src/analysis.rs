//! Result types for image diagnosis and lab report analysis.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::lenient::null_as_default;

/// Severity of a finding from image diagnosis.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Severity {
    High,
    Medium,
    #[default]
    #[serde(other)]
    Low,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the image diagnosis service (eye, skin, lung X-ray, brain MRI).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DiagnosisResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub disease: String,
    /// Likelihood of the finding, 0-100.
    #[serde(default, deserialize_with = "null_as_default")]
    pub probability: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub severity: Severity,
    #[serde(default, deserialize_with = "null_as_default")]
    pub explanation: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<String>,
}

impl DiagnosisResult {
    /// Probability clamped into the 0-100 range and rounded.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn probability_percent(&self) -> u8 {
        if self.probability.is_nan() {
            return 0;
        }
        self.probability.clamp(0.0, 100.0).round() as u8
    }
}

/// Interpretation of one lab marker.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum MarkerStatus {
    #[default]
    Normal,
    Borderline,
    Abnormal,
    #[serde(other)]
    Unknown,
}

impl MarkerStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Borderline => "Borderline",
            Self::Abnormal => "Abnormal",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for MarkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single marker read from a lab report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BloodMarker {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: MarkerStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meaning: String,
}

/// Output of the report OCR and analysis service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BloodReportAnalysis {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub markers: Vec<BloodMarker>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub advice: String,
}

const MISSING: &str = "—";

static PACKED_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([\d.]+\s?.*?)(?:status:|$)").expect("value pattern is valid")
});
static PACKED_STATUS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)status:\s*([a-z]+)").expect("status pattern is valid"));
static PACKED_MEANING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)meaning:\s*(.*)$").expect("meaning pattern is valid"));

impl MarkerStatus {
    /// Case-insensitive parse of a status word; anything else is `Unknown`.
    #[must_use]
    pub fn from_word(word: &str) -> Self {
        match word.trim().to_ascii_lowercase().as_str() {
            "normal" => Self::Normal,
            "borderline" => Self::Borderline,
            "abnormal" => Self::Abnormal,
            _ => Self::Unknown,
        }
    }
}

impl BloodMarker {
    /// Unpack a value the service stuffed with `Status:` and `Meaning:`
    /// parts (e.g. `"13.5 g/dL Status: Normal Meaning: ..."`) and fill
    /// blank text fields with a dash.
    #[must_use]
    pub fn normalized(self) -> Self {
        let raw = self.value.trim();
        let capture = |re: &Regex| {
            re.captures(raw)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str().trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or_missing = |v: String| if v.trim().is_empty() { MISSING.to_string() } else { v };

        let value = capture(&PACKED_VALUE).unwrap_or_else(|| raw.to_string());
        let status = capture(&PACKED_STATUS).map_or(self.status, |w| MarkerStatus::from_word(&w));
        let meaning = capture(&PACKED_MEANING).unwrap_or(self.meaning);

        Self {
            name: or_missing(self.name),
            value: or_missing(value),
            status,
            meaning: or_missing(meaning),
        }
    }
}

impl BloodReportAnalysis {
    /// Normalize every marker, see [`BloodMarker::normalized`].
    #[must_use]
    pub fn with_normalized_markers(mut self) -> Self {
        self.markers = self.markers.into_iter().map(BloodMarker::normalized).collect();
        self
    }

    /// Markers the report flags as borderline or abnormal.
    pub fn flagged_markers(&self) -> impl Iterator<Item = &BloodMarker> {
        self.markers
            .iter()
            .filter(|m| matches!(m.status, MarkerStatus::Borderline | MarkerStatus::Abnormal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnosis_parses_and_clamps_probability() {
        let result: DiagnosisResult = serde_json::from_str(
            r#"{"disease": "Eczema", "probability": 134.6, "severity": "Medium",
                "explanation": "dry patches", "recommendations": ["moisturize"]}"#,
        )
        .unwrap();
        assert_eq!(result.severity, Severity::Medium);
        assert_eq!(result.probability_percent(), 100);
    }

    #[test]
    fn unknown_severity_reads_as_low() {
        let result: DiagnosisResult =
            serde_json::from_str(r#"{"severity": "Moderate"}"#).unwrap();
        assert_eq!(result.severity, Severity::Low);
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn flagged_markers_skip_normal_ones() {
        let report: BloodReportAnalysis = serde_json::from_str(
            r#"{"summary": "s", "advice": "a", "markers": [
                {"name": "Hemoglobin", "value": "13.5", "status": "Normal", "meaning": ""},
                {"name": "LDL", "value": "165", "status": "Abnormal", "meaning": ""},
                {"name": "Glucose", "value": "110", "status": "Borderline", "meaning": ""}
            ]}"#,
        )
        .unwrap();
        let names: Vec<&str> = report.flagged_markers().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["LDL", "Glucose"]);
    }

    #[test]
    fn packed_marker_values_are_unpacked() {
        let marker = BloodMarker {
            name: "Glucose".into(),
            value: "110 mg/dL Status: borderline Meaning: slightly above fasting range".into(),
            status: MarkerStatus::Normal,
            meaning: String::new(),
        }
        .normalized();
        assert_eq!(marker.value, "110 mg/dL");
        assert_eq!(marker.status, MarkerStatus::Borderline);
        assert_eq!(marker.meaning, "slightly above fasting range");
    }

    #[test]
    fn clean_markers_keep_their_fields_and_blanks_get_a_dash() {
        let marker = BloodMarker {
            name: String::new(),
            value: "13.5 g/dL".into(),
            status: MarkerStatus::Abnormal,
            meaning: "Oxygen transport".into(),
        }
        .normalized();
        assert_eq!(marker.name, "—");
        assert_eq!(marker.value, "13.5 g/dL");
        assert_eq!(marker.status, MarkerStatus::Abnormal);
        assert_eq!(marker.meaning, "Oxygen transport");

        let empty = BloodMarker::default().normalized();
        assert_eq!(empty.value, "—");
        assert_eq!(empty.meaning, "—");
    }
}
