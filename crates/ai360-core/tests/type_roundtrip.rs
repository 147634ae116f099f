//! Serde roundtrip and JsonSchema validation tests for cached and persisted types.

use ai360_core::analysis::*;
use ai360_core::prediction::*;
use ai360_core::profile::UserProfile;
use ai360_core::views::{AppView, DashboardSection};
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

roundtrip_and_validate!(
    prediction_roundtrip,
    HealthPrediction,
    HealthPrediction {
        summary: "Stable with cardiovascular watch points".into(),
        risk_categories: vec![RiskCategory {
            category: "Cardiovascular".into(),
            items: vec![RiskItem {
                heading: "Blood pressure".into(),
                description: "Elevated readings suggest early stage hypertension".into(),
                is_high_priority: true,
            }],
        }],
        monitoring_signs: vec![MonitoringSign {
            sign: "Chest tightness".into(),
            description: "Seek care if it persists".into(),
            urgency: Urgency::High,
        }],
    }
);

roundtrip_and_validate!(
    report_roundtrip,
    BloodReportAnalysis,
    BloodReportAnalysis {
        summary: "Mostly within range".into(),
        markers: vec![BloodMarker {
            name: "LDL".into(),
            value: "162 mg/dL".into(),
            status: MarkerStatus::Abnormal,
            meaning: "Raised cholesterol".into(),
        }],
        advice: "Discuss lipid management with your doctor".into(),
    }
);

roundtrip_and_validate!(
    diagnosis_roundtrip,
    DiagnosisResult,
    DiagnosisResult {
        disease: "Contact dermatitis".into(),
        probability: 72.0,
        severity: Severity::Medium,
        explanation: "Localized erythema".into(),
        recommendations: vec!["Avoid irritants".into()],
    }
);

roundtrip_and_validate!(
    profile_roundtrip,
    UserProfile,
    UserProfile {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        age: Some("42".into()),
        gender: None,
        conditions: None,
        goal: Some("Preventive care".into()),
    }
);

roundtrip_and_validate!(view_roundtrip, AppView, AppView::Quiz);

roundtrip_and_validate!(
    section_roundtrip,
    DashboardSection,
    DashboardSection::Chatbot
);

#[test]
fn prediction_wire_names_are_camel_case() {
    let value = serde_json::to_value(HealthPrediction {
        risk_categories: vec![RiskCategory {
            category: "c".into(),
            items: vec![RiskItem::default()],
        }],
        ..HealthPrediction::default()
    })
    .unwrap();
    assert!(value.get("riskCategories").is_some());
    assert!(value.get("monitoringSigns").is_some());
    assert!(value["riskCategories"][0]["items"][0].get("isHighPriority").is_some());
}
