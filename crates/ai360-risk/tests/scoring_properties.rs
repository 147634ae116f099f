//! Scoring properties and end-to-end scenarios on service-shaped JSON.

use ai360_core::prediction::HealthPrediction;
use ai360_risk::{PredictionView, SCORE_CEILING, category_risk_score, overall_risk_score};
use rstest::rstest;

fn parse(json: &str) -> HealthPrediction {
    serde_json::from_str(json).expect("fixture should parse")
}

#[test]
fn flagged_cardio_with_high_sign() {
    let prediction = parse(
        r#"{
            "riskCategories": [{"category": "Cardio", "items": [
                {"heading": "h", "description": "severe chronic risk", "isHighPriority": true}
            ]}],
            "monitoringSigns": [{"sign": "s", "description": "d", "urgency": "High"}]
        }"#,
    );

    let overall = overall_risk_score(&prediction);
    assert!((25..=95).contains(&overall), "overall was {overall}");
    assert_eq!(category_risk_score(&prediction.risk_categories[0]), 95);
}

#[test]
fn unflagged_routine_finding_defaults_to_moderate() {
    let prediction = parse(
        r#"{
            "riskCategories": [{"category": "Derm", "items": [
                {"heading": "a", "description": "no risk factors noted, routine check", "isHighPriority": false}
            ]}],
            "monitoringSigns": []
        }"#,
    );

    assert_eq!(category_risk_score(&prediction.risk_categories[0]), 30);
    assert_eq!(overall_risk_score(&prediction), 15);
}

#[test]
fn empty_prediction_scores_zero() {
    let prediction = parse(r#"{"riskCategories": [], "monitoringSigns": []}"#);
    assert_eq!(overall_risk_score(&prediction), 0);
}

#[test]
fn completely_empty_object_scores_zero() {
    assert_eq!(overall_risk_score(&parse("{}")), 0);
}

#[rstest]
#[case(r#"{"riskCategories": [{"category": "A", "items": [{"isHighPriority": true}]}]}"#)]
#[case(r#"{"riskCategories": [
    {"category": "A", "items": [{"description": "fine"}, {"description": "fine"}, {"description": "fine"}]},
    {"category": "B", "items": [{"description": "fine"}, {"isHighPriority": true}]}
]}"#)]
fn any_high_priority_item_scores_at_least_25(#[case] json: &str) {
    assert!(overall_risk_score(&parse(json)) >= 25);
}

#[test]
fn every_score_stays_within_bounds() {
    let fixtures = [
        "{}",
        r#"{"monitoringSigns": [{"urgency": "Low"}, {"urgency": "Medium"}]}"#,
        r#"{"riskCategories": [{"category": "A", "items": []}, {"category": "B"}]}"#,
        r#"{"riskCategories": [
            {"category": "A", "items": [{"description": "cancer stroke tumor", "isHighPriority": true},
                                        {"description": "critical", "isHighPriority": true}]},
            {"category": "B", "items": [{"description": "critical", "isHighPriority": true}]},
            {"category": "C", "items": [{"description": "critical", "isHighPriority": true}]},
            {"category": "D", "items": [{"description": "critical", "isHighPriority": true}]}
        ], "monitoringSigns": [{"urgency": "High"}, {"urgency": "High"}]}"#,
    ];

    for json in fixtures {
        let prediction = parse(json);
        assert!(overall_risk_score(&prediction) <= SCORE_CEILING);
        for category in &prediction.risk_categories {
            let score = category_risk_score(category);
            assert!(score <= SCORE_CEILING);
            assert_eq!(score == 0, category.items.is_empty());
        }
    }
}

#[test]
fn view_model_is_recomputed_from_the_snapshot() {
    let prediction = parse(
        r#"{
            "summary": "Watch blood pressure",
            "riskCategories": [
                {"category": "Cardio", "items": [
                    {"heading": "BP", "description": "1. Track readings twice daily\n2. Reduce salt in every meal", "isHighPriority": true},
                    {"heading": "Lipids", "description": "fine", "isHighPriority": false}
                ]}
            ],
            "monitoringSigns": [{"sign": "Dizziness", "description": "d", "urgency": "Medium"}]
        }"#,
    );

    let view = PredictionView::from_prediction(&prediction);
    assert_eq!(view.overall_score, overall_risk_score(&prediction));
    assert_eq!(view.categories[0].score, 50);
    assert_eq!(view.categories[0].color.hex(), "#f97316");
    assert_eq!(
        view.categories[0].findings[0].measures,
        vec!["Track readings twice daily", "Reduce salt in every meal"]
    );
    assert_eq!(view.urgency[1].percent, 100);
    assert_eq!(view.summary, "Watch blood pressure");
}

#[test]
fn malformed_entries_score_like_their_well_formed_remainder() {
    let mixed = parse(
        r#"{
            "riskCategories": [
                null,
                {"category": "Renal", "items": [
                    null,
                    {"heading": "eGFR", "description": "borderline", "isHighPriority": "yes"},
                    {"heading": "Creatinine", "description": "severe elevation", "isHighPriority": true}
                ]},
                {"category": 7, "items": "none"}
            ],
            "monitoringSigns": [
                {"sign": "Swelling", "description": "ankles", "urgency": 3},
                "High",
                {"sign": "Fatigue", "description": "daily", "urgency": "Medium"}
            ]
        }"#,
    );
    let clean = parse(
        r#"{
            "riskCategories": [
                {"category": "Renal", "items": [
                    {"heading": "eGFR", "description": "borderline", "isHighPriority": false},
                    {"heading": "Creatinine", "description": "severe elevation", "isHighPriority": true}
                ]},
                {"category": "", "items": []}
            ],
            "monitoringSigns": [
                {"sign": "Swelling", "description": "ankles"},
                {"sign": "Fatigue", "description": "daily", "urgency": "Medium"}
            ]
        }"#,
    );

    assert_eq!(mixed, clean);
    assert_eq!(overall_risk_score(&mixed), overall_risk_score(&clean));
    assert!(overall_risk_score(&mixed) >= 25);
    assert_eq!(
        category_risk_score(&mixed.risk_categories[0]),
        category_risk_score(&clean.risk_categories[0])
    );
}
