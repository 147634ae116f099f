//! Table renderings for analysis results and the forecast view.

use std::fmt::Write as _;

use ai360_core::analysis::{BloodReportAnalysis, DiagnosisResult};
use ai360_core::prediction::Urgency;
use ai360_risk::view::urgency_hex;
use ai360_risk::{PredictionView, RiskColor};
use serde::Serialize;

use super::table::{self, TableOptions};

const BAR_WIDTH: usize = 20;

/// A forecast as shown to the user, with where it came from.
#[derive(Debug, Serialize)]
pub struct PredictionReport {
    pub from_cache: bool,
    #[serde(flatten)]
    pub view: PredictionView,
}

/// ANSI truecolor foreground for a `#rrggbb` color.
fn hex_fg(hex: &str) -> String {
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|c| u8::from_str_radix(c, 16).ok())
            .unwrap_or(0)
    };
    format!("38;2;{};{};{}", channel(1..3), channel(3..5), channel(5..7))
}

fn colored(text: &str, hex: &str, options: TableOptions) -> String {
    if options.color {
        table::paint(text, &hex_fg(hex))
    } else {
        text.to_string()
    }
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("  {}. {item}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[must_use]
pub fn diagnosis(result: &DiagnosisResult, options: TableOptions) -> String {
    let mut out = table::render_pairs(
        &[
            ("condition", result.disease.clone()),
            ("likelihood", format!("{}%", result.probability_percent())),
            ("severity", result.severity.to_string()),
        ],
        options,
    );
    if !result.explanation.is_empty() {
        let _ = write!(out, "\n\n{}", result.explanation);
    }
    if !result.recommendations.is_empty() {
        let _ = write!(out, "\n\nRecommendations\n{}", numbered(&result.recommendations));
    }
    out
}

#[must_use]
pub fn report(analysis: &BloodReportAnalysis, options: TableOptions) -> String {
    let mut out = analysis.summary.clone();

    if analysis.markers.is_empty() {
        out.push_str("\n\n(no markers found)");
    } else {
        let rows = analysis
            .markers
            .iter()
            .map(|m| {
                vec![
                    m.name.clone(),
                    m.value.clone(),
                    m.status.to_string(),
                    m.meaning.clone(),
                ]
            })
            .collect::<Vec<_>>();
        let markers = table::render_table(&["marker", "value", "status", "meaning"], &rows, options);
        let flagged = analysis.flagged_markers().count();
        let _ = write!(
            out,
            "\n\n{markers}\n\n{flagged} of {} markers need attention",
            analysis.markers.len()
        );
    }

    if !analysis.advice.is_empty() {
        let _ = write!(out, "\n\nAdvice\n{}", analysis.advice);
    }
    out
}

#[must_use]
pub fn prediction(report: &PredictionReport, options: TableOptions) -> String {
    let view = &report.view;
    let overall_hex = RiskColor::for_score(view.overall_score).hex();
    let mut out = format!(
        "Overall risk  {}  {}",
        colored(&format!("{}/100", view.overall_score), overall_hex, options),
        colored(&table::bar(view.overall_score, BAR_WIDTH), overall_hex, options),
    );
    if report.from_cache {
        out.push_str("  (cached)");
    }
    if !view.summary.is_empty() {
        let _ = write!(out, "\n\n{}", view.summary);
    }

    if !view.categories.is_empty() {
        let rows = view
            .categories
            .iter()
            .map(|c| {
                let flagged = c.findings.iter().filter(|f| f.high_priority).count();
                vec![
                    c.category.clone(),
                    c.score.to_string(),
                    colored(&table::bar(c.score, BAR_WIDTH), c.color.hex(), options),
                    format!("{flagged}/{}", c.findings.len()),
                ]
            })
            .collect::<Vec<_>>();
        let _ = write!(
            out,
            "\n\n{}",
            table::render_table(&["category", "score", "risk", "priority"], &rows, options)
        );

        for category in &view.categories {
            let _ = write!(out, "\n\n{}", category.category);
            for finding in &category.findings {
                let marker = if finding.high_priority { "!" } else { "-" };
                let _ = write!(out, "\n  {marker} {}", finding.heading);
                for measure in &finding.measures {
                    let _ = write!(out, "\n      • {measure}");
                }
            }
        }
    }

    if !view.monitoring_signs.is_empty() {
        let rows = view
            .urgency
            .iter()
            .map(|share| {
                vec![
                    share.urgency.to_string(),
                    share.count.to_string(),
                    format!("{}%", share.percent),
                    colored(
                        &table::bar(share.percent, BAR_WIDTH),
                        urgency_hex(share.urgency),
                        options,
                    ),
                ]
            })
            .collect::<Vec<_>>();
        let _ = write!(
            out,
            "\n\nUrgency\n{}",
            table::render_table(&["urgency", "signs", "share", ""], &rows, options)
        );

        let signs = view
            .monitoring_signs
            .iter()
            .map(|s| {
                let urgency = if s.urgency == Urgency::Unspecified {
                    String::from("-")
                } else {
                    s.urgency.to_string()
                };
                vec![s.sign.clone(), urgency, s.description.clone()]
            })
            .collect::<Vec<_>>();
        let _ = write!(
            out,
            "\n\nMonitoring signs\n{}",
            table::render_table(&["sign", "urgency", "description"], &signs, options)
        );
    }

    out
}
