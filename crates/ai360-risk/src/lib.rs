//! # ai360-risk
//!
//! Turns a loosely structured [`HealthPrediction`] into deterministic numbers.
//!
//! - [`overall_risk_score`]: weighted four-factor heuristic, 0-95
//! - [`category_risk_score`]: per-category share of high-priority findings,
//!   with keyword inference when nothing is flagged, 0-95
//! - [`PredictionView`]: everything the forecast screen renders, derived in
//!   one pass and recomputed whenever the prediction changes
//!
//! Scoring never fails. Missing items weigh nothing and every ratio guards
//! its denominator.
//!
//! [`HealthPrediction`]: ai360_core::prediction::HealthPrediction

pub mod keywords;
pub mod measures;
pub mod score;
pub mod view;

pub use measures::extract_measures;
pub use score::{RiskBreakdown, SCORE_CEILING, category_risk_score, overall_risk_score};
pub use view::{CategoryRisk, PredictionView, RiskColor, UrgencyShare};
