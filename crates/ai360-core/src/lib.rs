//! # ai360-core
//!
//! Core types and error normalization shared by every ai360 crate.
//!
//! This crate provides:
//! - The prediction aggregate returned by the forecasting service
//! - Result types for image diagnosis and lab report analysis
//! - The user profile and onboarding answer validation
//! - App view and dashboard section state machines
//! - The tagged [`outcome::ExternalOutcome`] union for vendor calls
//! - Chat message formatting helpers

pub mod analysis;
pub mod errors;
pub mod outcome;
pub mod prediction;
pub mod profile;
pub mod text;
pub mod views;

mod lenient;

/// Shown next to every AI-generated result.
pub const SYSTEM_DISCLAIMER: &str = "This platform is for informational purposes only and does not replace professional medical advice. Always consult a qualified healthcare provider.";
