use std::path::Path;

use ai360_core::analysis::DiagnosisResult;
use ai360_core::outcome::ExternalOutcome;
use ai360_risk::PredictionView;
use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PredictArgs;
use crate::context::AppContext;
use crate::flows::{PredictionFlow, PredictionOutcome};
use crate::output::views::{self, PredictionReport};
use crate::output::{self, Reported};
use crate::progress::Progress;

fn load_diagnosis(path: &Path) -> anyhow::Result<DiagnosisResult> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read diagnosis file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a diagnosis result", path.display()))
}

/// Handle `ai360 predict`.
pub async fn handle(args: &PredictArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let profile = ctx.require_profile()?;
    let diagnosis = args.diagnosis.as_deref().map(load_diagnosis).transpose()?;

    let flow = PredictionFlow::new(
        ctx.gemini()?,
        ctx.prediction_cache(),
        ctx.config.general.request_timeout(),
    );

    let result = Progress::wait_on(
        "Generating health forecast...",
        flow.fetch(&profile, diagnosis.as_ref(), args.refresh),
    )
    .await;

    let outcome = match result {
        Ok(PredictionOutcome::Ready {
            prediction,
            from_cache,
        }) => ExternalOutcome::Ok {
            value: PredictionReport {
                from_cache,
                view: PredictionView::from_prediction(&prediction),
            },
        },
        Ok(PredictionOutcome::Superseded) => {
            tracing::warn!("forecast was superseded by a newer request");
            return Err(Reported.into());
        }
        Err(error) => ExternalOutcome::from_result(Err::<PredictionReport, _>(error)),
    };

    output::output_outcome(&outcome, flags.format, views::prediction)?;
    output::disclaimer(flags);
    Ok(())
}
