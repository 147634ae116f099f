use std::path::Path;

use ai360_client::ImageInput;
use ai360_core::analysis::BloodReportAnalysis;
use ai360_core::outcome::ExternalOutcome;
use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImageArgs;
use crate::context::AppContext;
use crate::output::{self, views};
use crate::progress::Progress;

async fn read_image(path: &Path) -> anyhow::Result<ImageInput> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read image {}", path.display()))?;
    Ok(ImageInput::for_path(path, &bytes)?)
}

fn count_usage(recorded: Result<u64, ai360_store::StoreError>, counter: &str) {
    if let Err(error) = recorded {
        tracing::warn!(%error, counter, "failed to update usage counter");
    }
}

/// Handle `ai360 diagnose <IMAGE>`.
pub async fn handle_diagnose(
    args: &ImageArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let image = read_image(&args.image).await?;
    let gemini = ctx.gemini()?;

    let result = Progress::wait_on("Analyzing image...", gemini.diagnose_image(&image)).await;
    if result.is_ok() {
        count_usage(ctx.usage().record_scan(), "scans");
    }
    let outcome = ExternalOutcome::from_result(result);

    output::output_outcome(&outcome, flags.format, views::diagnosis)?;
    output::disclaimer(flags);
    Ok(())
}

/// Handle `ai360 report <IMAGE>`.
pub async fn handle_report(
    args: &ImageArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let image = read_image(&args.image).await?;
    let gemini = ctx.gemini()?;

    let result = Progress::wait_on("Reading report...", gemini.analyze_report(&image))
        .await
        .map(BloodReportAnalysis::with_normalized_markers);
    if result.is_ok() {
        count_usage(ctx.usage().record_report(), "reports");
    }
    let outcome = ExternalOutcome::from_result(result);

    output::output_outcome(&outcome, flags.format, views::report)?;
    output::disclaimer(flags);
    Ok(())
}
