use ai360_store::prediction_cache::{clear_predictions, count_predictions};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CacheCommands;
use crate::context::AppContext;
use crate::output;

#[derive(Debug, Serialize)]
pub struct CacheStats {
    pub chat_entries: usize,
    pub chat_capacity: usize,
    pub predictions: usize,
    pub prediction_ttl_secs: u64,
    pub store: String,
}

#[derive(Debug, Default, Serialize)]
pub struct ClearReport {
    pub chat_cleared: bool,
    pub predictions_removed: usize,
}

/// Handle `ai360 cache`.
pub fn handle(action: &CacheCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        CacheCommands::Stats => {
            let stats = stats(ctx)?;
            output::output(&stats, flags.format, output::object_table)
        }
        CacheCommands::Clear { chat, predictions } => {
            let both = !chat && !predictions;
            let report = clear(ctx, *chat || both, *predictions || both)?;
            output::output(&report, flags.format, output::object_table)
        }
    }
}

fn stats(ctx: &AppContext) -> anyhow::Result<CacheStats> {
    Ok(CacheStats {
        chat_entries: ctx.chat_cache().len(),
        chat_capacity: ctx.config.cache.chat_capacity,
        predictions: count_predictions(ctx.store.as_ref())?,
        prediction_ttl_secs: ctx.config.cache.prediction_ttl_secs,
        store: ctx.store.path().display().to_string(),
    })
}

fn clear(ctx: &AppContext, chat: bool, predictions: bool) -> anyhow::Result<ClearReport> {
    let mut report = ClearReport::default();
    if chat {
        ctx.chat_cache().clear()?;
        report.chat_cleared = true;
    }
    if predictions {
        report.predictions_removed = clear_predictions(ctx.store.as_ref())?;
    }
    tracing::debug!(?report, "cache cleared");
    Ok(report)
}
