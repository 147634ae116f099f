use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Profile { action } => commands::profile::handle(&action, ctx, flags),
        Commands::Overview => commands::overview::handle(ctx, flags),
        Commands::Diagnose(args) => commands::analyze::handle_diagnose(&args, ctx, flags).await,
        Commands::Report(args) => commands::analyze::handle_report(&args, ctx, flags).await,
        Commands::Predict(args) => commands::predict::handle(&args, ctx, flags).await,
        Commands::Chat(args) => commands::chat::handle(&args, ctx, flags).await,
        Commands::Speak(args) => commands::speak::handle(&args, ctx, flags).await,
        Commands::Cache { action } => commands::cache::handle(&action, ctx, flags),
    }
}
