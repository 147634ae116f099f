use clap::Subcommand;

/// Response cache management.
#[derive(Clone, Debug, Subcommand)]
pub enum CacheCommands {
    /// Show cache statistics.
    Stats,
    /// Clear cached answers. With no flag, clears both caches.
    Clear {
        /// Clear cached chat answers.
        #[arg(long)]
        chat: bool,
        /// Clear cached forecasts.
        #[arg(long)]
        predictions: bool,
    },
}
