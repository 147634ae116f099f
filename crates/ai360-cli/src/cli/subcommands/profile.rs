use clap::{Args, Subcommand};

/// Stored profile management.
#[derive(Clone, Debug, Subcommand)]
pub enum ProfileCommands {
    /// Show the stored profile and the view the app would open on.
    Show,
    /// Create the profile (sign-up plus quiz) or update quiz answers.
    Set(ProfileSetArgs),
    /// Forget the stored profile.
    Logout,
}

#[derive(Clone, Debug, Default, Args)]
pub struct ProfileSetArgs {
    /// Sign up as the shared guest user instead of giving a name and email.
    #[arg(long, conflicts_with_all = ["name", "email"])]
    pub guest: bool,
    /// Full name (required for a new profile).
    #[arg(long)]
    pub name: Option<String>,
    /// Email (required for a new profile).
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub age: Option<String>,
    /// Male, Female, Other, or "Prefer not to say".
    #[arg(long)]
    pub gender: Option<String>,
    /// Existing conditions, free text.
    #[arg(long)]
    pub conditions: Option<String>,
    /// "Early diagnosis", "Understanding reports", or "Preventive care".
    #[arg(long)]
    pub goal: Option<String>,
}
