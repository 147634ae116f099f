use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{CacheCommands, ProfileCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign up, update, show, or forget the stored profile.
    Profile {
        #[command(subcommand)]
        action: ProfileCommands,
    },
    /// Profile summary and usage counters.
    Overview,
    /// Analyze a medical image (eye, skin, lung X-ray, brain MRI).
    Diagnose(ImageArgs),
    /// Explain a blood report from a photo or scan.
    Report(ImageArgs),
    /// Forecast health risks for the stored profile.
    Predict(PredictArgs),
    /// Ask the health assistant a question.
    Chat(ChatArgs),
    /// Synthesize speech for a piece of text.
    Speak(SpeakArgs),
    /// Inspect or clear cached answers.
    Cache {
        #[command(subcommand)]
        action: CacheCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct ImageArgs {
    /// Image file (jpg, png, webp, heic, heif).
    pub image: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct PredictArgs {
    /// Ignore a cached forecast and ask the service again.
    #[arg(long)]
    pub refresh: bool,

    /// JSON file with a recent diagnosis result to include.
    #[arg(long, value_name = "FILE")]
    pub diagnosis: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct ChatArgs {
    /// Question for the assistant.
    #[arg(required = true, num_args = 1..)]
    pub message: Vec<String>,

    /// Also write the reply as speech to this file.
    #[arg(long, value_name = "FILE")]
    pub speak: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct SpeakArgs {
    /// Text to read aloud.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Where to write the audio (MPEG).
    #[arg(short, long, value_name = "FILE")]
    pub out: PathBuf,
}
