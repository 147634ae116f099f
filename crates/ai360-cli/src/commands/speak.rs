use ai360_core::outcome::ExternalOutcome;
use ai360_core::text::speech_text;
use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SpeakArgs;
use crate::context::AppContext;
use crate::output::{self, table};
use crate::progress::Progress;

#[derive(Debug, Serialize)]
pub struct SpeechFile {
    pub path: String,
    pub bytes: usize,
}

/// Handle `ai360 speak <TEXT> --out <FILE>`.
pub async fn handle(args: &SpeakArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = speech_text(&args.text.join(" "));
    if text.trim().is_empty() {
        anyhow::bail!("nothing to say");
    }
    let speech = ctx.speech()?;

    let result = Progress::wait_on("Synthesizing speech...", speech.try_synthesize(&text)).await;

    let outcome = match result {
        Ok(audio) => {
            tokio::fs::write(&args.out, &audio)
                .await
                .with_context(|| format!("failed to write audio to {}", args.out.display()))?;
            ExternalOutcome::Ok {
                value: SpeechFile {
                    path: args.out.display().to_string(),
                    bytes: audio.len(),
                },
            }
        }
        Err(error) => ExternalOutcome::from_result(Err::<SpeechFile, _>(error)),
    };

    output::output_outcome(&outcome, flags.format, |file, options| {
        table::render_pairs(
            &[("audio", file.path.clone()), ("bytes", file.bytes.to_string())],
            options,
        )
    })
}
