use std::io;
use std::path::Path;

use ai360_client::{AssistantChat, SpeechSynthesizer};
use ai360_client::prompts::{CHAT_GREETING, QUICK_ACTIONS, chat_system_prompt};
use ai360_core::profile::UserProfile;
use ai360_store::KeyValueStore;
use anyhow::Context;
use serde::Serialize;

use crate::cli::root_commands::ChatArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::flows::{CancelToken, ChatFlow, ChatReply, ReplySource};
use crate::output::{self, MessagePrinter, Reported};
use crate::ui;

#[derive(Debug, Serialize)]
struct ChatReport<'a> {
    question: &'a str,
    #[serde(flatten)]
    reply: &'a ChatReply,
}

/// Cancel `token` on Ctrl-C. The returned handle should be aborted once the
/// exchange is over.
fn cancel_on_ctrl_c(token: &CancelToken) -> tokio::task::JoinHandle<()> {
    let token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    })
}

fn print_intro() {
    println!("{CHAT_GREETING}");
    println!("Try: {}\n", QUICK_ACTIONS.join(" | "));
}

/// Handle `ai360 chat <MESSAGE>`.
pub async fn handle(args: &ChatArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let question = args.message.join(" ");
    let profile = ctx.require_profile()?;
    let reply = answer(&question, &profile, ctx, flags).await?;

    if flags.format != OutputFormat::Table {
        let report = ChatReport {
            question: &question,
            reply: &reply,
        };
        output::output(&report, flags.format, output::object_table)?;
    }

    match reply.source {
        ReplySource::Failed => return Err(Reported.into()),
        ReplySource::Cancelled => {
            eprintln!("(reply cancelled)");
            return Ok(());
        }
        ReplySource::Cache | ReplySource::Stream => {}
    }

    if let Some(path) = &args.speak {
        speak_reply(ctx, &reply.text, path).await?;
    }
    output::disclaimer(flags);
    Ok(())
}

/// Answer from the local cache when possible. The Gemini client is only
/// required on a cache miss.
async fn answer(
    question: &str,
    profile: &UserProfile,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<ChatReply> {
    let table = flags.format == OutputFormat::Table;
    if table && !flags.quiet {
        print_intro();
    }

    let cache = ctx.chat_cache();
    if let Some(reply) = ChatReply::cached(&cache, question) {
        tracing::debug!("chat cache hit");
        if table {
            let mut printer = MessagePrinter::new(io::stdout(), ui::prefs().table_color);
            printer.push(&reply.text)?;
            printer.finish()?;
        }
        return Ok(reply);
    }

    let session = ctx.gemini()?.start_chat(chat_system_prompt(profile));
    let mut flow = ChatFlow::new(session, cache);
    let cancel = CancelToken::new();
    let watcher = cancel_on_ctrl_c(&cancel);

    let reply = if table {
        ask_streaming(&mut flow, question, &cancel).await
    } else {
        Ok(flow.ask(question, &cancel, |_| {}).await)
    };
    watcher.abort();
    reply
}

/// Ask and print the reply to stdout as it streams in.
async fn ask_streaming<A, S>(
    flow: &mut ChatFlow<A, S>,
    question: &str,
    cancel: &CancelToken,
) -> anyhow::Result<ChatReply>
where
    A: AssistantChat,
    S: KeyValueStore,
{
    let mut printer = MessagePrinter::new(io::stdout(), ui::prefs().table_color);
    let mut write_error = None;
    let mut printed = false;

    let reply = flow
        .ask(question, cancel, |fragment| {
            printed = true;
            if write_error.is_none()
                && let Err(error) = printer.push(fragment)
            {
                write_error = Some(error);
            }
        })
        .await;

    if reply.source == ReplySource::Failed {
        if printed {
            printer.push("\n")?;
        }
        printer.push(&reply.text)?;
    }
    printer.finish()?;
    if let Some(error) = write_error {
        return Err(error).context("failed to write reply");
    }
    Ok(reply)
}

async fn speak_reply(ctx: &AppContext, text: &str, path: &Path) -> anyhow::Result<()> {
    let speech = ctx.speech()?;
    match speech.synthesize(text).await {
        Some(audio) => {
            tokio::fs::write(path, audio)
                .await
                .with_context(|| format!("failed to write audio to {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote spoken reply");
        }
        None => tracing::warn!("speech unavailable; reply was not written as audio"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_report_flattens_the_reply() {
        let reply = ChatReply {
            text: "Drink water.".into(),
            source: ReplySource::Cache,
        };
        let report = ChatReport {
            question: "hydration?",
            reply: &reply,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["question"], "hydration?");
        assert_eq!(json["text"], "Drink water.");
        assert_eq!(json["source"], "cache");
    }

    #[tokio::test]
    async fn cached_answer_needs_no_gemini_key() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppContext::for_dir(dir.path());
        assert!(ctx.gemini().is_err());
        ctx.chat_cache().put("Hydration tips?", "Drink water.").unwrap();

        let flags = GlobalFlags {
            format: OutputFormat::Json,
            quiet: true,
            verbose: false,
            data_dir: None,
        };
        let reply = answer("  hydration TIPS?", &UserProfile::default(), &ctx, &flags)
            .await
            .unwrap();
        assert_eq!(reply.text, "Drink water.");
        assert_eq!(reply.source, ReplySource::Cache);
    }

    #[tokio::test]
    async fn cache_miss_still_requires_gemini() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = AppContext::for_dir(dir.path());
        let flags = GlobalFlags {
            format: OutputFormat::Raw,
            quiet: true,
            verbose: false,
            data_dir: None,
        };

        let err = answer("hello", &UserProfile::default(), &ctx, &flags)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("AI360_GEMINI__API_KEY"));
    }

    #[tokio::test]
    async fn ctrl_c_watcher_can_be_aborted() {
        let cancel = CancelToken::new();
        let watcher = cancel_on_ctrl_c(&cancel);
        watcher.abort();
        assert!(watcher.await.unwrap_err().is_cancelled());
        assert!(!cancel.is_cancelled());
    }
}
