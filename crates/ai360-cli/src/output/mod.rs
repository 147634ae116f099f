use ai360_core::SYSTEM_DISCLAIMER;
use ai360_core::outcome::ExternalOutcome;
use serde::Serialize;
use serde_json::Value;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::ui;

pub mod message;
pub mod table;
pub mod views;

pub use message::MessagePrinter;
pub use table::TableOptions;

/// A failure that has already been shown to the user. `main` exits non-zero
/// without printing it again.
#[derive(Debug, thiserror::Error)]
#[error("command failed")]
pub struct Reported;

#[must_use]
pub fn table_options() -> TableOptions {
    let prefs = ui::prefs();
    TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Render `value` in the requested format, using `table` for table output.
pub fn render<T, F>(value: &T, format: OutputFormat, table: F) -> anyhow::Result<String>
where
    T: Serialize,
    F: FnOnce(&T, TableOptions) -> String,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Table => Ok(table(value, table_options())),
    }
}

/// Print `value` in the requested format.
pub fn output<T, F>(value: &T, format: OutputFormat, table: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T, TableOptions) -> String,
{
    println!("{}", render(value, format, table)?);
    Ok(())
}

/// Print the result of a call to an external service.
///
/// In table mode a failure is written to stderr as a single message; JSON
/// and raw output always carry the tagged outcome. Either way a failure
/// makes the command exit non-zero.
pub fn output_outcome<T, F>(
    outcome: &ExternalOutcome<T>,
    format: OutputFormat,
    table: F,
) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T, TableOptions) -> String,
{
    match (format, outcome) {
        (OutputFormat::Table, ExternalOutcome::Ok { value }) => {
            println!("{}", table(value, table_options()));
        }
        (OutputFormat::Table, ExternalOutcome::Error { message, cause }) => {
            if let Some(cause) = cause {
                tracing::debug!(%cause, "external call failed");
            }
            eprintln!("error: {message}");
        }
        _ => println!("{}", render(outcome, format, |_, _| String::new())?),
    }

    if outcome.is_ok() {
        Ok(())
    } else {
        Err(Reported.into())
    }
}

/// Generic key/value table for any serializable object.
#[must_use]
pub fn object_table<T: Serialize>(value: &T, options: TableOptions) -> String {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => {
            let pairs = map
                .iter()
                .map(|(key, value)| (key.as_str(), value_to_cell(value)))
                .collect::<Vec<_>>();
            table::render_pairs(&pairs, options)
        }
        Ok(other) => value_to_cell(&other),
        Err(error) => format!("<unrenderable: {error}>"),
    }
}

pub fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => String::from(if *v { "yes" } else { "no" }),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

/// Print the medical disclaimer next to a result. Table output gets it on
/// stdout; machine-readable formats keep stdout clean and use stderr.
pub fn disclaimer(flags: &GlobalFlags) {
    if flags.quiet {
        return;
    }
    if flags.format == OutputFormat::Table {
        let text = if ui::prefs().table_color {
            table::paint(SYSTEM_DISCLAIMER, "2")
        } else {
            SYSTEM_DISCLAIMER.to_string()
        };
        println!("\n{text}");
    } else {
        eprintln!("{SYSTEM_DISCLAIMER}");
    }
}
