use std::future::Future;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::ui;

static SPINNERS: OnceLock<MultiProgress> = OnceLock::new();

/// Spinner on stderr while a request to a remote service is in flight.
/// Does nothing when progress output is disabled.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    #[must_use]
    pub fn spinner(message: &str) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = SPINNERS
            .get_or_init(MultiProgress::new)
            .add(ProgressBar::new_spinner());
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar: Some(bar) }
    }

    /// Await `request` behind a spinner. On failure the spinner is left on
    /// screen marked as failed.
    pub async fn wait_on<T, E>(
        message: &str,
        request: impl Future<Output = Result<T, E>>,
    ) -> Result<T, E> {
        let progress = Self::spinner(message);
        let result = request.await;
        match &result {
            Ok(_) => progress.clear(),
            Err(_) => progress.fail(),
        }
        result
    }

    pub fn clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    fn fail(&self) {
        if let Some(bar) = &self.bar {
            let message = format!("{} failed", bar.message().trim_end_matches('.'));
            bar.abandon_with_message(message);
        }
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        if let Some(bar) = &self.bar
            && !bar.is_finished()
        {
            bar.finish_and_clear();
        }
    }
}
