//! Health forecast retrieval.
//!
//! Cache first, then the prediction service under a client-side timeout.
//! Every fetch takes a ticket from a generation counter; a result that comes
//! back after a newer fetch has started is dropped instead of overwriting
//! newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ai360_client::{ClientError, HealthPredictor};
use ai360_core::analysis::DiagnosisResult;
use ai360_core::errors::CoreError;
use ai360_core::prediction::HealthPrediction;
use ai360_core::profile::UserProfile;
use ai360_store::{Clock, KeyValueStore, PredictionCache};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error(transparent)]
    Insufficient(#[from] CoreError),

    /// Raised locally when the service has not answered in time.
    #[error("Request timed out. Please try again.")]
    TimedOut,

    #[error(transparent)]
    Service(#[from] ClientError),
}

#[derive(Debug)]
pub enum PredictionOutcome {
    Ready {
        prediction: HealthPrediction,
        from_cache: bool,
    },
    /// A newer fetch started while this one was in flight.
    Superseded,
}

pub struct PredictionFlow<P, S, C> {
    predictor: P,
    cache: PredictionCache<S, C>,
    timeout: Duration,
    generation: AtomicU64,
}

impl<P, S, C> PredictionFlow<P, S, C>
where
    P: HealthPredictor,
    S: KeyValueStore,
    C: Clock,
{
    pub const fn new(predictor: P, cache: PredictionCache<S, C>, timeout: Duration) -> Self {
        Self {
            predictor,
            cache,
            timeout,
            generation: AtomicU64::new(0),
        }
    }

    /// Start a new fetch generation, making every earlier ticket stale.
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    #[must_use]
    pub fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    /// Forecast for `profile`. With `refresh`, the cached entry is dropped
    /// first so the service is always asked.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::Insufficient`] before any call when the
    /// profile lacks the minimum fields, [`PredictionError::TimedOut`] when
    /// the service misses the deadline, and [`PredictionError::Service`]
    /// for any other failure.
    pub async fn fetch(
        &self,
        profile: &UserProfile,
        diagnosis: Option<&DiagnosisResult>,
        refresh: bool,
    ) -> Result<PredictionOutcome, PredictionError> {
        let ticket = self.begin();

        if refresh {
            if let Err(error) = self.cache.invalidate(profile) {
                tracing::warn!(%error, "failed to drop cached prediction");
            }
        } else if let Some(prediction) = self.cache.get(profile) {
            tracing::debug!(ticket, "prediction cache hit");
            return Ok(PredictionOutcome::Ready {
                prediction,
                from_cache: true,
            });
        }

        profile.ensure_prediction_ready()?;

        tracing::debug!(ticket, timeout_secs = self.timeout.as_secs(), "requesting prediction");
        let result =
            tokio::time::timeout(self.timeout, self.predictor.predict(profile, diagnosis)).await;

        if !self.is_current(ticket) {
            tracing::warn!(ticket, "discarding stale prediction result");
            return Ok(PredictionOutcome::Superseded);
        }

        let prediction = result.map_err(|_| PredictionError::TimedOut)??;

        if let Err(error) = self.cache.put(profile, &prediction) {
            tracing::warn!(%error, "failed to cache prediction");
        }

        Ok(PredictionOutcome::Ready {
            prediction,
            from_cache: false,
        })
    }
}
