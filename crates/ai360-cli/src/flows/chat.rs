//! One chat exchange: cached answer if there is one, otherwise a streamed
//! reply that can be cancelled between fragments.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ai360_client::AssistantChat;
use ai360_client::prompts::CHAT_FAILURE_REPLY;
use ai360_store::{ChatCache, KeyValueStore};
use futures_util::StreamExt;
use serde::Serialize;
use tokio::sync::Notify;

struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Cooperative cancellation flag shared between the reader of a stream and
/// whoever wants it stopped.
#[derive(Clone)]
pub struct CancelToken {
    state: Arc<CancelState>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(CancelState {
                cancelled: AtomicBool::new(false),
                notify: Notify::new(),
            }),
        }
    }

    pub fn cancel(&self) {
        self.state.cancelled.store(true, Ordering::SeqCst);
        self.state.notify.notify_waiters();
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.state.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Cache,
    Stream,
    /// Stopped by the user. The text holds whatever arrived before.
    Cancelled,
    /// The service failed. The text is the friendly failure reply.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub text: String,
    pub source: ReplySource,
}

impl ChatReply {
    /// The cached answer for `query`, if there is one. Needs no assistant.
    pub fn cached<S: KeyValueStore>(cache: &ChatCache<S>, query: &str) -> Option<Self> {
        cache.get(query).map(|text| Self {
            text,
            source: ReplySource::Cache,
        })
    }

    fn failed() -> Self {
        Self {
            text: CHAT_FAILURE_REPLY.to_string(),
            source: ReplySource::Failed,
        }
    }
}

pub struct ChatFlow<A, S> {
    assistant: A,
    cache: ChatCache<S>,
}

impl<A: AssistantChat, S: KeyValueStore> ChatFlow<A, S> {
    pub const fn new(assistant: A, cache: ChatCache<S>) -> Self {
        Self { assistant, cache }
    }

    /// Answer `query`, passing each piece of text to `on_fragment` as it
    /// arrives. A cached answer is delivered as a single fragment.
    ///
    /// Only complete streamed replies are cached and committed to the
    /// conversation history.
    pub async fn ask<F>(&mut self, query: &str, cancel: &CancelToken, mut on_fragment: F) -> ChatReply
    where
        F: FnMut(&str),
    {
        if let Some(reply) = ChatReply::cached(&self.cache, query) {
            tracing::debug!("chat cache hit");
            on_fragment(&reply.text);
            return reply;
        }

        let started = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            started = self.assistant.send_message_stream(query) => Some(started),
        };
        let mut stream = match started {
            None => {
                return ChatReply {
                    text: String::new(),
                    source: ReplySource::Cancelled,
                };
            }
            Some(Ok(stream)) => stream,
            Some(Err(error)) => {
                tracing::error!(%error, "chat request failed");
                return ChatReply::failed();
            }
        };

        let mut reply = String::new();
        loop {
            let next = tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    tracing::debug!(received = reply.len(), "chat stream cancelled");
                    return ChatReply {
                        text: reply,
                        source: ReplySource::Cancelled,
                    };
                }
                next = stream.next() => next,
            };
            match next {
                Some(Ok(fragment)) => {
                    on_fragment(&fragment);
                    reply.push_str(&fragment);
                }
                Some(Err(error)) => {
                    tracing::error!(%error, "chat stream failed");
                    return ChatReply::failed();
                }
                None => break,
            }
        }

        self.assistant.commit_turn(query, &reply);
        if reply.trim().is_empty() {
            tracing::warn!("assistant returned an empty reply; not caching");
        } else if let Err(error) = self.cache.put(query, &reply) {
            tracing::warn!(%error, "failed to cache chat reply");
        }

        ChatReply {
            text: reply,
            source: ReplySource::Stream,
        }
    }
}
