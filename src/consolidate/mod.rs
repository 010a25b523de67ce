//! The consolidation pass.
//!
//! Merges the ordered, filtered per-frame texts into one deduplicated
//! transcript via a single remote call, retried with exponential backoff
//! on rate limiting and transient transport failures.

pub mod prompt;

pub use prompt::{NO_CONTENT_RESULT, build_payload, build_prompt};

use crate::api::{ChatClient, ChatRequest};
use crate::config::ConsolidationConfig;
use crate::error::{BoardcastError, Result};
use crate::pipeline::ConsolidationEntry;
use std::sync::Arc;
use std::time::Duration;

/// Merges ordered per-frame texts into one transcript.
pub struct Consolidator {
    chat: Arc<dyn ChatClient>,
    config: ConsolidationConfig,
}

impl Consolidator {
    pub fn new(chat: Arc<dyn ChatClient>, config: ConsolidationConfig) -> Self {
        Self { chat, config }
    }

    /// Consolidate the entries into a single cleaned transcript.
    ///
    /// Empty input short-circuits to [`NO_CONTENT_RESULT`] without a
    /// network call. The remote text is returned verbatim.
    ///
    /// # Errors
    ///
    /// `Consolidation` if the remote call yields no content; rate-limit
    /// and transport errors after the retry budget is exhausted; any
    /// non-retryable API error immediately.
    pub async fn consolidate(&self, entries: &[ConsolidationEntry]) -> Result<String> {
        if entries.is_empty() {
            return Ok(NO_CONTENT_RESULT.to_string());
        }

        let request = ChatRequest::new(&self.config.model, build_prompt(entries));
        let response = self.send_with_retry(&request).await?;

        match response.text() {
            Some(text) => Ok(text.to_string()),
            None => Err(BoardcastError::Consolidation {
                message: "consolidation call returned no content".to_string(),
            }),
        }
    }

    /// Bounded retry loop around the remote call.
    ///
    /// Retries only errors classified retryable (HTTP 429, transient
    /// transport); everything else propagates immediately. The delay
    /// starts at the configured initial backoff and doubles per attempt.
    /// Exhaustion propagates the last observed error with no final sleep.
    async fn send_with_retry(&self, request: &ChatRequest) -> Result<crate::api::ChatResponse> {
        let max_attempts = self.config.max_retries.max(1);
        let mut delay = Duration::from_millis(self.config.initial_backoff_ms);

        for attempt in 1..=max_attempts {
            match self.chat.complete(request).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < max_attempts => {
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
                Err(e) => return Err(e),
            }
        }
        // 1..=max_attempts always returns from inside the loop
        unreachable!("retry loop returns on every path")
    }
}
