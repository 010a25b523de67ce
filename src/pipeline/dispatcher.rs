//! Ordered dispatch of frame-transcription tasks.
//!
//! The concurrency core. One independent task per frame runs against the
//! transcription client, bounded by a semaphore sized from the worker-pool
//! sizer and capped at the frame count. Tasks complete in any order; each
//! settles into exactly one index-keyed outcome, collected by a single
//! join loop. Chronological order is restored by an explicit sort; no
//! downstream code may assume completion order, and no frame failure ever
//! aborts the batch.

use crate::error::{BoardcastError, Result};
use crate::extract::Frame;
use crate::pipeline::types::{BatchResult, ConsolidationEntry, FrameOutcome, OutcomeStatus};
use crate::pipeline::workers;
use crate::transcribe::{FrameText, FrameTranscriber};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Dispatches one batch of frames through a bounded worker pool and
/// reconstructs chronological order from unordered completions.
pub struct OrderedDispatcher {
    transcriber: Arc<dyn FrameTranscriber>,
    configured_workers: usize,
}

impl OrderedDispatcher {
    /// Creates a dispatcher with an explicit worker-pool size.
    pub fn new(transcriber: Arc<dyn FrameTranscriber>, workers: usize) -> Self {
        Self {
            transcriber,
            configured_workers: workers,
        }
    }

    /// Creates a dispatcher sized from this host's detected parallelism.
    pub fn sized_for_host(transcriber: Arc<dyn FrameTranscriber>) -> Self {
        Self::new(transcriber, workers::detected_workers())
    }

    /// Worker count actually used for a batch of `frame_count` frames.
    ///
    /// A batch never allocates more workers than it has frames.
    pub fn effective_workers(&self, frame_count: usize) -> usize {
        self.configured_workers.min(frame_count).max(1)
    }

    /// Run the batch: transcribe every frame concurrently, collect one
    /// outcome per frame, sort by index and filter down to usable texts.
    ///
    /// Individual frame failures are absorbed as `Failed`/`Empty` outcomes
    /// and never cancel sibling tasks.
    ///
    /// Frames must carry the indices their extractor assigned, exactly
    /// `0..N-1` for a batch of N; the result container is keyed by them,
    /// and a batch violating this trips the full-count assert below.
    ///
    /// # Errors
    ///
    /// `NoValidFrames` when a non-empty batch yields no usable text at
    /// all. An empty batch returns an empty result without error.
    pub async fn dispatch(&self, frames: Vec<Frame>) -> Result<BatchResult> {
        let frames_total = frames.len();
        if frames_total == 0 {
            return Ok(BatchResult {
                outcomes: Vec::new(),
                entries: Vec::new(),
                frames_succeeded: 0,
                frames_total: 0,
            });
        }

        // Timestamps by index, for outcomes whose task never settled
        let mut timestamps = vec![String::new(); frames_total];
        for frame in &frames {
            if let Some(slot) = timestamps.get_mut(frame.index) {
                *slot = frame.timestamp.clone();
            }
        }

        let semaphore = Arc::new(Semaphore::new(self.effective_workers(frames_total)));
        let mut tasks: JoinSet<FrameOutcome> = JoinSet::new();

        for frame in frames {
            let semaphore = semaphore.clone();
            let transcriber = self.transcriber.clone();
            tasks.spawn(async move {
                let index = frame.index;
                let timestamp = frame.timestamp.clone();
                let status = match semaphore.acquire_owned().await {
                    Ok(_permit) => match transcriber.transcribe(&frame).await {
                        Ok(FrameText::Text(text)) if !text.trim().is_empty() => {
                            OutcomeStatus::Success(text)
                        }
                        Ok(_) => OutcomeStatus::Empty,
                        Err(e) => OutcomeStatus::Failed(e.to_string()),
                    },
                    // Semaphore closed mid-batch means we are shutting down
                    Err(_) => OutcomeStatus::Failed("worker pool closed".to_string()),
                };
                FrameOutcome {
                    index,
                    status,
                    timestamp,
                }
            });
        }

        // Single collector: one outcome lands per completion event, in
        // whatever order tasks finish.
        let mut outcomes: Vec<FrameOutcome> = Vec::with_capacity(frames_total);
        let mut settled = vec![false; frames_total];
        while let Some(joined) = tasks.join_next().await {
            if let Ok(outcome) = joined {
                if let Some(slot) = settled.get_mut(outcome.index) {
                    *slot = true;
                }
                outcomes.push(outcome);
            }
            // A panicked task is recorded below once its index is known
            // to be missing; siblings keep running either way.
        }
        for (index, seen) in settled.iter().enumerate() {
            if !seen {
                outcomes.push(FrameOutcome {
                    index,
                    status: OutcomeStatus::Failed("transcription task panicked".to_string()),
                    timestamp: timestamps.get(index).cloned().unwrap_or_default(),
                });
            }
        }

        // Restore chronological order; completion order is meaningless.
        outcomes.sort_by_key(|outcome| outcome.index);
        assert_eq!(
            outcomes.len(),
            frames_total,
            "result set must contain exactly one outcome per frame"
        );

        let entries: Vec<ConsolidationEntry> = outcomes
            .iter()
            .filter(|outcome| outcome.is_usable())
            .map(|outcome| match &outcome.status {
                OutcomeStatus::Success(text) => ConsolidationEntry {
                    text: text.clone(),
                    timestamp: outcome.timestamp.clone(),
                },
                // is_usable() only passes Success
                _ => unreachable!("filtered to usable outcomes"),
            })
            .collect();

        let frames_succeeded = entries.len();
        if frames_succeeded == 0 {
            return Err(BoardcastError::NoValidFrames { frames_total });
        }

        Ok(BatchResult {
            outcomes,
            entries,
            frames_succeeded,
            frames_total,
        })
    }
}
