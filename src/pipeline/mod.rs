//! The concurrent frame-transcription pipeline.
//!
//! Frames go in ordered, get transcribed in parallel by a bounded worker
//! pool, and come out as an index-ordered, failure-tolerant result set
//! ready for consolidation.

pub mod dispatcher;
pub mod types;
pub mod workers;

pub use dispatcher::OrderedDispatcher;
pub use types::{BatchResult, ConsolidationEntry, FrameOutcome, OutcomeStatus, TranscriptReport};
pub use workers::{detected_workers, optimal_workers};
