//! boardcast - Whiteboard lecture transcription from video
//!
//! Samples frames from a lecture video, transcribes them in parallel
//! against a remote vision API, and consolidates the surviving texts into
//! one deduplicated, timestamped transcript.

// Error handling discipline: propagate, don't panic
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod consolidate;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod transcribe;

// Core traits (frame → transcribe → consolidate)
pub use api::{ChatClient, ChatRequest, ChatResponse, HttpChatClient, MockChatClient};
pub use transcribe::{FrameText, FrameTranscriber, HttpTranscriptionClient, MockFrameTranscriber};

// Pipeline
pub use extract::{Frame, FrameExtractor, format_timestamp};
pub use pipeline::{BatchResult, ConsolidationEntry, FrameOutcome, OrderedDispatcher, OutcomeStatus, TranscriptReport};

// Consolidation
pub use consolidate::Consolidator;

// Error handling
pub use error::{BoardcastError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }
}
