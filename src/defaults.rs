//! Default configuration constants for boardcast.
//!
//! This module provides shared constants used across different configuration
//! types to ensure consistency and eliminate duplication.

/// Default sampling interval in seconds between extracted frames.
///
/// Whiteboard content changes slowly; one frame every 30 seconds captures
/// each board state at least once while keeping API usage low.
pub const INTERVAL_SECS: u32 = 30;

/// Side length in pixels of the square frames ffmpeg emits.
///
/// Frames are scaled to fit and letterboxed to this size. 800px keeps
/// handwriting legible for the vision model while staying well inside the
/// API's payload budget.
pub const FRAME_SIZE: u32 = 800;

/// Maximum pixel dimension (either axis) for images sent to the
/// transcription API. Larger inputs are downsized preserving aspect ratio.
pub const MAX_IMAGE_DIM: u32 = 800;

/// JPEG quality for API-bound images.
pub const JPEG_QUALITY: u8 = 70;

/// Hard upper bound on the base64-encoded image payload, in characters.
///
/// Requests that would exceed this fail locally as `PayloadTooLarge`
/// without touching the network.
pub const MAX_ENCODED_LEN: usize = 180_000;

/// Token budget for a single per-frame transcription response.
pub const MAX_TOKENS: u32 = 512;

/// Sampling temperature for the vision model. Low, for near-deterministic
/// transcription rather than creative output.
pub const TEMPERATURE: f32 = 0.2;

/// Nucleus sampling parameter for the vision model.
pub const TOP_P: f32 = 1.0;

/// Default per-frame transcription request timeout in seconds.
pub const TRANSCRIPTION_TIMEOUT_SECS: u64 = 60;

/// Default consolidation request timeout in seconds.
///
/// The merge prompt carries every frame's text, so the remote call is
/// substantially slower than a per-frame transcription.
pub const CONSOLIDATION_TIMEOUT_SECS: u64 = 180;

/// Maximum attempts for the consolidation call, including the first.
pub const MAX_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds before the first retry.
/// Doubles on each subsequent attempt.
pub const INITIAL_BACKOFF_MS: u64 = 1000;

/// CPU count assumed when available parallelism cannot be detected.
pub const FALLBACK_CPU_COUNT: usize = 4;

/// Lower bound on the transcription worker pool.
pub const MIN_WORKERS: usize = 2;

/// Upper bound on the transcription worker pool. The work is network-bound,
/// so going wider than this only multiplies open connections.
pub const MAX_WORKERS: usize = 20;

/// Width of the `=` separator line between entries in the consolidation
/// payload.
pub const ENTRY_SEPARATOR_WIDTH: usize = 50;

/// Default endpoint for the vision-transcription API.
pub const TRANSCRIPTION_ENDPOINT: &str = "https://integrate.api.nvidia.com/v1/chat/completions";

/// Default vision model for per-frame transcription.
pub const TRANSCRIPTION_MODEL: &str = "meta/llama-4-scout-17b-16e-instruct";

/// Default endpoint for the text-consolidation API.
pub const CONSOLIDATION_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model for the consolidation pass.
pub const CONSOLIDATION_MODEL: &str = "google/gemini-2.0-flash-001";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_bounds_are_sane() {
        assert!(MIN_WORKERS >= 1);
        assert!(MIN_WORKERS < MAX_WORKERS);
    }

    #[test]
    fn frame_fits_inside_api_envelope() {
        assert!(FRAME_SIZE <= MAX_IMAGE_DIM);
    }

    #[test]
    fn retry_schedule_is_bounded() {
        assert!(MAX_RETRIES >= 1);
        assert!(INITIAL_BACKOFF_MS > 0);
    }
}
