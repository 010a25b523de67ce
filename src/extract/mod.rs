//! Video frame sampling.
//!
//! Turns a video asset into an ordered, timestamped sequence of in-memory
//! frames via the `ffmpeg` subprocess.

pub mod ffmpeg;
pub mod frame;

pub use ffmpeg::{FrameExtractor, check_dependencies};
pub use frame::{Frame, format_timestamp};
