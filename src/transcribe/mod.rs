//! Per-frame transcription against the remote vision API.

pub mod client;
pub mod image_prep;

pub use client::{FrameText, FrameTranscriber, HttpTranscriptionClient, MockFrameTranscriber};
pub use image_prep::encode_for_api;
