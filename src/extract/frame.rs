//! The sampled-frame record and its timestamp rendering.

use image::DynamicImage;

/// One sampled, normalized frame extracted from a video.
///
/// `index` is unique and strictly increasing from 0 in sampling order;
/// `timestamp` is the video offset of the sample, `index × interval`,
/// rendered as `h:mm:ss`. Frames are immutable after creation and each is
/// moved into exactly one transcription task.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Zero-based position in the sampled sequence.
    pub index: usize,
    /// Decoded, RGB-normalized raster.
    pub image: DynamicImage,
    /// Video offset of this sample, rendered `h:mm:ss`.
    pub timestamp: String,
}

impl Frame {
    /// Creates a frame, deriving the timestamp from index and interval.
    pub fn new(index: usize, image: DynamicImage, interval_secs: u32) -> Self {
        Self {
            index,
            image,
            timestamp: format_timestamp(index, interval_secs),
        }
    }
}

/// Render `index × interval_secs` as `h:mm:ss`.
///
/// Hours are unpadded; minutes and seconds are zero-padded to two digits.
pub fn format_timestamp(index: usize, interval_secs: u32) -> String {
    let total = index as u64 * interval_secs as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{}:{:02}:{:02}", hours, minutes, seconds)
}
