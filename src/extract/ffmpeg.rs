//! Frame extraction via the ffmpeg subprocess.
//!
//! ffmpeg samples one frame per interval, scales it to fit a fixed square
//! and letterboxes the remainder, writing JPEGs into a temporary directory.
//! The JPEGs are decoded into memory immediately and the directory is
//! removed before the extractor returns, on every path.

use crate::error::{BoardcastError, Result};
use crate::extract::frame::Frame;
use std::path::{Path, PathBuf};
use std::process::Command;
use tokio::process::Command as AsyncCommand;

const FFMPEG: &str = "ffmpeg";
const FFPROBE: &str = "ffprobe";

/// Verify that ffmpeg and ffprobe are present on PATH.
///
/// Called eagerly, before any extraction work, so a missing tool surfaces
/// as `DependencyMissing` rather than a mid-extraction failure.
pub fn check_dependencies() -> Result<()> {
    for tool in [FFMPEG, FFPROBE] {
        if !command_ok(tool) {
            return Err(BoardcastError::DependencyMissing {
                tool: tool.to_string(),
            });
        }
    }
    Ok(())
}

/// Check if a command exists and responds to `-version`.
fn command_ok(command: &str) -> bool {
    Command::new(command)
        .arg("-version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Samples a video into an ordered sequence of timestamped frames.
#[derive(Debug, Clone)]
pub struct FrameExtractor {
    interval_secs: u32,
    frame_size: u32,
}

impl FrameExtractor {
    /// Creates an extractor with the given sampling interval and square
    /// output size.
    pub fn new(interval_secs: u32, frame_size: u32) -> Self {
        Self {
            interval_secs,
            frame_size,
        }
    }

    /// Extract frames from `video` into memory.
    ///
    /// All-or-nothing: a failed ffmpeg run never yields a partial frame
    /// list. Temporary storage is cleaned up regardless of outcome.
    ///
    /// # Errors
    ///
    /// - `DependencyMissing` if ffmpeg/ffprobe are not on PATH
    /// - `ExtractionFailed` if ffmpeg exits non-zero (unsupported codec,
    ///   corrupt input, ...)
    pub async fn extract(&self, video: &Path) -> Result<Vec<Frame>> {
        check_dependencies()?;

        let scratch = tempfile::Builder::new().prefix("boardcast_frames_").tempdir()?;
        let pattern = scratch.path().join("frame_%05d.jpg");

        let size = self.frame_size;
        let filter = format!(
            "fps=1/{interval},scale={size}:{size}:force_original_aspect_ratio=decrease,\
             pad={size}:{size}:(ow-iw)/2:(oh-ih)/2",
            interval = self.interval_secs,
        );

        let output = AsyncCommand::new(FFMPEG)
            .arg("-hide_banner")
            .args(["-loglevel", "error"])
            .arg("-i")
            .arg(video)
            .args(["-vf", &filter])
            .args(["-q:v", "2"])
            .arg(&pattern)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BoardcastError::DependencyMissing {
                        tool: FFMPEG.to_string(),
                    }
                } else {
                    BoardcastError::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BoardcastError::ExtractionFailed {
                message: stderr.trim().to_string(),
            });
        }

        let frames = self.load_frames(scratch.path())?;
        // scratch drops here, removing the directory and its JPEGs
        Ok(frames)
    }

    /// Decode the emitted JPEGs into memory in filename order.
    fn load_frames(&self, dir: &Path) -> Result<Vec<Frame>> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                let name = path.file_name()?.to_str()?;
                if name.starts_with("frame_") && name.ends_with(".jpg") {
                    Some(path)
                } else {
                    None
                }
            })
            .collect();
        paths.sort();

        let mut frames = Vec::with_capacity(paths.len());
        for (index, path) in paths.iter().enumerate() {
            let image = image::open(path)?;
            frames.push(Frame::new(index, image, self.interval_secs));
        }
        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, codecs::jpeg::JpegEncoder};
    use std::fs::File;

    fn write_jpeg(path: &Path) {
        let image = DynamicImage::new_rgb8(16, 16);
        let file = File::create(path).expect("create jpeg");
        let encoder = JpegEncoder::new_with_quality(file, 90);
        image
            .to_rgb8()
            .write_with_encoder(encoder)
            .expect("encode jpeg");
    }

    #[test]
    fn test_load_frames_orders_and_indexes() {
        let dir = tempfile::tempdir().expect("create temp dir");
        // Write out of name order to verify sorting
        for name in ["frame_00003.jpg", "frame_00001.jpg", "frame_00002.jpg"] {
            write_jpeg(&dir.path().join(name));
        }
        // Unrelated files are ignored
        std::fs::write(dir.path().join("notes.txt"), b"ignored").expect("write noise file");

        let extractor = FrameExtractor::new(30, 800);
        let frames = extractor.load_frames(dir.path()).expect("load frames");

        assert_eq!(frames.len(), 3);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.index, i);
        }
        assert_eq!(frames[0].timestamp, "0:00:00");
        assert_eq!(frames[1].timestamp, "0:00:30");
        assert_eq!(frames[2].timestamp, "0:01:00");
    }

    #[test]
    fn test_load_frames_empty_dir() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let extractor = FrameExtractor::new(30, 800);
        let frames = extractor.load_frames(dir.path()).expect("load frames");
        assert!(frames.is_empty());
    }

    #[tokio::test]
    async fn test_extract_corrupt_input_is_all_or_nothing() {
        // Only meaningful on hosts that have ffmpeg; skip otherwise.
        if check_dependencies().is_err() {
            eprintln!("ffmpeg not installed, skipping extraction test");
            return;
        }

        let dir = tempfile::tempdir().expect("create temp dir");
        let bogus = dir.path().join("not_a_video.mp4");
        std::fs::write(&bogus, b"definitely not an mp4").expect("write bogus video");

        let extractor = FrameExtractor::new(30, 800);
        let result = extractor.extract(&bogus).await;
        assert!(matches!(
            result,
            Err(BoardcastError::ExtractionFailed { .. })
        ));
    }
}
