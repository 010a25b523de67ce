//! Whiteboard transcription entry points.
//!
//! Wires the complete flow for one asset:
//! extract → dispatch → consolidate (video), or a single transcription
//! call (image).

use crate::api::{ChatClient, HttpChatClient};
use crate::config::Config;
use crate::consolidate::Consolidator;
use crate::diagnostics::check_api_keys;
use crate::error::{BoardcastError, Result};
use crate::extract::{Frame, FrameExtractor, check_dependencies};
use crate::output::{report_counts, write_transcript};
use crate::pipeline::{OrderedDispatcher, TranscriptReport, workers};
use crate::transcribe::{FrameTranscriber, HttpTranscriptionClient};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Video container extensions routed through frame extraction. Anything
/// else is treated as a single image.
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "webm", "m4v", "mpg", "mpeg"];

/// Whether the asset looks like a video by extension.
pub fn is_video_asset(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            VIDEO_EXTENSIONS.iter().any(|v| *v == ext)
        })
        .unwrap_or(false)
}

/// Validate the asset path before any processing starts.
fn validate_input(asset: &Path) -> Result<()> {
    let metadata = std::fs::metadata(asset).map_err(|_| BoardcastError::InvalidInput {
        message: format!("input file not found: {}", asset.display()),
    })?;
    if !metadata.is_file() {
        return Err(BoardcastError::InvalidInput {
            message: format!("not a file: {}", asset.display()),
        });
    }
    if metadata.len() == 0 {
        return Err(BoardcastError::InvalidInput {
            message: format!("input file is empty: {}", asset.display()),
        });
    }
    Ok(())
}

/// Build the per-frame transcription client from configuration.
fn build_transcriber(config: &Config) -> Result<Arc<dyn FrameTranscriber>> {
    let chat: Arc<dyn ChatClient> = Arc::new(HttpChatClient::new(
        &config.transcription.endpoint,
        &config.transcription.api_key,
        Duration::from_secs(config.transcription.timeout_secs),
    )?);
    Ok(Arc::new(HttpTranscriptionClient::new(
        chat,
        config.transcription.clone(),
    )))
}

/// Build the consolidator from configuration.
fn build_consolidator(config: &Config) -> Result<Consolidator> {
    let chat: Arc<dyn ChatClient> = Arc::new(HttpChatClient::new(
        &config.consolidation.endpoint,
        &config.consolidation.api_key,
        Duration::from_secs(config.consolidation.timeout_secs),
    )?);
    Ok(Consolidator::new(chat, config.consolidation.clone()))
}

/// Worker-pool size: explicit config override, else host-sized.
fn worker_count(config: &Config) -> usize {
    if config.dispatch.workers > 0 {
        config.dispatch.workers
    } else {
        workers::detected_workers()
    }
}

/// Transcribe a video: sample frames, transcribe them in parallel, and
/// consolidate the survivors into one transcript.
pub async fn run_video(config: &Config, video: &Path, quiet: bool) -> Result<TranscriptReport> {
    validate_input(video)?;
    check_dependencies()?;

    let extractor = FrameExtractor::new(
        config.extraction.interval_secs,
        config.extraction.frame_size,
    );
    if !quiet {
        eprintln!(
            "Sampling frames every {}s...",
            config.extraction.interval_secs
        );
    }
    let frames = extractor.extract(video).await?;
    if frames.is_empty() {
        return Err(BoardcastError::ExtractionFailed {
            message: "video produced no frames".to_string(),
        });
    }
    if !quiet {
        eprintln!("Extracted {} frames", frames.len());
    }

    let transcriber = build_transcriber(config)?;
    let dispatcher = OrderedDispatcher::new(transcriber, worker_count(config));
    if !quiet {
        eprintln!(
            "Transcribing with up to {} workers...",
            dispatcher.effective_workers(frames.len())
        );
    }
    let batch = dispatcher.dispatch(frames).await?;
    if !quiet {
        eprintln!(
            "Transcribed {}/{} frames, consolidating...",
            batch.frames_succeeded, batch.frames_total
        );
    }

    let consolidator = build_consolidator(config)?;
    let transcript = consolidator.consolidate(&batch.entries).await?;

    Ok(TranscriptReport {
        transcript,
        frames_succeeded: batch.frames_succeeded,
        frames_total: batch.frames_total,
    })
}

/// Transcribe a single image with one remote call. No consolidation pass.
pub async fn run_image(config: &Config, image_path: &Path) -> Result<String> {
    validate_input(image_path)?;

    let image = image::open(image_path)?;
    let frame = Frame::new(0, image, config.extraction.interval_secs);

    let transcriber = build_transcriber(config)?;
    match transcriber.transcribe(&frame).await? {
        crate::transcribe::FrameText::Text(text) => Ok(text),
        crate::transcribe::FrameText::Empty => Ok(String::new()),
    }
}

/// Run the transcribe command for one asset, routing by type.
pub async fn run_transcribe_command(
    mut config: Config,
    asset: PathBuf,
    force_image: bool,
    interval: Option<u32>,
    worker_override: Option<usize>,
    output: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    // Apply CLI overrides
    if let Some(secs) = interval {
        if secs == 0 {
            return Err(BoardcastError::ConfigInvalidValue {
                key: "interval".to_string(),
                message: "sampling interval must be at least 1 second".to_string(),
            });
        }
        config.extraction.interval_secs = secs;
    }
    if let Some(count) = worker_override {
        config.dispatch.workers = count;
    }

    let (keys_ok, message) = check_api_keys(&config);
    if !keys_ok {
        return Err(BoardcastError::ConfigInvalidValue {
            key: "api_key".to_string(),
            message,
        });
    }

    if !force_image && is_video_asset(&asset) {
        let report = run_video(&config, &asset, quiet).await?;
        write_transcript(&report.transcript, output.as_deref())?;
        if !quiet {
            report_counts(&report);
        }
    } else {
        let transcript = run_image(&config, &asset).await?;
        write_transcript(&transcript, output.as_deref())?;
    }
    Ok(())
}
