//! The per-frame transcription client.
//!
//! One frame in, text or a typed failure out. The client deliberately does
//! no retrying of its own: the dispatcher already tolerates individual
//! frame losses, so a per-frame retry would only add tail latency.

use crate::api::{ChatClient, ChatRequest};
use crate::config::TranscriptionConfig;
use crate::defaults;
use crate::error::{BoardcastError, Result};
use crate::extract::Frame;
use crate::transcribe::image_prep::encode_for_api;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Result of a technically successful transcription call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameText {
    /// The model returned text.
    Text(String),
    /// The call succeeded but yielded no content (blank board, no result).
    Empty,
}

/// Trait for per-frame transcription.
///
/// This trait allows swapping implementations (real HTTP vs mock). The
/// HTTP implementation reads only the frame's image; index and timestamp
/// ride along so mocks can key behavior per frame.
#[async_trait]
pub trait FrameTranscriber: Send + Sync {
    /// Transcribe one frame's image.
    ///
    /// # Returns
    /// `FrameText::Text` with the transcription, `FrameText::Empty` for a
    /// successful call with no content, or an error for payload/transport
    /// failures.
    async fn transcribe(&self, frame: &Frame) -> Result<FrameText>;
}

/// HTTP transcription client against a chat-completions vision API.
pub struct HttpTranscriptionClient {
    chat: Arc<dyn ChatClient>,
    config: TranscriptionConfig,
}

impl HttpTranscriptionClient {
    pub fn new(chat: Arc<dyn ChatClient>, config: TranscriptionConfig) -> Self {
        Self { chat, config }
    }

    /// Build the single-message prompt embedding the base64 JPEG.
    fn build_prompt(image_b64: &str) -> String {
        format!(
            "Transcribe the handwritten text in this image exactly as written. \
             Only output the text content and nothing else. \
             <img src=\"data:image/jpeg;base64,{image_b64}\" />"
        )
    }
}

#[async_trait]
impl FrameTranscriber for HttpTranscriptionClient {
    async fn transcribe(&self, frame: &Frame) -> Result<FrameText> {
        // Local envelope check first; an oversized payload never reaches
        // the network.
        let image_b64 = encode_for_api(
            &frame.image,
            defaults::MAX_IMAGE_DIM,
            defaults::JPEG_QUALITY,
            defaults::MAX_ENCODED_LEN,
        )?;

        let mut request = ChatRequest::new(&self.config.model, Self::build_prompt(&image_b64));
        request.max_tokens = Some(self.config.max_tokens);
        request.temperature = Some(defaults::TEMPERATURE);
        request.top_p = Some(defaults::TOP_P);

        let response = self.chat.complete(&request).await?;
        match response.text() {
            Some(text) => Ok(FrameText::Text(text.to_string())),
            None => Ok(FrameText::Empty),
        }
    }
}

/// Scripted behavior for one frame in [`MockFrameTranscriber`].
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return this text.
    Text(String),
    /// Return a successful empty result.
    Empty,
    /// Fail with a transcription error carrying this message.
    Fail(String),
    /// Panic inside the call, to exercise task-panic containment.
    Panic,
}

/// Mock transcriber for testing.
///
/// Behavior is keyed by frame index, with a configurable default. An
/// optional per-frame delay lets tests scramble completion order; the mock
/// also records the highest number of concurrently running calls it
/// observed, for asserting pool bounds.
pub struct MockFrameTranscriber {
    behaviors: HashMap<usize, MockBehavior>,
    default: MockBehavior,
    delays_ms: HashMap<usize, u64>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockFrameTranscriber {
    /// Create a mock that returns `"mock transcription"` for every frame.
    pub fn new() -> Self {
        Self {
            behaviors: HashMap::new(),
            default: MockBehavior::Text("mock transcription".to_string()),
            delays_ms: HashMap::new(),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Set the behavior for one frame index.
    pub fn with_behavior(mut self, index: usize, behavior: MockBehavior) -> Self {
        self.behaviors.insert(index, behavior);
        self
    }

    /// Set the default behavior for unscripted indices.
    pub fn with_default(mut self, behavior: MockBehavior) -> Self {
        self.default = behavior;
        self
    }

    /// Delay the call for one frame index, to vary completion order.
    pub fn with_delay_ms(mut self, index: usize, delay_ms: u64) -> Self {
        self.delays_ms.insert(index, delay_ms);
        self
    }

    /// Highest number of concurrently running calls observed so far.
    pub fn max_observed_concurrency(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl Default for MockFrameTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FrameTranscriber for MockFrameTranscriber {
    async fn transcribe(&self, frame: &Frame) -> Result<FrameText> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = self.delays_ms.get(&frame.index) {
            tokio::time::sleep(std::time::Duration::from_millis(*delay)).await;
        }

        let behavior = self.behaviors.get(&frame.index).unwrap_or(&self.default);
        let result = match behavior {
            MockBehavior::Text(text) => Ok(FrameText::Text(text.clone())),
            MockBehavior::Empty => Ok(FrameText::Empty),
            MockBehavior::Fail(message) => Err(BoardcastError::Other(message.clone())),
            MockBehavior::Panic => panic!("scripted panic for frame {}", frame.index),
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
