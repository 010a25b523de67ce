//! Error types for boardcast.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoardcastError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Input validation errors
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    // Frame extraction errors
    #[error("Required tool not found on PATH: {tool}")]
    DependencyMissing { tool: String },

    #[error("Frame extraction failed: {message}")]
    ExtractionFailed { message: String },

    // Per-frame transcription errors
    #[error("Encoded image payload is {encoded_len} chars, exceeds limit of {limit}")]
    PayloadTooLarge { encoded_len: usize, limit: usize },

    // Batch-level errors
    #[error("No frame produced usable text ({frames_total} attempted)")]
    NoValidFrames { frames_total: usize },

    // Remote API errors
    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {attempts} attempts")]
    RateLimited { attempts: u32 },

    #[error("Consolidation failed: {message}")]
    Consolidation { message: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    // Image decode/encode errors
    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

impl BoardcastError {
    /// Whether this error class is worth retrying after a backoff.
    ///
    /// Only rate limiting (HTTP 429) and transient transport failures
    /// (timeouts, connection errors) qualify. Authentication failures,
    /// malformed requests and everything else propagate immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            BoardcastError::Api { status, .. } => *status == 429,
            BoardcastError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, BoardcastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dependency_missing_display() {
        let error = BoardcastError::DependencyMissing {
            tool: "ffmpeg".to_string(),
        };
        assert_eq!(error.to_string(), "Required tool not found on PATH: ffmpeg");
    }

    #[test]
    fn test_payload_too_large_display() {
        let error = BoardcastError::PayloadTooLarge {
            encoded_len: 200_000,
            limit: 180_000,
        };
        let msg = error.to_string();
        assert!(msg.contains("200000"));
        assert!(msg.contains("180000"));
    }

    #[test]
    fn test_no_valid_frames_display() {
        let error = BoardcastError::NoValidFrames { frames_total: 7 };
        assert!(error.to_string().contains("7 attempted"));
    }

    #[test]
    fn test_rate_limit_is_retryable() {
        let error = BoardcastError::Api {
            status: 429,
            message: "too many requests".to_string(),
        };
        assert!(error.is_retryable());
    }

    #[test]
    fn test_auth_failure_is_not_retryable() {
        let error = BoardcastError::Api {
            status: 401,
            message: "invalid key".to_string(),
        };
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_batch_errors_are_not_retryable() {
        assert!(!BoardcastError::NoValidFrames { frames_total: 3 }.is_retryable());
        assert!(
            !BoardcastError::Consolidation {
                message: "bad response".to_string()
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let error: BoardcastError = io_error.into();
        assert!(matches!(error, BoardcastError::Io(_)));
    }
}
