use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub transcription: TranscriptionConfig,
    pub consolidation: ConsolidationConfig,
    pub dispatch: DispatchConfig,
}

/// Frame extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Seconds between sampled frames
    pub interval_secs: u32,
    /// Side length of the square letterboxed output frames
    pub frame_size: u32,
}

/// Per-frame vision-transcription API configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    /// Wall-clock timeout per request, in seconds
    pub timeout_secs: u64,
}

/// Consolidation API configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConsolidationConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    /// Maximum attempts (including the first) on rate limiting
    pub max_retries: u32,
    /// Delay before the first retry; doubles each attempt
    pub initial_backoff_ms: u64,
    /// Wall-clock timeout per request, in seconds
    pub timeout_secs: u64,
}

/// Worker dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DispatchConfig {
    /// Worker count override; 0 means size from available parallelism
    pub workers: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            interval_secs: defaults::INTERVAL_SECS,
            frame_size: defaults::FRAME_SIZE,
        }
    }
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::TRANSCRIPTION_ENDPOINT.to_string(),
            api_key: String::new(),
            model: defaults::TRANSCRIPTION_MODEL.to_string(),
            max_tokens: defaults::MAX_TOKENS,
            timeout_secs: defaults::TRANSCRIPTION_TIMEOUT_SECS,
        }
    }
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::CONSOLIDATION_ENDPOINT.to_string(),
            api_key: String::new(),
            model: defaults::CONSOLIDATION_MODEL.to_string(),
            max_retries: defaults::MAX_RETRIES,
            initial_backoff_ms: defaults::INITIAL_BACKOFF_MS,
            timeout_secs: defaults::CONSOLIDATION_TIMEOUT_SECS,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { workers: 0 }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - BOARDCAST_TRANSCRIPTION_API_KEY → transcription.api_key
    /// - BOARDCAST_CONSOLIDATION_API_KEY → consolidation.api_key
    /// - BOARDCAST_INTERVAL_SECS → extraction.interval_secs
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("BOARDCAST_TRANSCRIPTION_API_KEY")
            && !key.is_empty()
        {
            self.transcription.api_key = key;
        }

        if let Ok(key) = std::env::var("BOARDCAST_CONSOLIDATION_API_KEY")
            && !key.is_empty()
        {
            self.consolidation.api_key = key;
        }

        if let Ok(interval) = std::env::var("BOARDCAST_INTERVAL_SECS")
            && let Ok(secs) = interval.parse::<u32>()
            && secs > 0
        {
            self.extraction.interval_secs = secs;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/boardcast/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("boardcast")
            .join("config.toml")
    }
}
