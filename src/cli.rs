//! Command-line interface for boardcast
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Whiteboard lecture transcription from video
#[derive(Parser, Debug)]
#[command(name = "boardcast", version, about = "Whiteboard lecture transcription from video")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Video or image to transcribe
    #[arg(value_name = "ASSET")]
    pub asset: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress progress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Treat the asset as a single image even if its extension looks like video
    #[arg(long)]
    pub image: bool,

    /// Seconds between sampled frames (default: 30)
    #[arg(long, short = 'i', value_name = "SECONDS")]
    pub interval: Option<u32>,

    /// Worker pool size override (default: sized from CPU count)
    #[arg(long, short = 'w', value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Write the transcript to a file instead of stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check system dependencies and API key configuration
    Check,

    /// Manage configuration
    Config {
        /// Action to perform
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Write a default configuration file if none exists
    Init,
}
