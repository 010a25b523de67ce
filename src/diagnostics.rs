//! System diagnostics and dependency checking.
//!
//! Verifies that the media tools are installed and the API keys are
//! configured before any processing starts.

use crate::config::Config;
use std::process::Command;

/// Result of a dependency check.
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Tool is installed and working
    Ok,
    /// Tool is not found
    NotFound,
    /// Tool is found but has issues
    Warning(String),
}

/// Check if a command exists and responds to `-version`.
fn check_command(command: &str) -> CheckResult {
    match Command::new(command).arg("-version").output() {
        Ok(output) if output.status.success() => CheckResult::Ok,
        Ok(_) => CheckResult::Warning(format!("'{}' found but -version failed", command)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CheckResult::NotFound,
        Err(e) => CheckResult::Warning(format!("Error checking '{}': {}", command, e)),
    }
}

/// Validate that both API keys are configured.
///
/// Returns `(true, "")` when both keys are present, otherwise `false` and
/// a message naming each missing key.
pub fn check_api_keys(config: &Config) -> (bool, String) {
    let mut problems = Vec::new();
    if config.transcription.api_key.trim().is_empty() {
        problems.push(
            "Transcription API key not set (transcription.api_key in config, \
             or BOARDCAST_TRANSCRIPTION_API_KEY)",
        );
    }
    if config.consolidation.api_key.trim().is_empty() {
        problems.push(
            "Consolidation API key not set (consolidation.api_key in config, \
             or BOARDCAST_CONSOLIDATION_API_KEY)",
        );
    }
    if problems.is_empty() {
        (true, String::new())
    } else {
        (false, problems.join("\n"))
    }
}

/// Run all checks and print a report to stderr.
///
/// Returns true if every required dependency and key is in place.
pub fn run_checks(config: &Config) -> bool {
    let mut all_ok = true;

    for tool in ["ffmpeg", "ffprobe"] {
        match check_command(tool) {
            CheckResult::Ok => eprintln!("  [ok]      {}", tool),
            CheckResult::NotFound => {
                eprintln!("  [missing] {}: install it and ensure it is on PATH", tool);
                all_ok = false;
            }
            CheckResult::Warning(message) => {
                eprintln!("  [warn]    {}: {}", tool, message);
                all_ok = false;
            }
        }
    }

    let (keys_ok, message) = check_api_keys(config);
    if keys_ok {
        eprintln!("  [ok]      API keys configured");
    } else {
        for line in message.lines() {
            eprintln!("  [missing] {}", line);
        }
        all_ok = false;
    }

    all_ok
}
