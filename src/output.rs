//! Transcript rendering at the caller boundary.

use crate::error::Result;
use crate::pipeline::TranscriptReport;
use std::io::Write;
use std::path::Path;

/// Write the transcript to stdout or to `output` when given.
pub fn write_transcript(transcript: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, transcript)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", transcript)?;
        }
    }
    Ok(())
}

/// Report batch statistics to stderr.
pub fn report_counts(report: &TranscriptReport) {
    eprintln!(
        "Transcribed {}/{} frames",
        report.frames_succeeded, report.frames_total
    );
    if report.frames_succeeded < report.frames_total {
        eprintln!(
            "{} frame(s) were dropped (failed or empty); the transcript covers the rest",
            report.frames_total - report.frames_succeeded
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_transcript_to_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("transcript.txt");

        write_transcript("[0:00:00] 2+2=4", Some(&path)).expect("write transcript");

        let contents = std::fs::read_to_string(&path).expect("read transcript");
        assert_eq!(contents, "[0:00:00] 2+2=4");
    }
}
