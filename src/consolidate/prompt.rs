//! Prompt and payload construction for the consolidation pass.

use crate::defaults;
use crate::pipeline::ConsolidationEntry;

/// Instructions sent ahead of the collated frame texts.
///
/// The remote model receives every surviving frame's text with positional
/// markers and timestamps, and is asked to fold them into one clean set of
/// notes: duplicates collapsed, evolving content kept in its most complete
/// form and tagged with the timestamp where it became complete, math
/// notation untouched, and all markers stripped from the output.
pub const CONSOLIDATION_INSTRUCTIONS: &str = "\
**Role:** You are an expert assistant that refines OCR output captured \
frame by frame from a whiteboard lecture. The content is often \
mathematical: formulas, definitions, worked examples.

**Context:** The input below collates text from sequential frames, each \
tagged with the exact timestamp it was captured. Content on the board is \
added incrementally, so later frames usually repeat earlier frames plus \
new material, and a formula may appear partially in one frame and \
completed in a later one. Frame markers, timestamps like \
`[Timestamp: 0:01:30]`, and `=` separator lines belong to the capture \
process, not to the lecture.

**Task:** Produce a single, clean, chronologically ordered transcription \
of the whole lecture, as if it were well-edited notes.

1. Eliminate redundancy: each piece of information appears exactly once.
2. Keep the most complete version of anything that evolves across frames; \
never replace a complete statement with a later partial one unless it is \
a clear correction.
3. Tag each distinct piece of content with the timestamp [h:mm:ss] where \
it first appeared in its most complete form, at the start of its section.
4. Arrange unique segments in chronological order of appearance.
5. Preserve all mathematical notation verbatim, keeping LaTeX-style \
syntax where present.
6. Do not include frame markers, frame numbers, or separator lines.
7. Output only the cleaned transcription with its timestamps, with no \
commentary about your process.

**Input:**
";

/// Fixed result for an empty consolidation input. Returned without a
/// network call.
pub const NO_CONTENT_RESULT: &str = "No valid text content found in frames";

/// Collate entries into the consolidation payload.
///
/// Each entry is rendered as `Frame {n} [Timestamp: {ts}]:` followed by
/// its text and a fixed-width `=` separator line, so the remote model can
/// tell entries apart unambiguously. Entry numbering is 1-based.
pub fn build_payload(entries: &[ConsolidationEntry]) -> String {
    let separator = "=".repeat(defaults::ENTRY_SEPARATOR_WIDTH);
    let mut payload = String::new();
    for (i, entry) in entries.iter().enumerate() {
        payload.push_str(&format!(
            "Frame {} [Timestamp: {}]:\n{}\n\n{}\n\n",
            i + 1,
            entry.timestamp,
            entry.text,
            separator
        ));
    }
    payload
}

/// The full prompt: instructions plus collated payload.
pub fn build_prompt(entries: &[ConsolidationEntry]) -> String {
    format!("{}{}", CONSOLIDATION_INSTRUCTIONS, build_payload(entries))
}
