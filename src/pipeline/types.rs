//! Data types for the frame-transcription pipeline.

/// How a single frame's transcription attempt settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// The call returned text.
    Success(String),
    /// The call succeeded but yielded nothing usable.
    Empty,
    /// The call failed; the reason is kept for diagnostics.
    Failed(String),
}

/// The per-frame result record.
///
/// Written exactly once per index as its task settles; never mutated
/// afterwards.
#[derive(Debug, Clone)]
pub struct FrameOutcome {
    /// Index of the frame this outcome belongs to.
    pub index: usize,
    /// How the attempt settled.
    pub status: OutcomeStatus,
    /// The frame's video offset, carried through for consolidation.
    pub timestamp: String,
}

impl FrameOutcome {
    /// Whether this outcome contributes text to consolidation.
    pub fn is_usable(&self) -> bool {
        matches!(&self.status, OutcomeStatus::Success(text) if !text.trim().is_empty())
    }
}

/// One entry of the consolidation input: surviving text plus the timestamp
/// of the frame it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidationEntry {
    pub text: String,
    pub timestamp: String,
}

/// Everything the dispatcher hands back for one batch.
#[derive(Debug)]
pub struct BatchResult {
    /// All outcomes, ascending index order, one per input frame.
    pub outcomes: Vec<FrameOutcome>,
    /// Usable texts in ascending index order.
    pub entries: Vec<ConsolidationEntry>,
    /// Frames that produced usable text.
    pub frames_succeeded: usize,
    /// Frames attempted.
    pub frames_total: usize,
}

/// The caller-facing result of a full video run.
#[derive(Debug, Clone)]
pub struct TranscriptReport {
    pub transcript: String,
    pub frames_succeeded: usize,
    pub frames_total: usize,
}
