//! Core types for consensus selection over recognizer alternatives

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Default trailing-character cap applied when reading the transcript.
pub const DEFAULT_TAIL_CAP: usize = 200;

/// One recognizer-provided guess for an utterance segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    /// Raw transcript text, exactly as the recognizer produced it
    pub text: String,
    /// Recognizer confidence, nominally 0.0-1.0. Backends that do not
    /// report one leave it at zero.
    #[serde(default)]
    pub confidence: f32,
}

impl Alternative {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// One recognized utterance segment with its ordered alternatives.
///
/// Alternatives are expected in descending recognizer-confidence order
/// (best guess first); selection tie-breaks lean on that ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SegmentEvent {
    /// Provisional result for speech still in flight
    Interim {
        segment_id: u64,
        alternatives: Vec<Alternative>,
    },
    /// Committed result for a completed speech segment
    Final {
        segment_id: u64,
        alternatives: Vec<Alternative>,
    },
}

impl SegmentEvent {
    pub fn segment_id(&self) -> u64 {
        match self {
            Self::Interim { segment_id, .. } | Self::Final { segment_id, .. } => *segment_id,
        }
    }

    pub fn alternatives(&self) -> &[Alternative] {
        match self {
            Self::Interim { alternatives, .. } | Self::Final { alternatives, .. } => alternatives,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Final { .. })
    }
}

/// The chosen output for one segment.
///
/// `text` is never absent: it is the empty string when no usable signal
/// existed in any alternative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    /// Resolved text: letters in alphabet mode, free text otherwise
    pub text: String,
    /// Raw transcript of the representative alternative
    pub raw: String,
    /// Confidence of the representative alternative
    pub confidence: f32,
}

/// Selection emitted per handled segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// Resolved from an interim segment; display-only
    Interim { segment_id: u64, selection: Selection },
    /// Resolved from a final segment; committed to the transcript
    Final { segment_id: u64, selection: Selection },
}

impl SelectionEvent {
    pub fn selection(&self) -> &Selection {
        match self {
            Self::Interim { selection, .. } | Self::Final { selection, .. } => selection,
        }
    }

    pub fn is_final(&self) -> bool {
        matches!(self, Self::Final { .. })
    }
}

/// Consensus processor metrics
#[derive(Debug, Clone, Default)]
pub struct SessionMetrics {
    /// Total segments received
    pub segments_in: u64,
    /// Number of interim selections emitted
    pub interim_count: u64,
    /// Number of final selections emitted
    pub final_count: u64,
    /// Selections that resolved to an empty string
    pub empty_selections: u64,
    /// Letters committed to the transcript in alphabet mode
    pub letters_appended: u64,
    /// Segments dropped because no session was listening
    pub segments_ignored: u64,
    /// Time of the last handled segment
    pub last_event_time: Option<Instant>,
}

/// Transcript accumulation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// When set, reads return only this many trailing characters. The
    /// stored text itself is never truncated.
    #[serde(default = "default_tail_cap")]
    pub tail_cap: Option<usize>,
}

fn default_tail_cap() -> Option<usize> {
    Some(DEFAULT_TAIL_CAP)
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            tail_cap: Some(DEFAULT_TAIL_CAP),
        }
    }
}

/// Per-session configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Resolve spelled letters instead of free text
    #[serde(default)]
    pub alphabet_mode: bool,
    /// Transcript accumulation settings
    #[serde(default)]
    pub transcript: TranscriptConfig,
}
