//! Consensus selection over speech-recognition alternatives.
//!
//! A recognizer reports several weighted transcript alternatives for each
//! utterance segment. This crate turns them into a single best guess -
//! a spelled letter sequence in alphabet mode, a free-text pick otherwise -
//! and accumulates finalized results into a session transcript that
//! external dialogue logic can poll.
//!
//! The selection itself ([`selector::select_best`]) is pure and
//! synchronous; [`processor::ConsensusProcessor`] wraps it in an
//! event-driven task for channel-based embeddings.

use std::sync::atomic::{AtomicU64, Ordering};

pub mod processor;
pub mod replay;
pub mod selector;
pub mod session;
pub mod transcript;
pub mod types;

pub use processor::{ConsensusProcessor, ProcessorInput, SessionCommand};
pub use replay::{ReplayError, ReplaySource, ScriptedSource, SegmentSource};
pub use selector::select_best;
pub use session::{SessionState, SpellSession};
pub use transcript::{TranscriptBuffer, TranscriptHandle};
pub use types::{
    Alternative, SegmentEvent, Selection, SelectionEvent, SessionConfig, SessionMetrics,
    TranscriptConfig, DEFAULT_TAIL_CAP,
};

/// Generates unique segment IDs
static SEGMENT_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Generate a unique segment ID, for recognizer integrations that do not
/// supply their own.
pub fn next_segment_id() -> u64 {
    SEGMENT_ID_COUNTER.fetch_add(1, Ordering::SeqCst)
}
