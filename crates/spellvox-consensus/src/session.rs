//! Recognition-session state machine and segment handling.

use tracing::{debug, info};

use crate::selector::select_best;
use crate::transcript::TranscriptHandle;
use crate::types::{SegmentEvent, Selection, SessionConfig};

/// Lifecycle of one recognition session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Created, never started
    #[default]
    Idle,
    /// Accepting interim and final segments
    Listening,
    /// Stopped; can be started again
    Stopped,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "IDLE"),
            SessionState::Listening => write!(f, "LISTENING"),
            SessionState::Stopped => write!(f, "STOPPED"),
        }
    }
}

/// Per-segment consensus plus transcript accumulation for one session.
///
/// Interim selections only touch the transient display buffer; final
/// selections are committed to the accumulated transcript. The transcript
/// survives stop/start cycles and is dropped only by [`Self::clear_text`].
pub struct SpellSession {
    /// Current state in the session state machine
    state: SessionState,
    /// Letter-consensus mode versus free-text mode
    alphabet_mode: bool,
    /// Accumulated finalized text, shared with external consumers
    transcript: TranscriptHandle,
    /// Display text for speech still in flight, never persisted
    interim: String,
}

impl SpellSession {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            state: SessionState::Idle,
            alphabet_mode: config.alphabet_mode,
            transcript: TranscriptHandle::new(&config.transcript),
            interim: String::new(),
        }
    }

    /// Begin (or restart) listening in the given mode. The accumulated
    /// transcript is left as-is; only the interim buffer resets.
    pub fn start(&mut self, alphabet_mode: bool) {
        if self.state == SessionState::Listening {
            debug!("start ignored: session already listening");
            return;
        }
        self.alphabet_mode = alphabet_mode;
        self.interim.clear();
        self.state = SessionState::Listening;
        info!(alphabet_mode, "session listening");
    }

    /// Stop accepting segments. Idempotent; keeps the transcript.
    pub fn stop(&mut self) {
        if self.state != SessionState::Listening {
            debug!(state = %self.state, "stop ignored");
            return;
        }
        self.interim.clear();
        self.state = SessionState::Stopped;
        info!("session stopped");
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn alphabet_mode(&self) -> bool {
        self.alphabet_mode
    }

    /// Resolve one segment. Returns `None`, leaving all state untouched,
    /// unless the session is listening. Final segments commit to the
    /// transcript and reset the interim buffer; interim segments replace
    /// the interim buffer only.
    pub fn handle_segment(&mut self, event: &SegmentEvent) -> Option<Selection> {
        if self.state != SessionState::Listening {
            debug!(
                segment_id = event.segment_id(),
                state = %self.state,
                "segment dropped: session not listening"
            );
            return None;
        }

        let selection = select_best(event.alternatives(), self.alphabet_mode);

        if event.is_final() {
            self.commit(&selection);
            self.interim.clear();
        } else {
            self.interim.clear();
            self.interim.push_str(&selection.text);
        }
        Some(selection)
    }

    fn commit(&mut self, selection: &Selection) {
        if self.alphabet_mode {
            let appended = self
                .transcript
                .with_mut(|t| t.append_letters(&selection.text));
            debug!(appended, raw = %selection.raw, "final letters committed");
        } else if !selection.text.is_empty() {
            self.transcript.with_mut(|t| t.append_text(&selection.text));
            debug!(chars = selection.text.len(), "final text committed");
        }
    }

    /// Transient display text for in-flight speech.
    pub fn interim_text(&self) -> &str {
        &self.interim
    }

    /// Finalized text so far, trimmed and tail-capped per configuration.
    pub fn final_text(&self) -> String {
        self.transcript.read()
    }

    /// Case-insensitive containment check against [`Self::final_text`].
    pub fn text_includes(&self, needle: &str) -> bool {
        self.transcript.includes(needle)
    }

    /// Drop all accumulated text. The only way the transcript empties.
    pub fn clear_text(&mut self) {
        self.transcript.clear();
    }

    /// Shared handle for consumers polling the transcript elsewhere.
    pub fn transcript(&self) -> TranscriptHandle {
        self.transcript.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Alternative;

    fn final_event(id: u64, pairs: &[(&str, f32)]) -> SegmentEvent {
        SegmentEvent::Final {
            segment_id: id,
            alternatives: pairs
                .iter()
                .map(|(t, c)| Alternative::new(*t, *c))
                .collect(),
        }
    }

    fn interim_event(id: u64, pairs: &[(&str, f32)]) -> SegmentEvent {
        SegmentEvent::Interim {
            segment_id: id,
            alternatives: pairs
                .iter()
                .map(|(t, c)| Alternative::new(*t, *c))
                .collect(),
        }
    }

    fn alphabet_session() -> SpellSession {
        let config = SessionConfig {
            alphabet_mode: true,
            ..Default::default()
        };
        SpellSession::new(&config)
    }

    #[test]
    fn segments_before_start_are_dropped() {
        let mut session = alphabet_session();
        assert_eq!(session.state(), SessionState::Idle);
        let event = final_event(1, &[("bee", 0.9)]);
        assert!(session.handle_segment(&event).is_none());
        assert_eq!(session.final_text(), "");
    }

    #[test]
    fn finals_accumulate_letters() {
        let mut session = alphabet_session();
        session.start(true);
        for (id, text) in [(1, "bee"), (2, "echo"), (3, "e")] {
            let selection = session
                .handle_segment(&final_event(id, &[(text, 0.9)]))
                .expect("listening session must resolve");
            assert_eq!(selection.text.len(), 1);
        }
        assert_eq!(session.final_text(), "BEE");
        assert!(session.text_includes("ee"));
        assert!(session.text_includes("EE"));
    }

    #[test]
    fn interims_never_persist() {
        let mut session = alphabet_session();
        session.start(true);
        session.handle_segment(&interim_event(1, &[("bee", 0.5)]));
        assert_eq!(session.interim_text(), "B");
        assert_eq!(session.final_text(), "");

        // A new interim replaces the old one outright.
        session.handle_segment(&interim_event(2, &[("tango", 0.5)]));
        assert_eq!(session.interim_text(), "T");

        session.handle_segment(&final_event(3, &[("echo", 0.9)]));
        assert_eq!(session.interim_text(), "");
        assert_eq!(session.final_text(), "E");
    }

    #[test]
    fn free_text_mode_joins_with_spaces() {
        let mut session = SpellSession::new(&SessionConfig::default());
        session.start(false);
        session.handle_segment(&final_event(1, &[("hello there", 0.9)]));
        session.handle_segment(&final_event(2, &[("general", 0.8)]));
        assert_eq!(session.final_text(), "hello there general");
    }

    #[test]
    fn stop_keeps_transcript_and_restart_resumes() {
        let mut session = alphabet_session();
        session.start(true);
        session.handle_segment(&final_event(1, &[("bee", 0.9)]));
        session.stop();
        assert_eq!(session.state(), SessionState::Stopped);

        // Segments between sessions are ignored.
        assert!(session
            .handle_segment(&final_event(2, &[("tee", 0.9)]))
            .is_none());

        session.start(true);
        session.handle_segment(&final_event(3, &[("echo", 0.9)]));
        assert_eq!(session.final_text(), "BE");
    }

    #[test]
    fn restart_can_switch_modes() {
        let mut session = alphabet_session();
        session.start(true);
        session.handle_segment(&final_event(1, &[("bravo echo echo", 0.9)]));
        session.stop();

        session.start(false);
        assert!(!session.alphabet_mode());
        session.handle_segment(&final_event(2, &[("and so on", 0.9)]));
        assert_eq!(session.final_text(), "BEE and so on");

        // A second start while listening must not flip the mode.
        session.start(true);
        assert!(!session.alphabet_mode());
    }

    #[test]
    fn clear_is_the_only_way_to_empty_the_transcript() {
        let mut session = alphabet_session();
        session.start(true);
        session.handle_segment(&final_event(1, &[("bee", 0.9)]));
        session.stop();
        session.start(true);
        assert_eq!(session.final_text(), "B");

        session.clear_text();
        assert_eq!(session.final_text(), "");
    }

    #[test]
    fn empty_alternatives_commit_nothing() {
        let mut session = alphabet_session();
        session.start(true);
        let selection = session
            .handle_segment(&final_event(1, &[]))
            .expect("listening session must resolve");
        assert_eq!(selection, Selection::default());
        assert_eq!(session.final_text(), "");
    }

    #[test]
    fn state_display_names() {
        assert_eq!(SessionState::Idle.to_string(), "IDLE");
        assert_eq!(SessionState::Listening.to_string(), "LISTENING");
        assert_eq!(SessionState::Stopped.to_string(), "STOPPED");
    }
}
