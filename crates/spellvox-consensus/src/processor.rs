//! Event-driven consensus processor
//!
//! This module bridges a recognizer integration to consuming dialogue
//! logic: session commands and segment events arrive interleaved on one
//! ordered input channel, and resolved selections leave on another. All
//! consensus work happens on this single task, so no segment handling
//! ever overlaps and commands take effect exactly where they were issued
//! in the stream.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::session::SpellSession;
use crate::transcript::TranscriptHandle;
use crate::types::{SegmentEvent, SelectionEvent, SessionConfig, SessionMetrics};

/// Session lifecycle commands from the embedding application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Begin (or restart) a recognition session in the given mode
    Start { alphabet_mode: bool },
    /// Stop accepting segments; the transcript is kept
    Stop,
    /// Drop all accumulated transcript text
    Clear,
}

/// One item of the processor's ordered input stream.
#[derive(Debug, Clone)]
pub enum ProcessorInput {
    /// Session lifecycle command
    Command(SessionCommand),
    /// Recognizer segment to resolve
    Segment(SegmentEvent),
}

/// How long to wait on a slow selection consumer before giving up.
const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Consensus processor driving one [`SpellSession`] from channel events.
pub struct ConsensusProcessor {
    /// Ordered command/segment input
    input_rx: mpsc::Receiver<ProcessorInput>,
    /// Receiver for the shutdown signal
    shutdown_rx: mpsc::Receiver<()>,
    /// Selection event sender
    selection_tx: mpsc::Sender<SelectionEvent>,
    /// The session being driven
    session: SpellSession,
    /// Shared metrics
    metrics: Arc<parking_lot::RwLock<SessionMetrics>>,
}

impl ConsensusProcessor {
    /// Create a new consensus processor
    pub fn new(
        config: &SessionConfig,
        input_rx: mpsc::Receiver<ProcessorInput>,
        shutdown_rx: mpsc::Receiver<()>,
        selection_tx: mpsc::Sender<SelectionEvent>,
    ) -> Self {
        Self {
            input_rx,
            shutdown_rx,
            selection_tx,
            session: SpellSession::new(config),
            metrics: Arc::new(parking_lot::RwLock::new(SessionMetrics::default())),
        }
    }

    /// Get current metrics
    pub fn metrics(&self) -> SessionMetrics {
        self.metrics.read().clone()
    }

    /// Shared metrics handle, for observers that outlive `run`.
    pub fn metrics_handle(&self) -> Arc<parking_lot::RwLock<SessionMetrics>> {
        self.metrics.clone()
    }

    /// Shared transcript handle, for consumers that poll accumulated text.
    pub fn transcript(&self) -> TranscriptHandle {
        self.session.transcript()
    }

    /// Run the consensus processor loop until shutdown is signalled.
    ///
    /// Input buffered before the shutdown signal is drained first, so a
    /// producer can close its end and signal shutdown without losing
    /// segments.
    pub async fn run(mut self) {
        info!(
            target: "consensus",
            "consensus processor starting (alphabet_mode: {})",
            self.session.alphabet_mode()
        );

        loop {
            tokio::select! {
                biased;

                Some(input) = self.input_rx.recv() => {
                    match input {
                        ProcessorInput::Command(command) => self.handle_command(command),
                        ProcessorInput::Segment(event) => self.handle_segment(event).await,
                    }
                }

                _ = self.shutdown_rx.recv() => {
                    info!(target: "consensus", "shutdown signal received, exiting consensus processor");
                    break;
                }
            }
        }

        let metrics = self.metrics.read();
        info!(
            target: "consensus",
            "consensus processor final stats - segments in: {}, interim: {}, final: {}, empty: {}, letters: {}, ignored: {}",
            metrics.segments_in,
            metrics.interim_count,
            metrics.final_count,
            metrics.empty_selections,
            metrics.letters_appended,
            metrics.segments_ignored
        );
    }

    fn handle_command(&mut self, command: SessionCommand) {
        debug!(target: "consensus", ?command, "session command received");
        match command {
            SessionCommand::Start { alphabet_mode } => self.session.start(alphabet_mode),
            SessionCommand::Stop => self.session.stop(),
            SessionCommand::Clear => self.session.clear_text(),
        }
    }

    async fn handle_segment(&mut self, event: SegmentEvent) {
        {
            let mut metrics = self.metrics.write();
            metrics.segments_in += 1;
            metrics.last_event_time = Some(Instant::now());
        }

        let selection = match self.session.handle_segment(&event) {
            Some(selection) => selection,
            None => {
                self.metrics.write().segments_ignored += 1;
                return;
            }
        };

        {
            let mut metrics = self.metrics.write();
            if selection.text.is_empty() {
                metrics.empty_selections += 1;
            }
            if event.is_final() {
                metrics.final_count += 1;
                if self.session.alphabet_mode() {
                    metrics.letters_appended += selection
                        .text
                        .chars()
                        .filter(|c| c.is_ascii_uppercase())
                        .count() as u64;
                }
            } else {
                metrics.interim_count += 1;
            }
        }

        let out = if event.is_final() {
            info!(
                target: "consensus",
                segment_id = event.segment_id(),
                text = %selection.text,
                raw = %selection.raw,
                "final selection"
            );
            SelectionEvent::Final {
                segment_id: event.segment_id(),
                selection,
            }
        } else {
            debug!(
                target: "consensus",
                segment_id = event.segment_id(),
                text = %selection.text,
                "interim selection"
            );
            SelectionEvent::Interim {
                segment_id: event.segment_id(),
                selection,
            }
        };

        // Send with backpressure, but never block the loop indefinitely.
        match tokio::time::timeout(SEND_TIMEOUT, self.selection_tx.send(out)).await {
            Ok(Ok(())) => {}
            Ok(Err(_)) => {
                debug!(target: "consensus", "selection channel closed");
            }
            Err(_) => {
                warn!(
                    target: "consensus",
                    "selection send timed out after {:?} - consumer too slow", SEND_TIMEOUT
                );
            }
        }
    }
}
