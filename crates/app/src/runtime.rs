//! Channel wiring between a segment source and the consensus processor.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use spellvox_consensus::processor::{ConsensusProcessor, ProcessorInput};
use spellvox_consensus::replay::{ReplayError, SegmentSource};
use spellvox_consensus::transcript::TranscriptHandle;
use spellvox_consensus::types::{SelectionEvent, SessionConfig, SessionMetrics};

/// Handles into a running consensus pipeline.
pub struct Pipeline {
    /// Ordered command/segment input into the processor
    pub input_tx: mpsc::Sender<ProcessorInput>,
    /// Shutdown signal for the processor
    pub shutdown_tx: mpsc::Sender<()>,
    /// Resolved selections out of the processor
    pub selection_rx: mpsc::Receiver<SelectionEvent>,
    /// Shared view of the accumulated transcript
    pub transcript: TranscriptHandle,
    /// Shared processor metrics
    pub metrics: Arc<RwLock<SessionMetrics>>,
    /// The processor task itself
    pub handle: JoinHandle<()>,
}

/// Build the channels and spawn the consensus processor.
pub fn spawn_pipeline(config: &SessionConfig) -> Pipeline {
    let (input_tx, input_rx) = mpsc::channel(100);
    let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
    let (selection_tx, selection_rx) = mpsc::channel(100);

    let processor = ConsensusProcessor::new(config, input_rx, shutdown_rx, selection_tx);
    let transcript = processor.transcript();
    let metrics = processor.metrics_handle();
    let handle = tokio::spawn(processor.run());

    Pipeline {
        input_tx,
        shutdown_tx,
        selection_rx,
        transcript,
        metrics,
        handle,
    }
}

/// Pump a segment source dry into the pipeline's input channel. Returns
/// how many segments were forwarded.
pub async fn pump_source<S: SegmentSource>(
    source: &mut S,
    input_tx: &mpsc::Sender<ProcessorInput>,
) -> Result<usize, ReplayError> {
    let mut count = 0;
    while let Some(event) = source.next_segment().await? {
        if input_tx.send(ProcessorInput::Segment(event)).await.is_err() {
            debug!("input channel closed while pumping; stopping early");
            break;
        }
        count += 1;
    }
    Ok(count)
}
