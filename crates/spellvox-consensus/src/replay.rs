//! Deterministic segment sources: JSON-lines replay and scripted events.
//!
//! The recognizer integration itself is external to this crate; these
//! sources stand in for it during development and tests, feeding the
//! processor the same `SegmentEvent` stream a live integration would.

use std::collections::VecDeque;
use std::io;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::trace;

use crate::next_segment_id;
use crate::types::{Alternative, SegmentEvent};

/// Replay input errors
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("replay read failed: {0}")]
    Io(#[from] io::Error),

    #[error("bad replay record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// One JSON-lines replay record:
/// `{"alternatives":[{"text":"bee","confidence":0.9}],"is_final":true}`
#[derive(Debug, Deserialize)]
struct ReplayRecord {
    alternatives: Vec<Alternative>,
    #[serde(default)]
    is_final: bool,
}

/// Anything that can deliver recognizer segments in order.
#[async_trait]
pub trait SegmentSource {
    /// Next segment, or `None` at end of input.
    async fn next_segment(&mut self) -> Result<Option<SegmentEvent>, ReplayError>;
}

/// Reads segments from JSON-lines text: a file, stdin, anything
/// `AsyncBufRead`. Each line is either a bare [`ReplayRecord`], which is
/// assigned the next arrival-order segment id, or a tagged
/// [`SegmentEvent`] (`{"type":"final","segment_id":..,"alternatives":
/// [..]}`), which keeps the id it carries. Blank lines are skipped.
pub struct ReplaySource<R> {
    lines: Lines<R>,
    line_no: usize,
}

impl<R: AsyncBufRead + Unpin> ReplaySource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> SegmentSource for ReplaySource<R> {
    async fn next_segment(&mut self) -> Result<Option<SegmentEvent>, ReplayError> {
        while let Some(line) = self.lines.next_line().await? {
            self.line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let event = parse_line(trimmed, self.line_no)?;
            trace!(
                line = self.line_no,
                segment_id = event.segment_id(),
                is_final = event.is_final(),
                alternatives = event.alternatives().len(),
                "replay record"
            );
            return Ok(Some(event));
        }
        Ok(None)
    }
}

/// A line with a `type` field must parse as a tagged [`SegmentEvent`];
/// only lines without one are bare records. A malformed tagged line is a
/// parse error, never a record with defaulted fields (that would quietly
/// turn a final into an interim).
fn parse_line(trimmed: &str, line: usize) -> Result<SegmentEvent, ReplayError> {
    let parse = |source| ReplayError::Parse { line, source };
    let value: serde_json::Value = serde_json::from_str(trimmed).map_err(parse)?;

    if value.get("type").is_some() {
        return serde_json::from_value(value).map_err(parse);
    }

    let record: ReplayRecord = serde_json::from_value(value).map_err(parse)?;
    let segment_id = next_segment_id();
    Ok(if record.is_final {
        SegmentEvent::Final {
            segment_id,
            alternatives: record.alternatives,
        }
    } else {
        SegmentEvent::Interim {
            segment_id,
            alternatives: record.alternatives,
        }
    })
}

/// In-memory source for tests and demos.
pub struct ScriptedSource {
    events: VecDeque<SegmentEvent>,
}

impl ScriptedSource {
    pub fn new(events: impl IntoIterator<Item = SegmentEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// A final segment built from `(text, confidence)` pairs.
    pub fn final_segment(alternatives: &[(&str, f32)]) -> SegmentEvent {
        SegmentEvent::Final {
            segment_id: next_segment_id(),
            alternatives: Self::alts(alternatives),
        }
    }

    /// An interim segment built from `(text, confidence)` pairs.
    pub fn interim_segment(alternatives: &[(&str, f32)]) -> SegmentEvent {
        SegmentEvent::Interim {
            segment_id: next_segment_id(),
            alternatives: Self::alts(alternatives),
        }
    }

    fn alts(pairs: &[(&str, f32)]) -> Vec<Alternative> {
        pairs
            .iter()
            .map(|(text, conf)| Alternative::new(*text, *conf))
            .collect()
    }
}

#[async_trait]
impl SegmentSource for ScriptedSource {
    async fn next_segment(&mut self) -> Result<Option<SegmentEvent>, ReplayError> {
        Ok(self.events.pop_front())
    }
}
