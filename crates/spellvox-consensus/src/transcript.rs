//! Accumulated transcript state for finalized segments.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

use crate::types::TranscriptConfig;

/// Finalized text accumulated over recognition sessions.
///
/// Appended to by final segments, cleared only on an explicit request;
/// stop/start cycles leave it alone. The configured tail cap applies to
/// reads, never to the stored text.
#[derive(Debug)]
pub struct TranscriptBuffer {
    text: String,
    tail_cap: Option<usize>,
}

impl TranscriptBuffer {
    pub fn new(config: &TranscriptConfig) -> Self {
        Self {
            text: String::new(),
            tail_cap: config.tail_cap,
        }
    }

    /// Append only the A-Z characters of a resolved text, in order.
    /// Returns how many letters were kept.
    pub fn append_letters(&mut self, resolved: &str) -> usize {
        let mut appended = 0;
        for ch in resolved.chars() {
            if ch.is_ascii_uppercase() {
                self.text.push(ch);
                appended += 1;
            }
        }
        appended
    }

    /// Append a free-text resolution, space-separated from what came
    /// before. The piece is trimmed at the boundary so ragged recognizer
    /// output cannot leave doubled spaces; whitespace-only resolutions
    /// are ignored.
    pub fn append_text(&mut self, resolved: &str) {
        let resolved = resolved.trim();
        if resolved.is_empty() {
            return;
        }
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(resolved);
    }

    /// Trimmed view of the accumulated text, tail-capped when configured.
    /// Reading never mutates the stored state.
    pub fn read(&self) -> String {
        let trimmed = self.text.trim();
        match self.tail_cap {
            Some(cap) => {
                let total = trimmed.chars().count();
                if total > cap {
                    trimmed.chars().skip(total - cap).collect()
                } else {
                    trimmed.to_string()
                }
            }
            None => trimmed.to_string(),
        }
    }

    /// Case-insensitive containment check against the capped view.
    pub fn includes(&self, needle: &str) -> bool {
        self.read().to_lowercase().contains(&needle.to_lowercase())
    }

    pub fn clear(&mut self) {
        debug!(dropped = self.text.len(), "transcript cleared");
        self.text.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Characters currently stored, before trimming or capping.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Cloneable shared handle onto one transcript buffer, for consumers that
/// poll while the owning session writes.
#[derive(Debug, Clone)]
pub struct TranscriptHandle {
    inner: Arc<RwLock<TranscriptBuffer>>,
}

impl TranscriptHandle {
    pub fn new(config: &TranscriptConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(TranscriptBuffer::new(config))),
        }
    }

    pub fn read(&self) -> String {
        self.inner.read().read()
    }

    pub fn includes(&self, needle: &str) -> bool {
        self.inner.read().includes(needle)
    }

    pub fn clear(&self) {
        self.inner.write().clear()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub(crate) fn with_mut<R>(&self, f: impl FnOnce(&mut TranscriptBuffer) -> R) -> R {
        f(&mut self.inner.write())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capped(cap: usize) -> TranscriptBuffer {
        TranscriptBuffer::new(&TranscriptConfig { tail_cap: Some(cap) })
    }

    fn uncapped() -> TranscriptBuffer {
        TranscriptBuffer::new(&TranscriptConfig { tail_cap: None })
    }

    #[test]
    fn letters_append_in_order() {
        let mut buf = uncapped();
        assert_eq!(buf.append_letters("B"), 1);
        assert_eq!(buf.append_letters("E"), 1);
        assert_eq!(buf.append_letters("E"), 1);
        assert_eq!(buf.read(), "BEE");
    }

    #[test]
    fn letters_append_filters_residue() {
        let mut buf = uncapped();
        assert_eq!(buf.append_letters("A-b C1"), 2);
        assert_eq!(buf.read(), "AC");
    }

    #[test]
    fn text_append_separates_with_spaces() {
        let mut buf = uncapped();
        buf.append_text("hello");
        buf.append_text("world");
        buf.append_text("");
        assert_eq!(buf.read(), "hello world");
    }

    #[test]
    fn text_append_trims_ragged_pieces() {
        let mut buf = uncapped();
        buf.append_text("hello ");
        buf.append_text("  world");
        buf.append_text("   ");
        assert_eq!(buf.read(), "hello world");
    }

    #[test]
    fn read_caps_to_trailing_characters() {
        let mut buf = capped(200);
        buf.append_letters("FGHIJ");
        buf.append_letters(&"ABCDE".repeat(40));
        assert_eq!(buf.len(), 205);
        let view = buf.read();
        assert_eq!(view.chars().count(), 200);
        assert_eq!(view, "ABCDE".repeat(40));
        assert!(!view.contains('F'));
        // The stored text is untouched by capped reads.
        assert_eq!(buf.len(), 205);
    }

    #[test]
    fn read_without_cap_keeps_everything() {
        let mut buf = uncapped();
        buf.append_letters(&"ABCDE".repeat(41));
        assert_eq!(buf.read().chars().count(), 205);
    }

    #[test]
    fn includes_is_case_insensitive() {
        let mut buf = capped(200);
        buf.append_letters("BEE");
        assert!(buf.includes("ee"));
        assert!(buf.includes("BEE"));
        assert!(!buf.includes("tea"));
    }

    #[test]
    fn includes_only_sees_the_capped_view() {
        let mut buf = capped(3);
        buf.append_letters("XYZABC");
        assert!(buf.includes("abc"));
        assert!(!buf.includes("xyz"));
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut buf = capped(200);
        buf.append_letters("BEE");
        buf.clear();
        assert_eq!(buf.read(), "");
        assert!(buf.is_empty());
    }

    #[test]
    fn handle_shares_one_buffer() {
        let handle = TranscriptHandle::new(&TranscriptConfig::default());
        let other = handle.clone();
        handle.with_mut(|t| t.append_letters("ABC"));
        assert_eq!(other.read(), "ABC");
        other.clear();
        assert!(handle.is_empty());
    }
}
