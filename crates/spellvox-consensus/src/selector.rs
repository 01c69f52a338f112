//! Scoring and consensus voting across recognizer alternatives.

use tracing::debug;

use spellvox_phonetics::{extract_letters_fallback, filter_letters, interpret_letters};

use crate::types::{Alternative, Selection};

/// Combined length/confidence score. Length dominates (a longer resolved
/// text means more of the utterance was understood); confidence only
/// separates candidates of equal length. Confidence outside the nominal
/// 0.0-1.0 range (replay input is not validated) is clamped before
/// scaling so the sum stays well inside `u64`.
fn score(len: usize, confidence: f32) -> u64 {
    let confidence = confidence.clamp(0.0, 1.0);
    len as u64 * 1000 + (confidence * 100.0).round() as u64
}

/// Candidate letter sequence for one alternative: primary interpretation,
/// then fallback extraction, stripped to letters-only either way.
fn derive_sequence(raw: &str) -> String {
    let seq = interpret_letters(raw);
    let seq = if seq.is_empty() {
        extract_letters_fallback(raw)
    } else {
        seq
    };
    filter_letters(&seq)
}

/// Alternatives that agreed on the same derived sequence, with their
/// accumulated support.
struct CandidateGroup {
    sequence: String,
    score: u64,
    count: u32,
    best_raw: String,
    best_confidence: f32,
}

/// Pick the best guess for one segment from its alternatives.
///
/// Alternatives must arrive in descending recognizer-confidence order;
/// ties favor earlier entries, which preserves the recognizer's own
/// ranking. Total: any input, including an empty list, yields a defined
/// `Selection`.
pub fn select_best(alternatives: &[Alternative], alphabet_mode: bool) -> Selection {
    if alphabet_mode {
        select_letters(alternatives)
    } else {
        select_free_text(alternatives)
    }
}

/// Free-text mode: highest individual score wins, first-seen keeps ties.
fn select_free_text(alternatives: &[Alternative]) -> Selection {
    let mut best = Selection::default();
    let mut best_score = 0u64;
    for alt in alternatives {
        let alt_score = score(alt.text.chars().count(), alt.confidence);
        if alt_score > best_score {
            best = Selection {
                text: alt.text.clone(),
                raw: alt.text.clone(),
                confidence: alt.confidence,
            };
            best_score = alt_score;
        }
    }
    best
}

/// Alphabet mode: group alternatives by derived letter sequence and let
/// cumulative score decide, so several weak alternatives agreeing on one
/// sequence can out-rank a single long low-confidence guess.
fn select_letters(alternatives: &[Alternative]) -> Selection {
    let mut groups: Vec<CandidateGroup> = Vec::new();

    for alt in alternatives {
        let sequence = derive_sequence(&alt.text);
        debug!(
            raw = %alt.text,
            sequence = %sequence,
            confidence = alt.confidence,
            "derived candidate sequence"
        );
        if sequence.is_empty() {
            continue;
        }

        let member_score = score(sequence.chars().count(), alt.confidence);
        match groups.iter_mut().find(|g| g.sequence == sequence) {
            Some(group) => {
                group.score += member_score;
                group.count += 1;
                // First writer keeps the slot on exact confidence ties.
                if alt.confidence > group.best_confidence {
                    group.best_raw = alt.text.clone();
                    group.best_confidence = alt.confidence;
                }
            }
            None => groups.push(CandidateGroup {
                sequence,
                score: member_score,
                count: 1,
                best_raw: alt.text.clone(),
                best_confidence: alt.confidence,
            }),
        }
    }

    if groups.is_empty() {
        // No alternative carried any letters. Strip the recognizer's own
        // top guess as a last resort; for an empty list this is empty too.
        return match alternatives.first() {
            Some(top) => Selection {
                text: filter_letters(&top.text),
                raw: top.text.clone(),
                confidence: top.confidence,
            },
            None => Selection::default(),
        };
    }

    let mut winner = &groups[0];
    for group in &groups[1..] {
        let beats = group.score > winner.score
            || (group.score == winner.score
                && (group.sequence.len() > winner.sequence.len()
                    || (group.sequence.len() == winner.sequence.len()
                        && group.count > winner.count)));
        if beats {
            winner = group;
        }
    }

    Selection {
        text: winner.sequence.clone(),
        raw: winner.best_raw.clone(),
        confidence: winner.best_confidence,
    }
}
