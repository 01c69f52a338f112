//! Conservative recovery heuristics for transcripts the mapper rejects.

use crate::alphabet;
use crate::mapper::{map_token, normalize};

/// Longest token still treated as an initial rather than a real word.
const MAX_INITIAL_TOKEN_LEN: usize = 3;

/// Strip everything that is not an alphabetic character and uppercase
/// the rest.
///
/// Total and idempotent: an already-A-Z string comes back unchanged, and
/// any input (including empty) yields a defined result.
pub fn filter_letters(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Last-resort letter extraction for transcripts where
/// [`crate::mapper::interpret_letters`] came up empty.
///
/// Tries, in order: the initials heuristic over short tokens (recovers
/// "g p t" without turning real words into letters), a dictionary hit on
/// the first token alone, and finally the letters-only strip of the raw
/// input.
pub fn extract_letters_fallback(text: &str) -> String {
    let clean = normalize(text);
    let tokens: Vec<&str> = clean.split_whitespace().collect();

    // Initials only when every token is short; a longer token means real
    // words, and words must not silently become letters.
    if !tokens.is_empty() && tokens.iter().all(|t| t.len() <= MAX_INITIAL_TOKEN_LEN) {
        let initials: String = tokens
            .iter()
            .filter_map(|t| {
                map_token(t).or_else(|| {
                    t.chars()
                        .next()
                        .filter(char::is_ascii_alphabetic)
                        .map(|c| c.to_ascii_uppercase())
                })
            })
            .collect();
        if !initials.is_empty() {
            return initials;
        }
    }

    if let Some(letter) = tokens.first().and_then(|t| alphabet::lookup(t)) {
        return letter.to_string();
    }

    filter_letters(text)
}
