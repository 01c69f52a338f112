//! Token-to-letter interpretation over whitespace-delimited transcripts.

use crate::alphabet;

/// Normalize a transcript for token mapping: lowercase, with every
/// character that is not `a-z`, whitespace, or `-` replaced by a space.
/// Hyphens survive so dictionary tokens like "x-ray" stay intact.
pub(crate) fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_whitespace() || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Map a single spoken token to its canonical letter.
///
/// Exact dictionary lookup first (covers full words like "alpha", "zero",
/// "double you"), then a token that is exactly one alphabetic character
/// maps to its uppercase form. Anything else is `None` - the mapper never
/// guesses from word shape, that is fallback policy.
pub fn map_token(token: &str) -> Option<char> {
    let token = token.to_lowercase();
    if let Some(letter) = alphabet::lookup(&token) {
        return Some(letter);
    }
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}

/// Interpret a transcript as a sequence of individually spoken letters.
///
/// Tokens with no mapping are silently dropped, so ordinary words never
/// become spurious letters here. Empty result when nothing maps.
pub fn interpret_letters(text: &str) -> String {
    normalize(text)
        .split_whitespace()
        .filter_map(map_token)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_token_is_case_insensitive() {
        assert_eq!(map_token("ALPHA"), Some('A'));
        assert_eq!(map_token("alpha"), Some('A'));
        assert_eq!(map_token("Alpha"), Some('A'));
    }

    #[test]
    fn map_token_handles_bare_letters() {
        assert_eq!(map_token("q"), Some('Q'));
        assert_eq!(map_token("X"), Some('X'));
    }

    #[test]
    fn map_token_covers_multi_word_entries() {
        assert_eq!(map_token("double you"), Some('W'));
        assert_eq!(map_token("Double You"), Some('W'));
    }

    #[test]
    fn map_token_rejects_unknown_words() {
        assert_eq!(map_token("hello"), None);
        assert_eq!(map_token("ab"), None);
        assert_eq!(map_token(""), None);
        assert_eq!(map_token("1"), None);
    }

    #[test]
    fn interpret_spelled_words() {
        assert_eq!(interpret_letters("bravo echo echo"), "BEE");
    }

    #[test]
    fn interpret_bare_letters() {
        assert_eq!(interpret_letters("b e e"), "BEE");
    }

    #[test]
    fn interpret_mixed_forms() {
        assert_eq!(interpret_letters("Bee, tee!"), "BT");
        assert_eq!(interpret_letters("x-ray zulu"), "XZ");
        assert_eq!(interpret_letters("zero oh"), "OO");
    }

    #[test]
    fn interpret_drops_ordinary_words() {
        assert_eq!(interpret_letters("hello"), "");
        assert_eq!(interpret_letters("hello world"), "");
    }

    #[test]
    fn interpret_keeps_mapped_tokens_among_noise() {
        // "don't" normalizes to "don t"; only the trailing t maps.
        assert_eq!(interpret_letters("don't"), "T");
    }

    #[test]
    fn interpret_empty_input() {
        assert_eq!(interpret_letters(""), "");
        assert_eq!(interpret_letters("   "), "");
        assert_eq!(interpret_letters("123 !?"), "");
    }
}
