//! Fixed phonetic dictionary mapping spoken tokens to canonical letters.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Spoken-token entries, stored lowercase. Many tokens share a letter:
/// NATO call signs, bare letters, spelled-out letter names, and the
/// homophones recognizers commonly substitute for them.
const ENTRIES: &[(&str, char)] = &[
    ("alpha", 'A'),
    ("alfa", 'A'),
    ("a", 'A'),
    ("ay", 'A'),
    ("eight", 'A'),
    ("hey", 'A'),
    ("bravo", 'B'),
    ("b", 'B'),
    ("bee", 'B'),
    ("be", 'B'),
    ("charlie", 'C'),
    ("c", 'C'),
    ("see", 'C'),
    ("sea", 'C'),
    ("delta", 'D'),
    ("d", 'D'),
    ("dee", 'D'),
    ("echo", 'E'),
    ("e", 'E'),
    ("ee", 'E'),
    ("foxtrot", 'F'),
    ("f", 'F'),
    ("ef", 'F'),
    ("golf", 'G'),
    ("g", 'G'),
    ("gee", 'G'),
    ("jee", 'G'),
    ("ghee", 'G'),
    ("hotel", 'H'),
    ("h", 'H'),
    ("aitch", 'H'),
    ("india", 'I'),
    ("i", 'I'),
    ("eye", 'I'),
    ("juliet", 'J'),
    ("j", 'J'),
    ("jay", 'J'),
    ("kilo", 'K'),
    ("k", 'K'),
    ("kay", 'K'),
    ("lima", 'L'),
    ("l", 'L'),
    ("el", 'L'),
    ("mike", 'M'),
    ("m", 'M'),
    ("em", 'M'),
    ("november", 'N'),
    ("n", 'N'),
    ("en", 'N'),
    ("oscar", 'O'),
    ("o", 'O'),
    ("oh", 'O'),
    ("zero", 'O'),
    ("papa", 'P'),
    ("p", 'P'),
    ("pee", 'P'),
    ("quebec", 'Q'),
    ("q", 'Q'),
    ("cue", 'Q'),
    ("queue", 'Q'),
    ("romeo", 'R'),
    ("r", 'R'),
    ("are", 'R'),
    ("sierra", 'S'),
    ("s", 'S'),
    ("ess", 'S'),
    ("tango", 'T'),
    ("t", 'T'),
    ("tee", 'T'),
    ("uniform", 'U'),
    ("u", 'U'),
    ("you", 'U'),
    ("victor", 'V'),
    ("v", 'V'),
    ("vee", 'V'),
    ("whiskey", 'W'),
    ("w", 'W'),
    ("doubleyou", 'W'),
    ("double you", 'W'),
    ("double-you", 'W'),
    ("x-ray", 'X'),
    ("x", 'X'),
    ("ex", 'X'),
    ("yankee", 'Y'),
    ("y", 'Y'),
    ("why", 'Y'),
    ("zulu", 'Z'),
    ("z", 'Z'),
    ("zee", 'Z'),
    ("zed", 'Z'),
];

static TOKEN_TO_LETTER: Lazy<HashMap<&'static str, char>> =
    Lazy::new(|| ENTRIES.iter().copied().collect());

/// Exact dictionary lookup. Tokens are stored lowercase; callers that
/// accept mixed-case input should fold case first (see
/// [`crate::mapper::map_token`]).
pub fn lookup(token: &str) -> Option<char> {
    TOKEN_TO_LETTER.get(token).copied()
}
