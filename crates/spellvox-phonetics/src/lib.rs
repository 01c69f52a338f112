//! Phonetic token-to-letter mapping for SpellVox.
//!
//! This crate turns word-like spoken tokens into canonical uppercase
//! letters using a fixed dictionary (NATO alphabet plus the homophones
//! speech recognizers substitute for spelled letters), with conservative
//! fallback heuristics for transcripts the primary mapping rejects.
//!
//! Every function here is pure, synchronous, and total: any input string
//! produces a defined (possibly empty) result with no errors to handle.

pub mod alphabet;
pub mod fallback;
pub mod mapper;

pub use fallback::{extract_letters_fallback, filter_letters};
pub use mapper::{interpret_letters, map_token};
