//! Scenario tests driving the selector and session the way a recognizer
//! integration would.

use rand::seq::SliceRandom;

use spellvox_consensus::replay::{ScriptedSource, SegmentSource};
use spellvox_consensus::select_best;
use spellvox_consensus::session::SpellSession;
use spellvox_consensus::types::{Alternative, SegmentEvent, SessionConfig, TranscriptConfig};

fn alts(pairs: &[(&str, f32)]) -> Vec<Alternative> {
    pairs
        .iter()
        .map(|(text, conf)| Alternative::new(*text, *conf))
        .collect()
}

fn alphabet_config() -> SessionConfig {
    SessionConfig {
        alphabet_mode: true,
        ..Default::default()
    }
}

#[test]
fn winner_is_order_invariant_when_scores_differ() {
    // B accumulates 1090 + 1080 = 2170 against BT's 2050, so the outcome
    // must not depend on where the members sit in the list.
    let mut input = alts(&[("bee tee", 0.5), ("bee", 0.9), ("bee", 0.8)]);
    let mut rng = rand::thread_rng();

    for _ in 0..20 {
        input.shuffle(&mut rng);
        let picked = select_best(&input, true);
        assert_eq!(picked.text, "B");
        assert_eq!(picked.raw, "bee");
        assert_eq!(picked.confidence, 0.9);
    }
}

#[test]
fn free_text_winner_is_order_invariant_when_scores_differ() {
    let mut input = alts(&[("short", 0.99), ("a much longer guess", 0.2), ("mid size", 0.5)]);
    let mut rng = rand::thread_rng();

    for _ in 0..20 {
        input.shuffle(&mut rng);
        let picked = select_best(&input, false);
        assert_eq!(picked.text, "a much longer guess");
    }
}

#[tokio::test]
async fn scripted_spelling_round_accumulates_letters() {
    let mut source = ScriptedSource::new([
        ScriptedSource::interim_segment(&[("bee", 0.4)]),
        ScriptedSource::final_segment(&[("bravo", 0.9), ("bee", 0.6)]),
        ScriptedSource::interim_segment(&[("in", 0.3)]),
        ScriptedSource::final_segment(&[("india", 0.8)]),
        ScriptedSource::final_segment(&[("november", 0.7)]),
        ScriptedSource::final_segment(&[("golf", 0.9)]),
        ScriptedSource::final_segment(&[("oscar", 0.8), ("oh", 0.5)]),
    ]);

    let mut session = SpellSession::new(&alphabet_config());
    session.start(true);
    while let Some(event) = source.next_segment().await.expect("scripted source") {
        session.handle_segment(&event);
    }

    assert_eq!(session.final_text(), "BINGO");
    assert!(session.text_includes("bingo"));
    assert!(session.text_includes("ING"));
    assert!(!session.text_includes("Z"));
    assert_eq!(session.interim_text(), "");
}

#[tokio::test]
async fn scripted_free_text_round_joins_finals() {
    let mut source = ScriptedSource::new([
        ScriptedSource::interim_segment(&[("the qu", 0.2)]),
        ScriptedSource::final_segment(&[("the quick", 0.9)]),
        ScriptedSource::final_segment(&[("brown fox", 0.8), ("brown", 0.7)]),
    ]);

    let mut session = SpellSession::new(&SessionConfig::default());
    session.start(false);
    while let Some(event) = source.next_segment().await.expect("scripted source") {
        session.handle_segment(&event);
    }

    assert_eq!(session.final_text(), "the quick brown fox");
    assert!(session.text_includes("QUICK BROWN"));
}

fn one_letter_final(letter: char) -> SegmentEvent {
    let token = letter.to_ascii_lowercase().to_string();
    ScriptedSource::final_segment(&[(token.as_str(), 0.9)])
}

#[test]
fn capped_read_keeps_the_most_recent_200_letters() {
    let mut session = SpellSession::new(&alphabet_config());
    session.start(true);

    let mut full = String::new();
    for i in 0..205u32 {
        let letter = (b'A' + (i % 26) as u8) as char;
        full.push(letter);
        session.handle_segment(&one_letter_final(letter));
    }

    let view = session.final_text();
    assert_eq!(view.chars().count(), 200);
    let expected: String = full.chars().skip(5).collect();
    assert_eq!(view, expected);
}

#[test]
fn uncapped_read_keeps_everything() {
    let config = SessionConfig {
        alphabet_mode: true,
        transcript: TranscriptConfig { tail_cap: None },
    };
    let mut session = SpellSession::new(&config);
    session.start(true);

    for i in 0..205u32 {
        let letter = (b'A' + (i % 26) as u8) as char;
        session.handle_segment(&one_letter_final(letter));
    }

    assert_eq!(session.final_text().chars().count(), 205);
}
