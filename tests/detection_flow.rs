//! End-to-end detection scenarios: noisy transcripts, context continuation,
//! combined digits, and navigation boundaries against a fixture dataset.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::collections::HashMap;

use verseflow::context::ParseContext;
use verseflow::dataset::{DatasetLoader, VerseDataset};
use verseflow::engine::{DetectOptions, ScriptureEngine};
use verseflow::normalize::{normalize, NormalizeMode};

fn fixture_engine() -> ScriptureEngine {
    let verses = [
        ("Genesis 1:1", "# In the beginning God created the heaven and the earth."),
        ("Genesis 1:2", "And the earth was without form, and void;"),
        ("Luke 3:3", "And he came into all the country about Jordan,"),
        ("John 2:24", "But Jesus did not commit himself unto them,"),
        ("John 2:25", "And needed not that any should testify of man:"),
        ("John 3:1", "There was a man of the Pharisees, named Nicodemus,"),
        ("John 3:16", "# For God so loved the world, that he gave his only begotten Son,"),
        ("John 3:17", "For God sent not his Son into the world to condemn the world;"),
        ("Romans 3:3", "For what if some did not believe?"),
        ("Romans 3:5", "But if our unrighteousness commend the righteousness of God,"),
        ("Revelation 22:21", "The grace of our Lord Jesus Christ [be] with you all. Amen."),
    ];
    let map: HashMap<String, String> = verses
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    ScriptureEngine::with_basic_grammar(DatasetLoader::preloaded(VerseDataset::from_map(map)))
}

fn speech() -> DetectOptions {
    DetectOptions { aggressive_speech_normalization: true }
}

#[tokio::test]
async fn typed_reference_round_trips() {
    let engine = fixture_engine();
    let mut ctx = ParseContext::new();
    let refs = engine.parse_reference(&mut ctx, "John 3:16").await.unwrap();
    assert_eq!(refs.len(), 1);
    assert_eq!(refs[0].book, "John");
    assert_eq!(refs[0].chapter, 3);
    assert_eq!(refs[0].start_verse, 16);
    assert_eq!(refs[0].end_verse, 16);
    assert_eq!(refs[0].display_ref, "John 3:16");
}

#[tokio::test]
async fn detected_text_is_clean() {
    let engine = fixture_engine();
    let mut ctx = ParseContext::new();
    let found = engine
        .detect_and_lookup(&mut ctx, "John 3:16", DetectOptions::default())
        .await;
    assert_eq!(found.len(), 1);
    assert!(!found[0].verse_text.is_empty());
    assert!(!found[0].verse_text.starts_with('#'));
    assert!(!found[0].verse_text.contains('['));
}

#[tokio::test]
async fn context_continuation_and_reset() {
    let engine = fixture_engine();
    let mut ctx = ParseContext::new();

    engine.parse_reference(&mut ctx, "John 3:16").await.unwrap();
    let refs = engine.parse_reference(&mut ctx, "verse 17").await.unwrap();
    assert_eq!(refs[0].display_ref, "John 3:17");

    ctx.reset();
    assert!(engine.parse_reference(&mut ctx, "verse 7").await.is_none());
}

#[tokio::test]
async fn stuttered_transcript_resolves() {
    let engine = fixture_engine();
    let mut ctx = ParseContext::new();
    let found = engine
        .detect_and_lookup(&mut ctx, "Luke. Three. Three.", speech())
        .await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].display_ref, "Luke 3:3");
}

#[tokio::test]
async fn spoken_comma_pair_is_one_reference() {
    let engine = fixture_engine();
    let mut ctx = ParseContext::new();
    let found = engine
        .detect_and_lookup(&mut ctx, "Romans three, five", speech())
        .await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].display_ref, "Romans 3:5");
}

#[tokio::test]
async fn combined_digits_resolve_when_unique() {
    let engine = fixture_engine();
    let mut ctx = ParseContext::new();
    let found = engine.detect_and_lookup(&mut ctx, "John316", speech()).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].display_ref, "John 3:16");
}

#[tokio::test]
async fn ambiguous_combined_digits_stay_unresolved() {
    // Fixture where both splits of "316" exist: 3:16 and 31:6
    let verses = [("Psalms 3:16", "a"), ("Psalms 31:6", "b")];
    let map: HashMap<String, String> = verses
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    let engine =
        ScriptureEngine::with_basic_grammar(DatasetLoader::preloaded(VerseDataset::from_map(map)));

    let mut ctx = ParseContext::new();
    let found = engine.detect_and_lookup(&mut ctx, "Psalms316", speech()).await;
    assert!(found.is_empty(), "ambiguous fused digits must not guess");
}

#[tokio::test]
async fn verse_zero_is_not_served_as_verse_one() {
    let engine = fixture_engine();
    let mut ctx = ParseContext::new();
    let found = engine
        .detect_and_lookup(&mut ctx, "John 3:0", DetectOptions::default())
        .await;
    assert!(found.is_empty(), "verse 0 must not resolve to verse 1");
}

#[tokio::test]
async fn multi_reference_first_wins_for_context() {
    let engine = fixture_engine();
    let mut ctx = ParseContext::new();
    let found = engine
        .detect_and_lookup(&mut ctx, "Romans 3:3, 5", DetectOptions::default())
        .await;
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].display_ref, "Romans 3:3");
    assert_eq!(found[1].display_ref, "Romans 3:5");
    assert_eq!(ctx.verse, Some(3));
}

#[tokio::test]
async fn navigation_boundaries() {
    let engine = fixture_engine();

    let nav = engine.verse_navigation("John", 3, 1).await;
    assert!(nav.has_previous);
    assert_eq!(nav.previous.unwrap().display_ref, "John 2:25");

    let first = engine.verse_navigation("Genesis", 1, 1).await;
    assert!(!first.has_previous);
    assert!(first.next.is_some());

    let last = engine.verse_navigation("Revelation", 22, 21).await;
    assert!(!last.has_next);
}

#[test]
fn normalizer_is_idempotent_on_noisy_input() {
    for input in [
        "Luke. Three. Three.",
        "Romans, three, five",
        "John chapter 3 verse 16",
        "John 3:16, 17",
    ] {
        let once = normalize(input, NormalizeMode::Speech);
        assert_eq!(normalize(&once, NormalizeMode::Speech), once);
    }
}
