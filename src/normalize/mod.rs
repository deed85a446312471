//! Transcript and query normalization.
//!
//! Rewrites raw text into the shape the reference grammar expects. Speech
//! engines insert a period after every short utterance ("Luke. Three.
//! Three.") and spell numbers out; typed queries mostly pass through. Each
//! pass assumes the previous pass's output shape, so the order here is fixed.

pub mod numbers;

use std::sync::LazyLock;
use regex::Regex;

use crate::books::BOOK_PATTERN;

/// How aggressively to rewrite the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizeMode {
    /// Typed search text: punctuation cleanup and number words only.
    #[default]
    Typed,
    /// Speech transcript: additionally expand "Book X verse Y" phrasing.
    Speech,
}

/// Transcript sentence breaks: a period followed by whitespace.
#[allow(clippy::expect_used)]
static RE_SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\.\s+").expect("valid regex: RE_SENTENCE_BREAK")
});

/// Runs of whitespace.
#[allow(clippy::expect_used)]
static RE_SPACES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("valid regex: RE_SPACES")
});

/// A comma between two letter-containing tokens (spoken cadence). Commas
/// adjacent to digits are verse lists and must survive.
#[allow(clippy::expect_used)]
static RE_WORD_COMMA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z])\s*,\s*([A-Za-z])").expect("valid regex: RE_WORD_COMMA")
});

/// "Book [chapter] X verse(s) Y" phrasing, speech mode only.
#[allow(clippy::expect_used)]
static RE_SPOKEN_VERSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:the\s+book\s+of\s+)?({})\s+(?:chapter\s+)?(\d{{1,3}})[\s,.]*verses?\s+(\d{{1,3}})\b",
        &*BOOK_PATTERN
    ))
    .expect("valid regex: RE_SPOKEN_VERSE")
});

/// "Book C, V" or bare "Book C V" chapter/verse pairs.
#[allow(clippy::expect_used)]
static RE_CHAPTER_VERSE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b({})\s+(\d{{1,3}})(?:\s*,\s*|\s+)(\d{{1,3}})\b",
        &*BOOK_PATTERN
    ))
    .expect("valid regex: RE_CHAPTER_VERSE_PAIR")
});

/// Normalize raw text for the reference grammar. Pure and idempotent.
pub fn normalize(text: &str, mode: NormalizeMode) -> String {
    let mut out = strip_sentence_breaks(text);
    out = RE_WORD_COMMA.replace_all(&out, "$1 $2").into_owned();
    out = numbers::words_to_digits(&out);
    if mode == NormalizeMode::Speech {
        out = RE_SPOKEN_VERSE.replace_all(&out, "$1 $2:$3").into_owned();
    }
    out = join_chapter_verse_pairs(&out);
    out.trim().to_string()
}

/// Pass 1: sentence-break periods become spaces, whitespace collapses.
fn strip_sentence_breaks(text: &str) -> String {
    let no_breaks = RE_SENTENCE_BREAK.replace_all(text, " ");
    let collapsed = RE_SPACES.replace_all(&no_breaks, " ");
    collapsed.trim().trim_end_matches('.').trim().to_string()
}

/// Pass 5: `"Romans 3, 5"` (or bare `"Luke 3 3"`) becomes `"Romans 3:5"`.
///
/// The join is suppressed when the second number is itself the chapter of a
/// following `digit:digit` reference ("Romans 3, 5:2" stays apart). The regex
/// crate has no lookahead, so the guard inspects the text after each match.
fn join_chapter_verse_pairs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_end = 0;
    for caps in RE_CHAPTER_VERSE_PAIR.captures_iter(text) {
        let whole = match caps.get(0) {
            Some(m) => m,
            None => continue,
        };
        let rest = &text[whole.end()..];
        if rest.starts_with(':') {
            continue;
        }
        out.push_str(&text[last_end..whole.start()]);
        out.push_str(&format!("{} {}:{}", &caps[1], &caps[2], &caps[3]));
        last_end = whole.end();
    }
    out.push_str(&text[last_end..]);
    out
}
