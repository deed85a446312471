//! Combined chapter+verse digit disambiguation.
//!
//! Speech-to-text collapses "John 3 16" into "John316". Each candidate split
//! (chapter length 1 and 2) is validated against the verse dataset; the fused
//! run is rewritten only when EXACTLY one split names a real verse. Zero or
//! multiple valid splits leave the text untouched: ambiguous input must never
//! silently guess.

use std::sync::LazyLock;
use regex::Regex;
use tracing::debug;

use crate::books::{normalize_book_name, BOOK_PATTERN};
use crate::constants::disambiguate::{MAX_DIGIT_RUN, MIN_DIGIT_RUN};
use crate::dataset::VerseDataset;

/// A book name immediately followed by a fused 3–5 digit run.
#[allow(clippy::expect_used)]
static RE_COMBINED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b({})\s?(\d{{{MIN_DIGIT_RUN},{MAX_DIGIT_RUN}}})\b",
        &*BOOK_PATTERN
    ))
    .expect("valid regex: RE_COMBINED")
});

/// Rewrite unambiguous fused chapter+verse runs as `"Book C:V"`.
pub fn disambiguate_combined(text: &str, dataset: &VerseDataset) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_end = 0;
    for caps in RE_COMBINED.captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let book_text = &caps[1];
        let digits = &caps[2];
        let Some(split) = unique_valid_split(book_text, digits, dataset) else {
            continue;
        };
        let (chapter, verse) = split;
        debug!(book = book_text, digits, chapter, verse, "combined digits disambiguated");
        out.push_str(&text[last_end..whole.start()]);
        out.push_str(&format!("{book_text} {chapter}:{verse}"));
        last_end = whole.end();
    }
    out.push_str(&text[last_end..]);
    out
}

/// The single (chapter, verse) split of `digits` that exists in the dataset,
/// or `None` when zero or several splits validate.
fn unique_valid_split(
    book_text: &str,
    digits: &str,
    dataset: &VerseDataset,
) -> Option<(u32, u32)> {
    let canonical = normalize_book_name(book_text)?;
    let mut valid: Vec<(u32, u32)> = Vec::new();
    for chapter_len in 1..=2usize {
        if digits.len() <= chapter_len {
            continue;
        }
        let (Ok(chapter), Ok(verse)) = (
            digits[..chapter_len].parse::<u32>(),
            digits[chapter_len..].parse::<u32>(),
        ) else {
            continue;
        };
        if chapter == 0 || verse == 0 {
            continue;
        }
        if dataset.contains(&format!("{canonical} {chapter}:{verse}")) {
            valid.push((chapter, verse));
        }
    }
    match valid.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::collections::HashMap;

    fn dataset(keys: &[&str]) -> VerseDataset {
        VerseDataset::from_map(
            keys.iter()
                .map(|k| ((*k).to_string(), "text".to_string()))
                .collect(),
        )
    }

    #[test]
    fn unique_split_is_rewritten() {
        let d = dataset(&["John 3:16"]);
        assert_eq!(disambiguate_combined("John316", &d), "John 3:16");
    }

    #[test]
    fn spaced_run_is_rewritten_too() {
        let d = dataset(&["John 3:16"]);
        assert_eq!(disambiguate_combined("John 316", &d), "John 3:16");
    }

    #[test]
    fn ambiguous_split_left_untouched() {
        // Both 3:16 and 31:6 exist: conservative tie-break keeps the original
        let d = dataset(&["Psalms 3:16", "Psalms 31:6"]);
        assert_eq!(disambiguate_combined("Psalms316", &d), "Psalms316");
    }

    #[test]
    fn no_valid_split_left_untouched() {
        let d = dataset(&["John 3:16"]);
        assert_eq!(disambiguate_combined("John999", &d), "John999");
    }

    #[test]
    fn surrounding_text_preserved() {
        let d = dataset(&["John 3:16"]);
        assert_eq!(
            disambiguate_combined("turn to John316 please", &d),
            "turn to John 3:16 please"
        );
    }

    #[test]
    fn normal_references_pass_through() {
        let d = dataset(&["John 3:16"]);
        assert_eq!(disambiguate_combined("John 3:16", &d), "John 3:16");
    }
}
