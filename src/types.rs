//! Core value types shared across the detection engine.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A structural scripture reference produced by one resolution.
///
/// Immutable once built; `end_verse == start_verse` for single verses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedReference {
    /// Canonical book name matching the verse dataset ("1 John", "Psalms").
    pub book: String,
    /// Book token as the grammar collaborator reported it ("1John", "Ps").
    pub full_book_name: String,
    /// Chapter number (1-based).
    pub chapter: u32,
    /// First verse of the reference.
    pub start_verse: u32,
    /// Last verse of the reference (same as `start_verse` for single verses).
    pub end_verse: u32,
    /// Human-readable form, e.g. "John 3:16" or "Romans 3:3-5".
    pub display_ref: String,
}

impl ParsedReference {
    /// Build a reference for a single verse.
    pub fn single(book: impl Into<String>, chapter: u32, verse: u32) -> Self {
        Self::range(book, chapter, verse, verse)
    }

    /// Build a reference for a verse range within one chapter.
    pub fn range(book: impl Into<String>, chapter: u32, start: u32, end: u32) -> Self {
        let book = book.into();
        let display_ref = if start == end {
            format!("{book} {chapter}:{start}")
        } else {
            format!("{book} {chapter}:{start}-{end}")
        };
        Self {
            full_book_name: book.clone(),
            book,
            chapter,
            start_verse: start,
            end_verse: end,
            display_ref,
        }
    }

    /// True when the reference covers more than one verse.
    pub const fn is_range(&self) -> bool {
        self.start_verse != self.end_verse
    }

    /// Dataset key for a specific verse of this reference.
    pub fn dataset_key(&self, verse: u32) -> String {
        format!("{} {}:{}", self.book, self.chapter, verse)
    }
}

/// Origin of a detection, recorded on each result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTag {
    /// Detected from free text (typed or transcript).
    Detected,
    /// Loaded directly by book/chapter/verse components.
    Direct,
    /// Produced by a navigation step.
    Navigation,
}

impl SourceTag {
    /// Stable string form for logging and display.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Detected => "detected",
            Self::Direct => "direct",
            Self::Navigation => "navigation",
        }
    }
}

/// An externally visible detection: a resolved reference with its verse text.
#[derive(Debug, Clone)]
pub struct DetectedReference {
    /// Unique id for this detection.
    pub id: Uuid,
    /// Human-readable reference, e.g. "John 3:16".
    pub display_ref: String,
    /// Cleaned verse text (range verses joined with spaces).
    pub verse_text: String,
    /// How this detection was produced.
    pub source_tag: SourceTag,
    /// The structural reference behind this detection.
    pub components: ParsedReference,
    /// When the detection was made.
    pub timestamp: DateTime<Utc>,
}

impl DetectedReference {
    /// Build a detection from a resolved reference and its looked-up text.
    pub fn new(components: ParsedReference, verse_text: String, source_tag: SourceTag) -> Self {
        Self {
            id: Uuid::new_v4(),
            display_ref: components.display_ref.clone(),
            verse_text,
            source_tag,
            components,
            timestamp: Utc::now(),
        }
    }
}

/// A single verse with its cleaned text, as returned by range lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseText {
    /// Verse number.
    pub verse: u32,
    /// Cleaned verse text.
    pub text: String,
    /// Human-readable reference for this single verse.
    pub display_ref: String,
}

/// A concrete verse position with text, used by navigation results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseLocation {
    /// Canonical book name.
    pub book: String,
    /// Chapter number.
    pub chapter: u32,
    /// Verse number.
    pub verse: u32,
    /// Cleaned verse text.
    pub text: String,
    /// Human-readable reference, e.g. "John 2:25".
    pub display_ref: String,
}

/// Result of a navigation query. Derived fresh per call, never stored.
#[derive(Debug, Clone, Default)]
pub struct NavigationResult {
    /// Whether a preceding verse exists.
    pub has_previous: bool,
    /// Whether a following verse exists.
    pub has_next: bool,
    /// The preceding verse, when one exists.
    pub previous: Option<VerseLocation>,
    /// The following verse, when one exists.
    pub next: Option<VerseLocation>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn display_ref_forms() {
        assert_eq!(ParsedReference::single("John", 3, 16).display_ref, "John 3:16");
        assert_eq!(
            ParsedReference::range("Romans", 3, 3, 5).display_ref,
            "Romans 3:3-5"
        );
    }

    #[test]
    fn dataset_key_uses_canonical_book() {
        let r = ParsedReference::single("1 John", 3, 1);
        assert_eq!(r.dataset_key(1), "1 John 3:1");
    }
}
