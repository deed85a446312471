//! Minimal built-in reference grammar.
//!
//! Handles the formats a typed query or normalized transcript actually
//! produces: `"Book C:V"`, ranges `"Book C:V-V"`, `;`/`,`-separated lists
//! with bare continuations (`"John 3:16, 17"`), chapter-only (`"Psalm 23"`),
//! and OSIS identifiers (`"John.3.16"`). A full external grammar with richer
//! abbreviation and cross-chapter range support can be plugged in through the
//! same trait; this one keeps the crate usable standalone.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use super::{GrammarParser, PassageEntity, PassagePoint};
use crate::books::normalize_book_name;
use crate::error::Result;

/// OSIS identifier: `Book.Chapter.Verse`, optional `-EndVerse`.
#[allow(clippy::expect_used)]
static RE_OSIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([1-3]?\s*[A-Za-z]+)\.(\d{1,3})\.(\d{1,3})(?:-(\d{1,3}))?$")
        .expect("valid regex: RE_OSIS")
});

/// `chapter:verse` or `chapter:verse-verse` tail of a segment.
#[allow(clippy::expect_used)]
static RE_CHAPTER_VERSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,3}):(\d{1,3})(?:\s*-\s*(\d{1,3}))?$").expect("valid regex: RE_CHAPTER_VERSE")
});

/// Bare verse or verse range (`"17"`, `"17-19"`) used by list continuations.
#[allow(clippy::expect_used)]
static RE_BARE_VERSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,3})(?:\s*-\s*(\d{1,3}))?$").expect("valid regex: RE_BARE_VERSE")
});

/// The built-in grammar implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicGrammar;

impl BasicGrammar {
    /// Create the built-in grammar.
    pub const fn new() -> Self {
        Self
    }
}

fn point(book: Option<&str>, chapter: u32, verse: Option<u32>) -> PassagePoint {
    PassagePoint {
        book: book.map(ToString::to_string),
        chapter: Some(chapter),
        verse,
    }
}

fn entity(book: &str, chapter: u32, verse: Option<u32>, end_verse: Option<u32>) -> PassageEntity {
    PassageEntity {
        start: point(Some(book), chapter, verse),
        end: end_verse.map(|v| point(None, chapter, Some(v))),
        valid: normalize_book_name(book).is_some(),
    }
}

/// Split a segment into (book part, tail) at the last whitespace run whose
/// right side starts with a digit.
fn split_book_tail(segment: &str) -> Option<(&str, &str)> {
    let idx = segment
        .char_indices()
        .filter(|&(_, c)| c.is_whitespace())
        .map(|(i, _)| i)
        .filter(|&i| {
            segment[i..]
                .trim_start()
                .chars()
                .next()
                .is_some_and(|c| c.is_ascii_digit())
        })
        .next_back()?;
    // Numbered books ("1 John 3:16") keep their leading digit with the book
    let (book, tail) = segment.split_at(idx);
    let book = book.trim();
    let tail = tail.trim();
    if book.is_empty() || tail.is_empty() {
        None
    } else {
        Some((book, tail))
    }
}

/// Parse one list segment, carrying the previous segment's book and chapter
/// for bare continuations.
fn parse_segment(
    segment: &str,
    carry: &mut Option<(String, u32)>,
) -> Option<PassageEntity> {
    let segment = segment.trim();
    if segment.is_empty() {
        return None;
    }

    // OSIS identifier
    if let Some(caps) = RE_OSIS.captures(segment) {
        let book = caps.get(1)?.as_str();
        let chapter: u32 = caps.get(2)?.as_str().parse().ok()?;
        let verse: u32 = caps.get(3)?.as_str().parse().ok()?;
        let end: Option<u32> = caps.get(4).and_then(|m| m.as_str().parse().ok());
        *carry = Some((book.to_string(), chapter));
        return Some(entity(book, chapter, Some(verse), end));
    }

    // Bare continuation: "17" or "17-19" after "John 3:16"
    if let Some(caps) = RE_BARE_VERSE.captures(segment) {
        let (book, chapter) = carry.clone()?;
        let verse: u32 = caps.get(1)?.as_str().parse().ok()?;
        let end: Option<u32> = caps.get(2).and_then(|m| m.as_str().parse().ok());
        return Some(entity(&book, chapter, Some(verse), end));
    }

    let (book, tail) = split_book_tail(segment)?;

    // "Book C:V" or "Book C:V-V"
    if let Some(caps) = RE_CHAPTER_VERSE.captures(tail) {
        let chapter: u32 = caps.get(1)?.as_str().parse().ok()?;
        let verse: u32 = caps.get(2)?.as_str().parse().ok()?;
        let end: Option<u32> = caps.get(3).and_then(|m| m.as_str().parse().ok());
        *carry = Some((book.to_string(), chapter));
        return Some(entity(book, chapter, Some(verse), end));
    }

    // "Book C" chapter-only; verse left open for boundary defaulting
    if let Ok(chapter) = tail.parse::<u32>() {
        *carry = Some((book.to_string(), chapter));
        return Some(entity(book, chapter, None, None));
    }

    None
}

#[async_trait]
impl GrammarParser for BasicGrammar {
    async fn parse(&self, text: &str) -> Result<Vec<PassageEntity>> {
        let mut carry: Option<(String, u32)> = None;
        let entities = text
            .split(|c| c == ';' || c == ',')
            .filter_map(|segment| parse_segment(segment, &mut carry))
            .collect();
        Ok(entities)
    }

    async fn parse_with_context(&self, text: &str, hint: &str) -> Result<Option<String>> {
        let hinted = self.parse(hint).await?;
        let Some(base) = hinted.first().and_then(super::entity_to_reference) else {
            return Ok(None);
        };
        let osis_book = base.book.replace(' ', "");

        // Two numbers in the input are chapter and verse; a lone number is a
        // verse within the hint's chapter.
        #[allow(clippy::expect_used)]
        static RE_PAIR: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"(\d{1,3})\s*[:\s]\s*(\d{1,3})").expect("valid regex: RE_PAIR")
        });
        #[allow(clippy::expect_used)]
        static RE_LONE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"(\d{1,3})").expect("valid regex: RE_LONE")
        });

        if let Some(caps) = RE_PAIR.captures(text) {
            return Ok(Some(format!("{}.{}.{}", osis_book, &caps[1], &caps[2])));
        }
        if let Some(caps) = RE_LONE.captures(text) {
            return Ok(Some(format!("{}.{}.{}", osis_book, base.chapter, &caps[1])));
        }
        Ok(None)
    }
}
