//! Grammar-parser collaborator boundary.
//!
//! The formal reference grammar (abbreviations, ranges, multi-book lists) is
//! an external capability. This module defines the trait the engine consumes,
//! the untrusted passage-entity schema that crosses the boundary, and the
//! validation that converts entities into the engine's own `ParsedReference`.
//! Field presence is never assumed; anything that fails validation is simply
//! dropped.

pub mod basic;

use async_trait::async_trait;
use serde::Deserialize;

use crate::books::normalize_book_name;
use crate::error::Result;
use crate::types::ParsedReference;

/// One end of a passage as the grammar reports it. All fields optional;
/// validated at the boundary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PassagePoint {
    /// Book token in the grammar's own vocabulary ("1John", "Ps").
    pub book: Option<String>,
    /// Chapter number, if the grammar produced one.
    pub chapter: Option<u32>,
    /// Verse number, if the grammar produced one.
    pub verse: Option<u32>,
}

/// A passage entity as the grammar reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct PassageEntity {
    /// Start of the passage.
    pub start: PassagePoint,
    /// End of the passage, when the grammar parsed a range.
    #[serde(default)]
    pub end: Option<PassagePoint>,
    /// The grammar's own validity verdict.
    #[serde(default)]
    pub valid: bool,
}

/// The external grammar-parsing capability.
///
/// Calls cross a third-party boundary and are modeled as async; failures are
/// errors here but the resolver treats them as no-match for that strategy.
#[async_trait]
pub trait GrammarParser: Send + Sync {
    /// Parse normalized text into zero or more passage entities.
    async fn parse(&self, text: &str) -> Result<Vec<PassageEntity>>;

    /// Re-parse with a previously resolved full reference as an ellipsis
    /// hint, returning the OSIS-style identifier of the re-resolved parse
    /// ("John.3.17"), or `None` when the hint did not help.
    async fn parse_with_context(&self, text: &str, hint: &str) -> Result<Option<String>>;
}

/// Validate one untrusted passage entity into a `ParsedReference`.
///
/// Requirements: the grammar marked it valid, the start book resolves to a
/// canonical name, `chapter ≥ 1`, `start_verse ≥ 1` (defaulting to 1 when the
/// grammar gave a chapter without a verse; an explicit verse 0 is rejected
/// rather than guessed at). A same-book same-chapter end
/// point extends the range; anything else (cross-chapter, cross-book,
/// end < start) falls back to the start verse alone.
pub fn entity_to_reference(entity: &PassageEntity) -> Option<ParsedReference> {
    if !entity.valid {
        return None;
    }
    let token = entity.start.book.as_deref()?;
    let canonical = normalize_book_name(token)?;
    let chapter = entity.start.chapter.filter(|&c| c >= 1)?;
    let start_verse = match entity.start.verse {
        Some(0) => return None,
        Some(v) => v,
        None => 1,
    };

    let same_span = |end: &&PassagePoint| {
        let book_ok = end
            .book
            .as_deref()
            .and_then(normalize_book_name)
            .map_or(true, |b| b == canonical);
        book_ok && end.chapter.unwrap_or(chapter) == chapter
    };
    let end_verse = entity
        .end
        .as_ref()
        .filter(same_span)
        .and_then(|end| end.verse)
        .filter(|&v| v >= start_verse)
        .unwrap_or(start_verse);

    let mut reference = ParsedReference::range(canonical, chapter, start_verse, end_verse);
    reference.full_book_name = token.to_string();
    Some(reference)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn entity(book: &str, chapter: u32, verse: u32) -> PassageEntity {
        PassageEntity {
            start: PassagePoint {
                book: Some(book.to_string()),
                chapter: Some(chapter),
                verse: Some(verse),
            },
            end: None,
            valid: true,
        }
    }

    #[test]
    fn valid_entity_converts() {
        let r = entity_to_reference(&entity("john", 3, 16)).unwrap();
        assert_eq!(r.book, "John");
        assert_eq!(r.full_book_name, "john");
        assert_eq!(r.display_ref, "John 3:16");
    }

    #[test]
    fn invalid_flag_is_dropped() {
        let mut e = entity("john", 3, 16);
        e.valid = false;
        assert!(entity_to_reference(&e).is_none());
    }

    #[test]
    fn unknown_book_is_dropped() {
        assert!(entity_to_reference(&entity("atlantis", 3, 16)).is_none());
    }

    #[test]
    fn same_chapter_end_extends_range() {
        let mut e = entity("rom", 3, 3);
        e.end = Some(PassagePoint {
            book: None,
            chapter: Some(3),
            verse: Some(5),
        });
        let r = entity_to_reference(&e).unwrap();
        assert_eq!((r.start_verse, r.end_verse), (3, 5));
        assert_eq!(r.display_ref, "Romans 3:3-5");
    }

    #[test]
    fn cross_chapter_end_is_ignored() {
        let mut e = entity("rom", 3, 3);
        e.end = Some(PassagePoint {
            book: None,
            chapter: Some(4),
            verse: Some(2),
        });
        let r = entity_to_reference(&e).unwrap();
        assert_eq!((r.start_verse, r.end_verse), (3, 3));
    }

    #[test]
    fn chapter_without_verse_defaults_to_one() {
        let mut e = entity("matt", 5, 1);
        e.start.verse = None;
        let r = entity_to_reference(&e).unwrap();
        assert_eq!((r.start_verse, r.end_verse), (1, 1));
    }

    #[test]
    fn explicit_verse_zero_is_rejected() {
        // Verse 0 does not exist; defaulting it to 1 would serve the wrong
        // verse, so the entity is dropped instead.
        assert!(entity_to_reference(&entity("john", 3, 0)).is_none());
    }

    #[test]
    fn entity_deserializes_from_wire_json() {
        let json = r#"{
            "start": {"book": "1John", "chapter": 3, "verse": 1},
            "end": {"chapter": 3, "verse": 3},
            "valid": true
        }"#;
        let e: PassageEntity = serde_json::from_str(json).unwrap();
        let r = entity_to_reference(&e).unwrap();
        assert_eq!(r.display_ref, "1 John 3:1-3");
    }

    #[test]
    fn omitted_wire_fields_default() {
        let bare: PassageEntity =
            serde_json::from_str(r#"{"start": {"book": "Ps", "chapter": 23}}"#).unwrap();
        assert!(bare.end.is_none());
        assert!(!bare.valid);
        assert!(entity_to_reference(&bare).is_none());
    }
}
