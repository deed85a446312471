//! The mutable "last successfully resolved reference" context.
//!
//! A single slot, not a history: each successful resolution overwrites it
//! wholesale with the first returned reference. The context is owned by the
//! caller (one per conversation or transcription stream) and passed `&mut`
//! into each resolve call, so independent sessions never collide. The engine
//! itself holds no session state.

use crate::types::ParsedReference;

/// Last-resolved-reference context for one conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseContext {
    /// Canonical book of the last resolution.
    pub book: Option<String>,
    /// Chapter of the last resolution.
    pub chapter: Option<u32>,
    /// Start verse of the last resolution.
    pub verse: Option<u32>,
    /// Full display reference of the last resolution, used as the grammar
    /// parser's context hint ("John 3:16").
    pub full_reference: Option<String>,
    /// Raw reference string from the last grammar-delegated success. Kept
    /// separately as a retry hint for when `full_reference` was overwritten
    /// by a partial (verse-only or chapter-only) resolution.
    pub last_raw: Option<String>,
}

impl ParseContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the context, e.g. when a new search session starts.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Read-only snapshot of the current context.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Whether a book is known.
    pub fn has_book(&self) -> bool {
        self.book.is_some()
    }

    /// Whether both book and chapter are known.
    pub fn has_book_and_chapter(&self) -> bool {
        self.book.is_some() && self.chapter.is_some()
    }

    /// Overwrite the slot from a resolved reference. `from_grammar` marks
    /// resolutions that came from the grammar parser itself, which also
    /// refresh the legacy raw hint.
    pub fn apply(&mut self, reference: &ParsedReference, from_grammar: bool) {
        self.book = Some(reference.book.clone());
        self.chapter = Some(reference.chapter);
        self.verse = Some(reference.start_verse);
        self.full_reference = Some(reference.display_ref.clone());
        if from_grammar {
            self.last_raw = Some(reference.display_ref.clone());
        }
    }

    /// Update only the verse, keeping book and chapter (verse-only
    /// continuations like "verse 7").
    pub fn apply_verse(&mut self, verse: u32) {
        self.verse = Some(verse);
        if let (Some(book), Some(chapter)) = (self.book.as_deref(), self.chapter) {
            self.full_reference = Some(format!("{book} {chapter}:{verse}"));
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn apply_overwrites_wholesale() {
        let mut ctx = ParseContext::new();
        ctx.apply(&ParsedReference::single("John", 3, 16), true);
        assert_eq!(ctx.book.as_deref(), Some("John"));
        assert_eq!(ctx.chapter, Some(3));
        assert_eq!(ctx.verse, Some(16));
        assert_eq!(ctx.full_reference.as_deref(), Some("John 3:16"));
        assert_eq!(ctx.last_raw.as_deref(), Some("John 3:16"));

        ctx.apply(&ParsedReference::single("Romans", 8, 1), false);
        assert_eq!(ctx.book.as_deref(), Some("Romans"));
        assert_eq!(ctx.full_reference.as_deref(), Some("Romans 8:1"));
        // Legacy hint still points at the last grammar success
        assert_eq!(ctx.last_raw.as_deref(), Some("John 3:16"));
    }

    #[test]
    fn reset_clears_everything() {
        let mut ctx = ParseContext::new();
        ctx.apply(&ParsedReference::single("John", 3, 16), true);
        ctx.reset();
        assert_eq!(ctx, ParseContext::default());
    }

    #[test]
    fn verse_update_keeps_chapter() {
        let mut ctx = ParseContext::new();
        ctx.apply(&ParsedReference::single("John", 3, 16), true);
        ctx.apply_verse(17);
        assert_eq!(ctx.chapter, Some(3));
        assert_eq!(ctx.verse, Some(17));
        assert_eq!(ctx.full_reference.as_deref(), Some("John 3:17"));
    }
}
