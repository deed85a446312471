//! The reference resolution cascade.
//!
//! Ordered strategies tried in sequence, first success wins. Every strategy
//! failure (including a grammar-parser error) falls through to the next;
//! "could not find a verse" is an expected outcome and never an error. On
//! success the parse context is overwritten from the FIRST returned
//! reference; later references in a multi-reference utterance do not touch
//! it.

pub mod disambiguate;

use std::sync::Arc;
use std::sync::LazyLock;

use futures::future::{BoxFuture, FutureExt};
use regex::Regex;
use tracing::{debug, warn};

use crate::books::BOOK_PATTERN;
use crate::constants::resolver::MAX_RETRY_DEPTH;
use crate::context::ParseContext;
use crate::grammar::{entity_to_reference, GrammarParser};
use crate::types::ParsedReference;

/// Which cascade strategy produced a resolution. Logged per success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// "chapter X verse Y" with the context's book.
    ChapterVerseNoBook,
    /// "verse Y" with the context's book and chapter.
    VerseOnly,
    /// "Book chapter X" / "chapter X of Book".
    ChapterOnly,
    /// Full grammar delegation.
    Grammar,
    /// Grammar retry with the context's full reference as hint.
    ContextRetry,
    /// Grammar retry with the legacy raw-string hint.
    LegacyRetry,
    /// Bare digits spliced onto the context's book.
    RegexContext,
}

impl Strategy {
    /// Stable name for logging.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChapterVerseNoBook => "chapter_verse_no_book",
            Self::VerseOnly => "verse_only",
            Self::ChapterOnly => "chapter_only",
            Self::Grammar => "grammar",
            Self::ContextRetry => "context_retry",
            Self::LegacyRetry => "legacy_retry",
            Self::RegexContext => "regex_context",
        }
    }
}

/// Navigation commands handled by the caller, never parsed as scripture.
#[allow(clippy::expect_used)]
static RE_NAV_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:next|previous|last)\s+(?:verse|scripture)\b")
        .expect("valid regex: RE_NAV_COMMAND")
});

/// Any known book name mention.
#[allow(clippy::expect_used)]
static RE_ANY_BOOK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", &*BOOK_PATTERN)).expect("valid regex: RE_ANY_BOOK")
});

/// "chapter X verse Y" phrasing with no book attached.
#[allow(clippy::expect_used)]
static RE_CHAPTER_VERSE_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bchapter\s+(\d{1,3})[\s,.]*verses?\s+(\d{1,3})\b")
        .expect("valid regex: RE_CHAPTER_VERSE_PHRASE")
});

/// "verse Y" (optionally "from verse Y", "verses Y-Z" / "Y to Z").
#[allow(clippy::expect_used)]
static RE_VERSE_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:from\s+)?verses?\s+(\d{1,3})(?:\s*(?:-|to|through)\s*(\d{1,3}))?\b")
        .expect("valid regex: RE_VERSE_ONLY")
});

/// "Book chapter X [verse Y]".
#[allow(clippy::expect_used)]
static RE_BOOK_CHAPTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:the\s+book\s+of\s+)?({})\s*,?\s+chapter\s+(\d{{1,3}})(?:[\s,.]*verses?\s+(\d{{1,3}}))?",
        &*BOOK_PATTERN
    ))
    .expect("valid regex: RE_BOOK_CHAPTER")
});

/// "chapter X of Book".
#[allow(clippy::expect_used)]
static RE_CHAPTER_OF_BOOK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)\bchapter\s+(\d{{1,3}})\s+of\s+(?:the\s+book\s+of\s+)?({})\b",
        &*BOOK_PATTERN
    ))
    .expect("valid regex: RE_CHAPTER_OF_BOOK")
});

/// Bare `C:V` or `C V` digit pair anywhere in the text.
#[allow(clippy::expect_used)]
static RE_DIGIT_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,3})\s*[:\s]\s*(\d{1,3})\b").expect("valid regex: RE_DIGIT_PAIR")
});

/// A lone number anywhere in the text.
#[allow(clippy::expect_used)]
static RE_LONE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(\d{1,3})\b").expect("valid regex: RE_LONE_NUMBER")
});

/// Log a winning strategy and pass its references through.
fn won(strategy: Strategy, refs: Vec<ParsedReference>) -> Vec<ParsedReference> {
    debug!(strategy = strategy.as_str(), count = refs.len(), "resolved");
    refs
}

/// The strategy cascade over a grammar-parser collaborator.
pub struct Resolver {
    grammar: Arc<dyn GrammarParser>,
}

impl Resolver {
    /// Create a resolver delegating to the given grammar parser.
    pub fn new(grammar: Arc<dyn GrammarParser>) -> Self {
        Self { grammar }
    }

    /// Resolve normalized text into structural references.
    ///
    /// `None` means nothing resolved (or the text was a navigation command
    /// the caller handles itself). Never returns an error.
    pub async fn resolve(
        &self,
        text: &str,
        ctx: &mut ParseContext,
    ) -> Option<Vec<ParsedReference>> {
        self.resolve_at_depth(text, ctx, 0).await
    }

    /// Whether the text is a navigation command ("next verse", "last verse").
    pub fn is_navigation_command(text: &str) -> bool {
        RE_NAV_COMMAND.is_match(text)
    }

    fn resolve_at_depth<'a>(
        &'a self,
        text: &'a str,
        ctx: &'a mut ParseContext,
        depth: u8,
    ) -> BoxFuture<'a, Option<Vec<ParsedReference>>> {
        async move {
            // Strategy 1: navigation commands are not scripture
            if Self::is_navigation_command(text) {
                debug!(text, "navigation command, not parsed as scripture");
                return None;
            }

            if let Some(refs) = self.chapter_verse_no_book(text, ctx) {
                return Some(won(Strategy::ChapterVerseNoBook, refs));
            }
            if let Some(refs) = self.verse_only(text, ctx) {
                return Some(won(Strategy::VerseOnly, refs));
            }
            if let Some(refs) = self.chapter_only(text, ctx).await {
                return Some(won(Strategy::ChapterOnly, refs));
            }
            if let Some(refs) = self.grammar_delegation(text, ctx).await {
                return Some(won(Strategy::Grammar, refs));
            }

            // Strategies 6 and 7 re-enter the cascade with the OSIS id the
            // grammar's context-aware parse produced
            if depth < MAX_RETRY_DEPTH {
                let hints = [
                    (Strategy::ContextRetry, ctx.full_reference.clone()),
                    (
                        Strategy::LegacyRetry,
                        ctx.last_raw.clone().filter(|raw| {
                            ctx.full_reference.as_deref() != Some(raw.as_str())
                        }),
                    ),
                ];
                for (strategy, hint) in hints {
                    let Some(hint) = hint else { continue };
                    if let Some(osis) = self.context_parse(text, &hint).await {
                        if let Some(refs) = self.resolve_at_depth(&osis, ctx, depth + 1).await {
                            debug!(strategy = strategy.as_str(), osis = %osis, "resolved via retry");
                            return Some(refs);
                        }
                    }
                }
            }

            // Strategy 8: last resort, splice bare digits onto the context
            let refs = self.regex_context(text, ctx);
            if refs.is_some() {
                debug!(strategy = Strategy::RegexContext.as_str(), "resolved");
            }
            refs
        }
        .boxed()
    }

    /// Strategy 2: "chapter X verse Y" with no book in the text, book from
    /// context.
    fn chapter_verse_no_book(
        &self,
        text: &str,
        ctx: &mut ParseContext,
    ) -> Option<Vec<ParsedReference>> {
        if RE_ANY_BOOK.is_match(text) {
            return None;
        }
        let caps = RE_CHAPTER_VERSE_PHRASE.captures(text)?;
        let book = ctx.book.clone()?;
        let chapter: u32 = caps[1].parse().ok()?;
        let verse: u32 = caps[2].parse().ok()?;
        if chapter == 0 || verse == 0 {
            return None;
        }
        let reference = ParsedReference::single(book, chapter, verse);
        ctx.apply(&reference, false);
        Some(vec![reference])
    }

    /// Strategy 3: "verse Y" continuation, book and chapter from context.
    fn verse_only(&self, text: &str, ctx: &mut ParseContext) -> Option<Vec<ParsedReference>> {
        if RE_ANY_BOOK.is_match(text) || text.contains(':') {
            return None;
        }
        let caps = RE_VERSE_ONLY.captures(text)?;
        if !ctx.has_book_and_chapter() {
            return None;
        }
        let book = ctx.book.clone()?;
        let chapter = ctx.chapter?;
        let start: u32 = caps[1].parse().ok()?;
        if start == 0 {
            return None;
        }
        let end: u32 = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .filter(|&e| e >= start)
            .unwrap_or(start);
        let reference = ParsedReference::range(book, chapter, start, end);
        ctx.apply_verse(start);
        Some(vec![reference])
    }

    /// Strategy 4: chapter-only phrasing. The book token is resolved by
    /// probing the grammar with a synthetic `"{book} 1:1"` reference, so the
    /// grammar stays the single authority on book naming. Context is fully
    /// replaced (book, chapter, verse 1).
    async fn chapter_only(
        &self,
        text: &str,
        ctx: &mut ParseContext,
    ) -> Option<Vec<ParsedReference>> {
        let (book_text, chapter, verse) = RE_BOOK_CHAPTER
            .captures(text)
            .map(|caps| {
                (
                    caps[1].to_string(),
                    caps[2].to_string(),
                    caps.get(3).map(|m| m.as_str().to_string()),
                )
            })
            .or_else(|| {
                RE_CHAPTER_OF_BOOK
                    .captures(text)
                    .map(|caps| (caps[2].to_string(), caps[1].to_string(), None))
            })?;
        let chapter: u32 = chapter.parse().ok()?;
        if chapter == 0 {
            return None;
        }

        let probe = format!("{book_text} 1:1");
        let probed = match self.grammar.parse(&probe).await {
            Ok(entities) => entities,
            Err(e) => {
                warn!(error = %e, "grammar probe failed");
                return None;
            }
        };
        let base = probed.first().and_then(entity_to_reference)?;

        let verse: u32 = verse.and_then(|v| v.parse().ok()).unwrap_or(1).max(1);
        let mut reference = ParsedReference::single(base.book, chapter, verse);
        reference.full_book_name = base.full_book_name;
        ctx.apply(&reference, false);
        Some(vec![reference])
    }

    /// Strategy 5: hand the text to the grammar and validate every passage
    /// entity it reports. Only the first reference updates context.
    async fn grammar_delegation(
        &self,
        text: &str,
        ctx: &mut ParseContext,
    ) -> Option<Vec<ParsedReference>> {
        let entities = match self.grammar.parse(text).await {
            Ok(entities) => entities,
            Err(e) => {
                warn!(error = %e, "grammar parse failed");
                return None;
            }
        };
        let refs: Vec<ParsedReference> =
            entities.iter().filter_map(entity_to_reference).collect();
        let first = refs.first()?;
        ctx.apply(first, true);
        Some(refs)
    }

    /// Context-aware grammar parse shared by strategies 6 and 7.
    async fn context_parse(&self, text: &str, hint: &str) -> Option<String> {
        match self.grammar.parse_with_context(text, hint).await {
            Ok(osis) => osis,
            Err(e) => {
                warn!(error = %e, hint, "context-aware grammar parse failed");
                None
            }
        }
    }

    /// Strategy 8: extract bare chapter/verse digits and splice them onto the
    /// context's book. Input values win where present, context values fill
    /// the gaps.
    fn regex_context(&self, text: &str, ctx: &mut ParseContext) -> Option<Vec<ParsedReference>> {
        let book = ctx.book.clone()?;
        let (chapter, verse) = if let Some(caps) = RE_DIGIT_PAIR.captures(text) {
            (caps[1].parse().ok()?, caps[2].parse().ok()?)
        } else {
            let caps = RE_LONE_NUMBER.captures(text)?;
            (ctx.chapter?, caps[1].parse().ok()?)
        };
        if chapter == 0 || verse == 0 {
            return None;
        }
        let reference = ParsedReference::single(book, chapter, verse);
        ctx.apply(&reference, false);
        Some(vec![reference])
    }
}
