//! The public scripture detection engine.
//!
//! Composes the normalizer, combined-digit disambiguator, resolver cascade,
//! verse lookup, and navigation behind one facade. The engine holds no
//! session state: each call takes the caller's `ParseContext`, so independent
//! conversations own independent contexts. Dataset and grammar failures are
//! logged and degrade to empty results on the detection paths: "nothing
//! detected" is never an error.

use std::sync::Arc;

use tracing::warn;

use crate::books::normalize_book_name;
use crate::context::ParseContext;
use crate::dataset::{DatasetLoader, VerseDataset};
use crate::error::Result;
use crate::grammar::basic::BasicGrammar;
use crate::grammar::GrammarParser;
use crate::navigation;
use crate::normalize::{normalize, NormalizeMode};
use crate::resolver::{disambiguate::disambiguate_combined, Resolver};
use crate::types::{
    DetectedReference, NavigationResult, ParsedReference, SourceTag, VerseText,
};

/// Options for a detection call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetectOptions {
    /// Treat the input as a speech transcript: additionally expand
    /// "Book X verse Y" phrasing before parsing.
    pub aggressive_speech_normalization: bool,
}

/// Context-aware scripture reference detection engine.
pub struct ScriptureEngine {
    loader: DatasetLoader,
    resolver: Resolver,
}

impl ScriptureEngine {
    /// Create an engine over a dataset loader and a grammar collaborator.
    pub fn new(loader: DatasetLoader, grammar: Arc<dyn GrammarParser>) -> Self {
        Self {
            loader,
            resolver: Resolver::new(grammar),
        }
    }

    /// Create an engine using the built-in reference grammar.
    pub fn with_basic_grammar(loader: DatasetLoader) -> Self {
        Self::new(loader, Arc::new(BasicGrammar::new()))
    }

    /// Whether the text is a navigation command the caller should handle
    /// ("next verse", "previous verse").
    pub fn is_navigation_command(text: &str) -> bool {
        Resolver::is_navigation_command(text)
    }

    /// The loaded dataset, awaiting the shared in-flight load if necessary.
    pub async fn dataset(&self) -> Result<Arc<VerseDataset>> {
        self.loader.load().await
    }

    /// Dataset for detection paths: load failures are logged and surface as
    /// "nothing detected".
    async fn dataset_or_log(&self) -> Option<Arc<VerseDataset>> {
        match self.loader.load().await {
            Ok(dataset) => Some(dataset),
            Err(e) => {
                warn!(error = %e, "verse dataset unavailable");
                None
            }
        }
    }

    /// Parse typed search text into structural references. `None` when
    /// nothing resolved.
    pub async fn parse_reference(
        &self,
        ctx: &mut ParseContext,
        text: &str,
    ) -> Option<Vec<ParsedReference>> {
        self.resolve_normalized(ctx, text, NormalizeMode::Typed).await
    }

    /// Detect references in free text and look up their verses. Always an
    /// array; empty when nothing was found.
    pub async fn detect_and_lookup(
        &self,
        ctx: &mut ParseContext,
        text: &str,
        options: DetectOptions,
    ) -> Vec<DetectedReference> {
        let mode = if options.aggressive_speech_normalization {
            NormalizeMode::Speech
        } else {
            NormalizeMode::Typed
        };
        let Some(refs) = self.resolve_normalized(ctx, text, mode).await else {
            return Vec::new();
        };
        let Some(dataset) = self.dataset_or_log().await else {
            return Vec::new();
        };
        refs.into_iter()
            .filter_map(|reference| {
                joined_text(&dataset, &reference)
                    .map(|text| DetectedReference::new(reference, text, SourceTag::Detected))
            })
            .collect()
    }

    async fn resolve_normalized(
        &self,
        ctx: &mut ParseContext,
        text: &str,
        mode: NormalizeMode,
    ) -> Option<Vec<ParsedReference>> {
        let normalized = normalize(text, mode);
        let disambiguated = match self.dataset_or_log().await {
            Some(dataset) => disambiguate_combined(&normalized, &dataset),
            // Without the dataset the conservative answer is the original text
            None => normalized,
        };
        self.resolver.resolve(&disambiguated, ctx).await
    }

    /// Text of a reference, range verses joined with spaces. `None` when no
    /// verse of the range exists.
    pub async fn lookup_verse(&self, reference: &ParsedReference) -> Option<String> {
        let dataset = self.dataset_or_log().await?;
        joined_text(&dataset, reference)
    }

    /// Per-verse text of a reference. Missing verses are skipped.
    pub async fn lookup_verses(&self, reference: &ParsedReference) -> Vec<VerseText> {
        let Some(dataset) = self.dataset_or_log().await else {
            return Vec::new();
        };
        (reference.start_verse..=reference.end_verse)
            .filter_map(|verse| {
                dataset.get_clean(&reference.dataset_key(verse)).map(|text| VerseText {
                    verse,
                    text,
                    display_ref: format!("{} {}:{}", reference.book, reference.chapter, verse),
                })
            })
            .collect()
    }

    /// Navigation in both directions from a verse position, computed fresh.
    pub async fn verse_navigation(&self, book: &str, chapter: u32, verse: u32) -> NavigationResult {
        let Some(dataset) = self.dataset_or_log().await else {
            return NavigationResult::default();
        };
        let canonical = normalize_book_name(book).unwrap_or(book);
        navigation::verse_navigation(&dataset, canonical, chapter, verse)
    }

    /// Step one verse forward or backward from a position, packaged as a
    /// detection tagged as navigation-produced.
    pub async fn navigate_step(
        &self,
        book: &str,
        chapter: u32,
        verse: u32,
        forward: bool,
    ) -> Option<DetectedReference> {
        let nav = self.verse_navigation(book, chapter, verse).await;
        let loc = if forward { nav.next } else { nav.previous }?;
        let reference = ParsedReference::single(loc.book, loc.chapter, loc.verse);
        Some(DetectedReference::new(reference, loc.text, SourceTag::Navigation))
    }

    /// Load one verse directly by components, bypassing text parsing.
    pub async fn load_verse_by_components(
        &self,
        book: &str,
        chapter: u32,
        verse: u32,
    ) -> Option<DetectedReference> {
        let dataset = self.dataset_or_log().await?;
        let canonical = normalize_book_name(book)?;
        let reference = ParsedReference::single(canonical, chapter, verse);
        let text = dataset.get_clean(&reference.dataset_key(verse))?;
        Some(DetectedReference::new(reference, text, SourceTag::Direct))
    }
}

/// Cleaned text of all existing verses of a reference, space-joined.
fn joined_text(dataset: &VerseDataset, reference: &ParsedReference) -> Option<String> {
    let parts: Vec<String> = (reference.start_verse..=reference.end_verse)
        .filter_map(|verse| dataset.get_clean(&reference.dataset_key(verse)))
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::collections::HashMap;

    fn fixture_engine() -> ScriptureEngine {
        let verses = [
            ("John 3:16", "# For God so loved the world"),
            ("John 3:17", "For God sent not his Son to condemn"),
            ("John 3:18", "He that believeth on him"),
            ("Genesis 1:1", "# In the beginning"),
            ("Romans 3:3", "For what if some did not believe"),
            ("Romans 3:5", "But if our unrighteousness"),
        ];
        let map: HashMap<String, String> = verses
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ScriptureEngine::with_basic_grammar(DatasetLoader::preloaded(VerseDataset::from_map(map)))
    }

    #[tokio::test]
    async fn detect_and_lookup_simple_reference() {
        let engine = fixture_engine();
        let mut ctx = ParseContext::new();
        let found = engine
            .detect_and_lookup(&mut ctx, "John 3:16", DetectOptions::default())
            .await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].display_ref, "John 3:16");
        assert!(found[0].verse_text.starts_with("For God so loved"));
        assert!(!found[0].verse_text.contains('#'));
        assert_eq!(found[0].source_tag, SourceTag::Detected);
    }

    #[tokio::test]
    async fn nothing_found_is_empty_not_error() {
        let engine = fixture_engine();
        let mut ctx = ParseContext::new();
        let found = engine
            .detect_and_lookup(&mut ctx, "and then we sang a song", DetectOptions::default())
            .await;
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn range_lookup_joins_and_skips_missing() {
        let engine = fixture_engine();
        let reference = ParsedReference::range("Romans", 3, 3, 5);
        let verses = engine.lookup_verses(&reference).await;
        // Romans 3:4 is absent from the fixture
        let numbers: Vec<u32> = verses.iter().map(|v| v.verse).collect();
        assert_eq!(numbers, vec![3, 5]);

        let joined = engine.lookup_verse(&reference).await.unwrap();
        assert!(joined.contains("did not believe"));
        assert!(joined.contains("unrighteousness"));
    }

    #[tokio::test]
    async fn load_by_components_accepts_aliases() {
        let engine = fixture_engine();
        let found = engine.load_verse_by_components("john", 3, 16).await.unwrap();
        assert_eq!(found.display_ref, "John 3:16");
        assert_eq!(found.source_tag, SourceTag::Direct);
        assert!(engine.load_verse_by_components("john", 99, 1).await.is_none());
    }

    #[tokio::test]
    async fn speech_transcript_end_to_end() {
        let engine = fixture_engine();
        let mut ctx = ParseContext::new();
        let options = DetectOptions { aggressive_speech_normalization: true };
        let found = engine
            .detect_and_lookup(&mut ctx, "John chapter 3 verse 16.", options)
            .await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].display_ref, "John 3:16");
    }

    #[tokio::test]
    async fn navigation_step_is_tagged() {
        let engine = fixture_engine();
        let forward = engine.navigate_step("John", 3, 16, true).await.unwrap();
        assert_eq!(forward.display_ref, "John 3:17");
        assert_eq!(forward.source_tag, SourceTag::Navigation);

        let backward = engine.navigate_step("John", 3, 17, false).await.unwrap();
        assert_eq!(backward.display_ref, "John 3:16");

        // Fixture has no verse after John 3:18 and no chapter 4
        assert!(engine.navigate_step("John", 3, 18, true).await.is_none());
    }

    #[tokio::test]
    async fn navigation_command_is_not_detected() {
        let engine = fixture_engine();
        let mut ctx = ParseContext::new();
        ctx.apply(&ParsedReference::single("John", 3, 16), true);
        let found = engine
            .detect_and_lookup(&mut ctx, "next verse", DetectOptions::default())
            .await;
        assert!(found.is_empty());
        assert!(ScriptureEngine::is_navigation_command("next verse"));
    }
}
