//! Verse dataset: the immutable `"Book C:V"` → text mapping.
//!
//! Loaded once per process from a flat JSON object file. Concurrent callers
//! share a single in-flight load through `tokio::sync::OnceCell`, so the file
//! is never read or parsed twice.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::{Error, Result};

/// Immutable book/chapter/verse → text mapping. Read-only after load.
#[derive(Debug, Default)]
pub struct VerseDataset {
    verses: HashMap<String, String>,
}

impl VerseDataset {
    /// Build a dataset from an in-memory map (fixtures and tests).
    pub fn from_map(verses: HashMap<String, String>) -> Self {
        Self { verses }
    }

    /// Whether the exact key `"Book C:V"` exists.
    pub fn contains(&self, key: &str) -> bool {
        self.verses.contains_key(key)
    }

    /// Raw stored text for a key, markers and all.
    pub fn get_raw(&self, key: &str) -> Option<&str> {
        self.verses.get(key).map(String::as_str)
    }

    /// Cleaned text for a key: leading paragraph markers stripped, italic
    /// bracket annotations unwrapped.
    pub fn get_clean(&self, key: &str) -> Option<String> {
        self.get_raw(key).map(clean_verse_text)
    }

    /// Number of verses in the dataset.
    pub fn len(&self) -> usize {
        self.verses.len()
    }

    /// Whether the dataset holds no verses.
    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }
}

/// Strip presentation markers from raw stored verse text.
///
/// The bundled dataset prefixes paragraph starts with `#` (or `¶`) and wraps
/// translator-supplied words in square brackets. Display text keeps the words
/// but drops the markers.
pub fn clean_verse_text(raw: &str) -> String {
    let trimmed = raw
        .trim_start_matches(|c: char| c == '#' || c == '¶' || c.is_whitespace());
    let unbracketed: String = trimmed.chars().filter(|c| *c != '[' && *c != ']').collect();
    unbracketed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One-time async loader for the verse dataset file.
///
/// `load` is idempotent: the first caller reads and parses the file, every
/// concurrent or later caller awaits and shares that same result.
pub struct DatasetLoader {
    path: PathBuf,
    cell: OnceCell<Arc<VerseDataset>>,
}

impl DatasetLoader {
    /// Create a loader for the dataset file at `path`.
    pub fn new(path: PathBuf) -> Self {
        Self { path, cell: OnceCell::new() }
    }

    /// Create a loader whose dataset is already resident (fixtures and tests).
    pub fn preloaded(dataset: VerseDataset) -> Self {
        Self {
            path: PathBuf::new(),
            cell: OnceCell::new_with(Some(Arc::new(dataset))),
        }
    }

    /// Load the dataset, or await the load already in flight.
    pub async fn load(&self) -> Result<Arc<VerseDataset>> {
        self.cell
            .get_or_try_init(|| async {
                let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
                    Error::dataset(
                        format!("failed to read {}: {e}", self.path.display()),
                        "Set VERSE_DATA_PATH to a flat \"Book C:V\" JSON file",
                    )
                })?;
                let verses: HashMap<String, String> =
                    serde_json::from_str(&content).map_err(|e| {
                        Error::parse(
                            format!("invalid verse dataset JSON: {e}"),
                            Some(self.path.clone()),
                        )
                    })?;
                debug!(verses = verses.len(), path = %self.path.display(), "verse dataset loaded");
                Ok(Arc::new(VerseDataset::from_map(verses)))
            })
            .await
            .cloned()
    }
}
