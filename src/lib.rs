//! `verseflow` - context-aware scripture reference detection.
//!
//! Locates Scripture passages from typed queries or noisy speech-to-text
//! transcripts ("Luke. Three. Three.", "Romans three, five", "verse seven"),
//! looks up their text in a bundled verse dataset, and supports stepping
//! forward/backward through consecutive verses across chapter and book
//! boundaries.

// Re-export public modules for use in integration tests and as a library
pub mod books;
pub mod config;
pub mod constants;
pub mod context;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod navigation;
pub mod normalize;
pub mod resolver;
pub mod types;

pub use context::ParseContext;
pub use engine::{DetectOptions, ScriptureEngine};
pub use types::{DetectedReference, NavigationResult, ParsedReference};
