//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.
//! Note that "no verse found" is never an error in this crate; resolution
//! failures surface as `None`/empty results. Errors here cover the dataset
//! and grammar-parser boundaries only.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Verse dataset error (missing file, malformed JSON)
    #[error("Verse dataset error: {message}. {hint}")]
    Dataset {
        /// Description of the dataset problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Grammar-parser collaborator error
    #[error("Grammar parser error: {0}")]
    Grammar(String),

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// File parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    #[allow(dead_code)]
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a dataset error with actionable hint
    pub fn dataset(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Dataset { message: message.into(), hint }
    }

    /// Create a grammar-parser error
    pub fn grammar(message: impl Into<String>) -> Self {
        Self::Grammar(message.into())
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn dataset_error_carries_hint() {
        let err = Error::dataset("KJV.json not found", "Set VERSE_DATA_PATH");
        match err {
            Error::Dataset { hint, .. } => assert!(hint.contains("VERSE_DATA_PATH")),
            _ => panic!("Expected Dataset error"),
        }
    }
}
