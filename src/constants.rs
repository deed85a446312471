//! Application constants.
//!
//! Centralizes magic numbers and configuration values for better maintainability.

/// Navigation constants.
pub mod navigation {
    /// Highest verse number probed when scanning a chapter downward for its
    /// last verse (Psalm 119 tops out at 176).
    pub const MAX_VERSE_SCAN: u32 = 200;

    /// Highest chapter number probed when scanning a book downward for its
    /// last chapter (Psalms tops out at 150).
    pub const MAX_CHAPTER_SCAN: u32 = 150;
}

/// Combined-digit disambiguation constants.
pub mod disambiguate {
    /// Shortest fused chapter+verse digit run considered (e.g., "J316" style "316").
    pub const MIN_DIGIT_RUN: usize = 3;

    /// Longest fused digit run considered (e.g., "11923" for Psalm 119:23).
    pub const MAX_DIGIT_RUN: usize = 5;
}

/// Resolver constants.
pub mod resolver {
    /// Maximum recursion depth for context-assisted grammar retries. The OSIS
    /// identifier returned by a retry is resolved back through the cascade;
    /// one level is enough and prevents retry loops.
    pub const MAX_RETRY_DEPTH: u8 = 1;
}
