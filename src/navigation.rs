//! Directional verse navigation across chapter and book boundaries.
//!
//! All queries are answered against the verse dataset alone; nothing here is
//! cached, a navigation result is recomputed fresh per call.

use crate::books::{next_book, previous_book};
use crate::constants::navigation::{MAX_CHAPTER_SCAN, MAX_VERSE_SCAN};
use crate::dataset::VerseDataset;
use crate::types::{NavigationResult, VerseLocation};

fn location(dataset: &VerseDataset, book: &str, chapter: u32, verse: u32) -> Option<VerseLocation> {
    let key = format!("{book} {chapter}:{verse}");
    let text = dataset.get_clean(&key)?;
    Some(VerseLocation {
        book: book.to_string(),
        chapter,
        verse,
        text,
        display_ref: key,
    })
}

/// Highest existing verse of a chapter, scanning down from the bound.
fn last_verse_of(dataset: &VerseDataset, book: &str, chapter: u32) -> Option<u32> {
    (1..=MAX_VERSE_SCAN)
        .rev()
        .find(|v| dataset.contains(&format!("{book} {chapter}:{v}")))
}

/// Highest existing chapter of a book, scanning down from the bound.
fn last_chapter_of(dataset: &VerseDataset, book: &str) -> Option<u32> {
    (1..=MAX_CHAPTER_SCAN)
        .rev()
        .find(|c| dataset.contains(&format!("{book} {c}:1")))
}

/// The verse preceding (book, chapter, verse), crossing chapter and book
/// boundaries. `None` before Genesis 1:1.
pub fn previous(
    dataset: &VerseDataset,
    book: &str,
    chapter: u32,
    verse: u32,
) -> Option<VerseLocation> {
    if verse > 1 {
        if let Some(loc) = location(dataset, book, chapter, verse - 1) {
            return Some(loc);
        }
    }
    if chapter > 1 {
        let prev_verse = last_verse_of(dataset, book, chapter - 1)?;
        return location(dataset, book, chapter - 1, prev_verse);
    }
    let prev_book = previous_book(book)?;
    let last_chapter = last_chapter_of(dataset, prev_book)?;
    let last_verse = last_verse_of(dataset, prev_book, last_chapter)?;
    location(dataset, prev_book, last_chapter, last_verse)
}

/// The verse following (book, chapter, verse), crossing chapter and book
/// boundaries. `None` after the end of Revelation.
pub fn next(
    dataset: &VerseDataset,
    book: &str,
    chapter: u32,
    verse: u32,
) -> Option<VerseLocation> {
    if let Some(loc) = location(dataset, book, chapter, verse + 1) {
        return Some(loc);
    }
    if let Some(loc) = location(dataset, book, chapter + 1, 1) {
        return Some(loc);
    }
    let next = next_book(book)?;
    location(dataset, next, 1, 1)
}

/// Both directions in one result, computed fresh per call.
pub fn verse_navigation(
    dataset: &VerseDataset,
    book: &str,
    chapter: u32,
    verse: u32,
) -> NavigationResult {
    let previous = previous(dataset, book, chapter, verse);
    let next = next(dataset, book, chapter, verse);
    NavigationResult {
        has_previous: previous.is_some(),
        has_next: next.is_some(),
        previous,
        next,
    }
}
