//! Canonical book names, aliases, and the book-name alternation pattern.
//!
//! Every component that recognizes a book in free text (normalizer,
//! combined-digit disambiguator, built-in grammar) goes through this module,
//! so "Rom", "romans", "1john", and "1 John" all land on the same canonical
//! dataset name.

use std::collections::HashMap;
use lazy_static::lazy_static;

/// The 66 books in canon order, using the dataset's full names.
/// Order drives cross-book navigation (previous/next at chapter 1 / last chapter).
pub const BOOK_ORDER: [&str; 66] = [
    "Genesis", "Exodus", "Leviticus", "Numbers", "Deuteronomy",
    "Joshua", "Judges", "Ruth", "1 Samuel", "2 Samuel",
    "1 Kings", "2 Kings", "1 Chronicles", "2 Chronicles", "Ezra",
    "Nehemiah", "Esther", "Job", "Psalms", "Proverbs",
    "Ecclesiastes", "Song of Solomon", "Isaiah", "Jeremiah", "Lamentations",
    "Ezekiel", "Daniel", "Hosea", "Joel", "Amos",
    "Obadiah", "Jonah", "Micah", "Nahum", "Habakkuk",
    "Zephaniah", "Haggai", "Zechariah", "Malachi",
    "Matthew", "Mark", "Luke", "John", "Acts",
    "Romans", "1 Corinthians", "2 Corinthians", "Galatians", "Ephesians",
    "Philippians", "Colossians", "1 Thessalonians", "2 Thessalonians", "1 Timothy",
    "2 Timothy", "Titus", "Philemon", "Hebrews", "James",
    "1 Peter", "2 Peter", "1 John", "2 John", "3 John",
    "Jude", "Revelation",
];

/// Alias → canonical name pairs. Keys are lowercase; numbered books appear
/// both with and without the internal space, and with common abbreviations.
/// OSIS-style tokens ("1john", "ps", "rev") are covered so grammar output
/// resolves through the same table.
const ALIASES: &[(&str, &str)] = &[
    ("gen", "Genesis"), ("genesis", "Genesis"),
    ("ex", "Exodus"), ("exod", "Exodus"), ("exodus", "Exodus"),
    ("lev", "Leviticus"), ("leviticus", "Leviticus"),
    ("num", "Numbers"), ("numbers", "Numbers"),
    ("deut", "Deuteronomy"), ("deuteronomy", "Deuteronomy"),
    ("josh", "Joshua"), ("joshua", "Joshua"),
    ("judg", "Judges"), ("judges", "Judges"),
    ("ruth", "Ruth"),
    ("1 sam", "1 Samuel"), ("1sam", "1 Samuel"), ("1 samuel", "1 Samuel"), ("1samuel", "1 Samuel"),
    ("2 sam", "2 Samuel"), ("2sam", "2 Samuel"), ("2 samuel", "2 Samuel"), ("2samuel", "2 Samuel"),
    ("1 kgs", "1 Kings"), ("1 kings", "1 Kings"), ("1kings", "1 Kings"), ("1kgs", "1 Kings"),
    ("2 kgs", "2 Kings"), ("2 kings", "2 Kings"), ("2kings", "2 Kings"), ("2kgs", "2 Kings"),
    ("1 chr", "1 Chronicles"), ("1 chronicles", "1 Chronicles"), ("1chronicles", "1 Chronicles"), ("1chr", "1 Chronicles"),
    ("2 chr", "2 Chronicles"), ("2 chronicles", "2 Chronicles"), ("2chronicles", "2 Chronicles"), ("2chr", "2 Chronicles"),
    ("ezra", "Ezra"),
    ("neh", "Nehemiah"), ("nehemiah", "Nehemiah"),
    ("esth", "Esther"), ("esther", "Esther"),
    ("job", "Job"),
    ("ps", "Psalms"), ("psalm", "Psalms"), ("psalms", "Psalms"),
    ("prov", "Proverbs"), ("proverbs", "Proverbs"),
    ("eccl", "Ecclesiastes"), ("ecclesiastes", "Ecclesiastes"),
    ("song", "Song of Solomon"), ("song of solomon", "Song of Solomon"), ("song of songs", "Song of Solomon"),
    ("songofsolomon", "Song of Solomon"), ("songofsongs", "Song of Solomon"),
    ("isa", "Isaiah"), ("isaiah", "Isaiah"),
    ("jer", "Jeremiah"), ("jeremiah", "Jeremiah"),
    ("lam", "Lamentations"), ("lamentations", "Lamentations"),
    ("ezek", "Ezekiel"), ("ezekiel", "Ezekiel"),
    ("dan", "Daniel"), ("daniel", "Daniel"),
    ("hos", "Hosea"), ("hosea", "Hosea"),
    ("joel", "Joel"),
    ("amos", "Amos"),
    ("obad", "Obadiah"), ("obadiah", "Obadiah"),
    ("jonah", "Jonah"),
    ("mic", "Micah"), ("micah", "Micah"),
    ("nah", "Nahum"), ("nahum", "Nahum"),
    ("hab", "Habakkuk"), ("habakkuk", "Habakkuk"),
    ("zeph", "Zephaniah"), ("zephaniah", "Zephaniah"),
    ("hag", "Haggai"), ("haggai", "Haggai"),
    ("zech", "Zechariah"), ("zechariah", "Zechariah"),
    ("mal", "Malachi"), ("malachi", "Malachi"),
    ("matt", "Matthew"), ("matthew", "Matthew"),
    ("mark", "Mark"),
    ("luke", "Luke"),
    ("john", "John"),
    ("acts", "Acts"),
    ("rom", "Romans"), ("romans", "Romans"),
    ("1 cor", "1 Corinthians"), ("1cor", "1 Corinthians"), ("1 corinthians", "1 Corinthians"), ("1corinthians", "1 Corinthians"),
    ("2 cor", "2 Corinthians"), ("2cor", "2 Corinthians"), ("2 corinthians", "2 Corinthians"), ("2corinthians", "2 Corinthians"),
    ("gal", "Galatians"), ("galatians", "Galatians"),
    ("eph", "Ephesians"), ("ephesians", "Ephesians"),
    ("phil", "Philippians"), ("philippians", "Philippians"),
    ("col", "Colossians"), ("colossians", "Colossians"),
    ("1 thess", "1 Thessalonians"), ("1thess", "1 Thessalonians"), ("1 thessalonians", "1 Thessalonians"), ("1thessalonians", "1 Thessalonians"),
    ("2 thess", "2 Thessalonians"), ("2thess", "2 Thessalonians"), ("2 thessalonians", "2 Thessalonians"), ("2thessalonians", "2 Thessalonians"),
    ("1 tim", "1 Timothy"), ("1tim", "1 Timothy"), ("1 timothy", "1 Timothy"), ("1timothy", "1 Timothy"),
    ("2 tim", "2 Timothy"), ("2tim", "2 Timothy"), ("2 timothy", "2 Timothy"), ("2timothy", "2 Timothy"),
    ("titus", "Titus"),
    ("philem", "Philemon"), ("philemon", "Philemon"),
    ("heb", "Hebrews"), ("hebrews", "Hebrews"),
    ("jas", "James"), ("james", "James"),
    ("1 pet", "1 Peter"), ("1pet", "1 Peter"), ("1 peter", "1 Peter"), ("1peter", "1 Peter"),
    ("2 pet", "2 Peter"), ("2pet", "2 Peter"), ("2 peter", "2 Peter"), ("2peter", "2 Peter"),
    ("1 john", "1 John"), ("1john", "1 John"),
    ("2 john", "2 John"), ("2john", "2 John"),
    ("3 john", "3 John"), ("3john", "3 John"),
    ("jude", "Jude"),
    ("rev", "Revelation"), ("revelation", "Revelation"), ("revelations", "Revelation"),
];

lazy_static! {
    /// Book name normalization map
    static ref BOOK_ALIASES: HashMap<&'static str, &'static str> =
        ALIASES.iter().copied().collect();

    /// Canonical name → canon position
    static ref BOOK_INDEX: HashMap<&'static str, usize> = BOOK_ORDER
        .iter()
        .enumerate()
        .map(|(i, &name)| (name, i))
        .collect();

    /// Regex alternation matching any known book alias, longest first so
    /// "1 corinthians" wins over "1 cor". Internal spaces match flexible
    /// whitespace. Case-insensitivity is applied at the use site via `(?i)`.
    pub static ref BOOK_PATTERN: String = {
        let mut keys: Vec<&str> = ALIASES.iter().map(|&(alias, _)| alias).collect();
        keys.sort_by_key(|k| std::cmp::Reverse(k.len()));
        let alts: Vec<String> = keys.iter().map(|k| k.replace(' ', r"\s+")).collect();
        alts.join("|")
    };
}

/// Normalize a book name (alias, abbreviation, OSIS token, or full name)
/// to its canonical dataset form.
pub fn normalize_book_name(name: &str) -> Option<&'static str> {
    let lower = name.to_lowercase();
    let trimmed = lower.trim().trim_end_matches('.');

    // Direct lookup
    if let Some(&canonical) = BOOK_ALIASES.get(trimmed) {
        return Some(canonical);
    }

    // OSIS-style tokens ("1John", "Song.3.1" fragments) carry dots or lack
    // the internal space for numbered books
    let stripped: String = trimmed.chars().filter(|c| *c != '.' && *c != ' ').collect();
    if let Some(&canonical) = BOOK_ALIASES.get(stripped.as_str()) {
        return Some(canonical);
    }

    None
}

/// Position of a canonical book name in canon order.
pub fn book_index(canonical: &str) -> Option<usize> {
    BOOK_INDEX.get(canonical).copied()
}

/// Book preceding `canonical` in canon order, if any.
pub fn previous_book(canonical: &str) -> Option<&'static str> {
    let idx = book_index(canonical)?;
    idx.checked_sub(1).map(|i| BOOK_ORDER[i])
}

/// Book following `canonical` in canon order, if any.
pub fn next_book(canonical: &str) -> Option<&'static str> {
    let idx = book_index(canonical)?;
    BOOK_ORDER.get(idx + 1).copied()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn aliases_resolve_to_canonical() {
        assert_eq!(normalize_book_name("rom"), Some("Romans"));
        assert_eq!(normalize_book_name("ROMANS"), Some("Romans"));
        assert_eq!(normalize_book_name("1 john"), Some("1 John"));
        assert_eq!(normalize_book_name("1John"), Some("1 John"));
        assert_eq!(normalize_book_name("Song of Songs"), Some("Song of Solomon"));
        assert_eq!(normalize_book_name("psalm"), Some("Psalms"));
        assert_eq!(normalize_book_name("not a book"), None);
    }

    #[test]
    fn canon_order_boundaries() {
        assert_eq!(previous_book("Genesis"), None);
        assert_eq!(next_book("Revelation"), None);
        assert_eq!(previous_book("John"), Some("Luke"));
        assert_eq!(next_book("Malachi"), Some("Matthew"));
    }

    #[test]
    fn pattern_prefers_longer_aliases() {
        let re = regex::Regex::new(&format!(r"(?i)\b(?:{})", &*BOOK_PATTERN)).unwrap();
        let m = re.find("1 corinthians 13:4").unwrap();
        assert_eq!(m.as_str(), "1 corinthians");
    }
}
