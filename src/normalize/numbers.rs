//! Spelled-out number conversion for transcript text.
//!
//! Speech engines emit "twenty one" where the grammar needs "21". Compound
//! tens+ones patterns are replaced before single words so "twenty" alone
//! never fires inside "twenty one".

use std::sync::LazyLock;
use regex::{Captures, Regex};

const ONES: &[(&str, u32)] = &[
    ("zero", 0), ("one", 1), ("two", 2), ("three", 3), ("four", 4),
    ("five", 5), ("six", 6), ("seven", 7), ("eight", 8), ("nine", 9),
    ("ten", 10), ("eleven", 11), ("twelve", 12), ("thirteen", 13),
    ("fourteen", 14), ("fifteen", 15), ("sixteen", 16), ("seventeen", 17),
    ("eighteen", 18), ("nineteen", 19),
];

const TENS: &[(&str, u32)] = &[
    ("twenty", 20), ("thirty", 30), ("forty", 40), ("fifty", 50),
    ("sixty", 60), ("seventy", 70), ("eighty", 80), ("ninety", 90),
];

fn ones_value(word: &str) -> Option<u32> {
    let lower = word.to_lowercase();
    ONES.iter().find(|(name, _)| *name == lower).map(|&(_, v)| v)
}

fn tens_value(word: &str) -> Option<u32> {
    let lower = word.to_lowercase();
    TENS.iter().find(|(name, _)| *name == lower).map(|&(_, v)| v)
}

/// Matches compound numbers like "twenty one" / "twenty-one".
#[allow(clippy::expect_used)]
static RE_COMPOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety)[\s-]+(one|two|three|four|five|six|seven|eight|nine)\b",
    )
    .expect("valid regex: RE_COMPOUND")
});

/// Matches standalone number words, teens and tens included.
#[allow(clippy::expect_used)]
static RE_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(zero|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety)\b",
    )
    .expect("valid regex: RE_SINGLE")
});

/// Replace spelled-out numbers with digits, compounds first.
pub fn words_to_digits(text: &str) -> String {
    let compounded = RE_COMPOUND.replace_all(text, |caps: &Captures<'_>| {
        match (tens_value(&caps[1]), ones_value(&caps[2])) {
            (Some(t), Some(o)) => (t + o).to_string(),
            // Unreachable given the pattern, but never corrupt the text
            _ => caps[0].to_string(),
        }
    });
    RE_SINGLE
        .replace_all(&compounded, |caps: &Captures<'_>| {
            ones_value(&caps[1])
                .or_else(|| tens_value(&caps[1]))
                .map_or_else(|| caps[0].to_string(), |v| v.to_string())
        })
        .into_owned()
}
