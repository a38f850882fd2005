//! Calibration values over lines of text.
//!
//! A line's calibration value is a two-digit number built from the first
//! and last digit found in it. Two readings exist: `digits_value` only
//! looks at literal ASCII digits, `spelled_value` also accepts the English
//! spellings `one` through `nine`, found with the keyword automaton.

use crate::automaton::{Automaton, Match};
use crate::KeyscanError;

/// The calibration dictionary: the nine digits and their spellings.
pub const NUMERIC_KEYWORDS: [&str; 18] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "one", "two", "three", "four", "five", "six",
    "seven", "eight", "nine",
];

/// Build the automaton for [`NUMERIC_KEYWORDS`].
pub fn numeric_automaton() -> Result<Automaton, KeyscanError> {
    Automaton::from_keywords(NUMERIC_KEYWORDS)
}

/// Digit value of a calibration keyword, `None` for anything else.
pub fn keyword_digit(keyword: &str) -> Option<u32> {
    match keyword {
        "1" | "one" => Some(1),
        "2" | "two" => Some(2),
        "3" | "three" => Some(3),
        "4" | "four" => Some(4),
        "5" | "five" => Some(5),
        "6" | "six" => Some(6),
        "7" | "seven" => Some(7),
        "8" | "eight" => Some(8),
        "9" | "nine" => Some(9),
        _ => None,
    }
}

/// Calibration value using literal digits only, `None` if the line has no
/// digit. A line with a single digit uses it as both first and last.
pub fn digits_value(line: &str) -> Option<u32> {
    let mut digits = line.chars().filter_map(|c| c.to_digit(10));
    let first = digits.next()?;
    let last = digits.next_back().unwrap_or(first);
    Some(10 * first + last)
}

/// Calibration value accepting spelled-out digits, `None` if the line
/// contains no keyword at all.
///
/// Matches arrive in ascending end-position order, so the first and last
/// reported matches are the first and last occurrences in the line.
pub fn spelled_value(line: &str, automaton: &Automaton) -> Result<Option<u32>, KeyscanError> {
    let matches = automaton.scan(line)?;
    Ok(combine(&matches))
}

fn combine(matches: &[Match<'_>]) -> Option<u32> {
    let first = keyword_digit(matches.first()?.keyword)?;
    let last = keyword_digit(matches.last()?.keyword)?;
    Some(10 * first + last)
}
