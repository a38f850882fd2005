//! keyscan: multi-keyword text scanning over a fixed alphabet
//!
//! The core of the crate is an Aho-Corasick pattern-matching automaton built
//! once from a dictionary of keywords and then scanned against any number of
//! independent input lines. Construction runs in three ordered phases (trie,
//! failure links, deterministic next-move table); scanning takes exactly one
//! table lookup per input byte and reports every occurrence of every keyword.
//!
//! The automaton is immutable once built, so it can be shared across threads
//! behind an `Arc` and scanned concurrently:
//!
//! ```
//! use std::sync::Arc;
//! use keyscan::Automaton;
//!
//! let automaton = Arc::new(Automaton::from_keywords(["one", "two"]).unwrap());
//! let handle = {
//!     let automaton = Arc::clone(&automaton);
//!     std::thread::spawn(move || automaton.scan("onetwo").unwrap().len())
//! };
//! assert_eq!(automaton.scan("twoone").unwrap().len(), 2);
//! assert_eq!(handle.join().unwrap(), 2);
//! ```

pub mod automaton;
pub mod calibration;

use std::fmt;

pub use automaton::{Automaton, AutomatonBuilder, Match};

/// Errors surfaced at the build/scan boundary.
///
/// Internal invariant violations (a failure link read before breadth-first
/// assignment reaches it, for example) are construction-order bugs and are
/// enforced with assertions rather than reported through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyscanError {
    /// A keyword or scanned text contains a byte outside the fixed
    /// `a`-`z` / `0`-`9` alphabet.
    InvalidAlphabet(char),
    /// A zero-length keyword was supplied to the builder.
    EmptyPattern,
}

impl fmt::Display for KeyscanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyscanError::InvalidAlphabet(c) => {
                write!(f, "symbol {c:?} is outside the a-z/0-9 alphabet")
            }
            KeyscanError::EmptyPattern => write!(f, "empty keyword"),
        }
    }
}

impl std::error::Error for KeyscanError {}
