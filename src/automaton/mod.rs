//! Aho-Corasick pattern-matching automaton.
//!
//! The key components are:
//!
//! - `alphabet`: The fixed 36-symbol input alphabet and its dense indexing
//! - `builder`: Staged construction (trie/goto, failure links, next-move)
//! - `machine`: The immutable `Automaton` and its scan routines
//!
//! Construction order matters: the failure function depends on the complete
//! goto trie, and the deterministic next-move table depends on the complete
//! failure function. `AutomatonBuilder` makes that ordering a type-level
//! contract; an `Automaton` can only exist with all three phases done.

mod alphabet;
mod builder;
mod machine;

pub use alphabet::{sym_index, ALPHABET, SIGMA};
pub use builder::AutomatonBuilder;
pub use machine::{Automaton, Match};

#[cfg(test)]
mod tests;
