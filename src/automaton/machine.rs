//! The immutable automaton and its scan routines.
//!
//! `scan` is the steady-state path: exactly one next-move table lookup per
//! input byte, no backtracking, no failure-chain walk. `scan_with_failures`
//! is the lazy fallback that resolves misses through failure links at scan
//! time; it produces identical results and exists so the two strategies can
//! be cross-checked against each other.

use crate::KeyscanError;

use super::alphabet::{require_sym, SIGMA};
use super::builder::{AutomatonBuilder, OutputSet, StateId};

/// One reported occurrence: the keyword and the 0-based index of its last
/// byte in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub end: usize,
    pub keyword: &'a str,
}

/// A built pattern-matching automaton.
///
/// Immutable once constructed, so it is `Send + Sync` and can be queried
/// from any number of threads without locking. All per-state data is laid
/// out in dense arrays keyed by the state's integer id.
pub struct Automaton {
    pub(crate) keywords: Vec<Box<str>>,
    /// Flat goto table, `state * SIGMA + sym`; real trie edges plus root
    /// self-loops, `StateId::NONE` elsewhere. Kept for the lazy scan path.
    pub(crate) gotos: Vec<StateId>,
    /// Failure links; the root's entry is never followed.
    pub(crate) fail: Vec<StateId>,
    /// Flat deterministic next-move table, total over states and symbols.
    pub(crate) next: Vec<StateId>,
    /// Per-state keyword ids, already merged along failure chains.
    pub(crate) outputs: Vec<OutputSet>,
}

impl Automaton {
    /// Build an automaton straight from a keyword dictionary.
    pub fn from_keywords<I, S>(keywords: I) -> Result<Self, KeyscanError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = AutomatonBuilder::new();
        for keyword in keywords {
            builder.add_keyword(keyword.as_ref())?;
        }
        Ok(builder.build())
    }

    /// Find every keyword occurrence in `text`.
    ///
    /// Matches are reported in scan order: ascending end position, and for
    /// several keywords ending at one position, in the order the output
    /// merge recorded them.
    pub fn scan<'a>(&'a self, text: &str) -> Result<Vec<Match<'a>>, KeyscanError> {
        let mut matches = Vec::new();
        self.scan_into(text, &mut matches)?;
        Ok(matches)
    }

    /// Like [`scan`](Self::scan), appending into a caller-owned buffer to
    /// avoid re-allocating across many lines.
    pub fn scan_into<'a>(
        &'a self,
        text: &str,
        matches: &mut Vec<Match<'a>>,
    ) -> Result<(), KeyscanError> {
        let mut state = StateId::ROOT;
        for (i, &byte) in text.as_bytes().iter().enumerate() {
            let sym = require_sym(byte)?;
            // Total by construction; never NONE.
            state = self.next[state.index() * SIGMA + sym];
            self.report(state, i, matches);
        }
        Ok(())
    }

    /// Scan without the next-move table, resolving goto misses through
    /// failure links per input byte.
    pub fn scan_with_failures<'a>(&'a self, text: &str) -> Result<Vec<Match<'a>>, KeyscanError> {
        let mut matches = Vec::new();
        let mut state = StateId::ROOT;
        for (i, &byte) in text.as_bytes().iter().enumerate() {
            let sym = require_sym(byte)?;
            loop {
                let g = self.gotos[state.index() * SIGMA + sym];
                if !g.is_none() {
                    state = g;
                    break;
                }
                state = self.fail_of(state);
            }
            self.report(state, i, &mut matches);
        }
        Ok(matches)
    }

    /// Number of distinct keywords in the dictionary.
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    /// Number of states, root included.
    pub fn state_count(&self) -> usize {
        self.fail.len()
    }

    #[inline]
    fn report<'a>(&'a self, state: StateId, end: usize, matches: &mut Vec<Match<'a>>) {
        for &id in &self.outputs[state.index()] {
            matches.push(Match {
                end,
                keyword: &self.keywords[id as usize],
            });
        }
    }

    /// Follow a failure link during a lazy scan.
    ///
    /// Every non-root state has one after construction; hitting an
    /// unassigned link would mean a half-built automaton escaped the
    /// builder, so it is asserted rather than handled.
    #[inline]
    fn fail_of(&self, state: StateId) -> StateId {
        let fail = self.fail[state.index()];
        assert!(!fail.is_none(), "unassigned failure link followed at scan time");
        fail
    }
}
