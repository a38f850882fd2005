//! Staged construction of the automaton.
//!
//! States live in an arena (`Vec` indexed by `StateId`) so the goto trie,
//! failure links and output sets are all dense integer-indexed tables with
//! O(1) lookup. Construction runs in three phases in a fixed order:
//!
//! 1. `add_keyword` grows the goto trie and seeds the terminal output sets.
//! 2. `build` completes the root with self-loops, then assigns failure
//!    links breadth-first and merges each failure target's outputs into the
//!    state that was just linked.
//! 3. Still inside `build`, the deterministic next-move table is computed
//!    in the same breadth-first order, collapsing goto + failure into one
//!    total transition function.
//!
//! Because only `build(self)` hands out an `Automaton`, a half-constructed
//! machine can never be scanned.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::KeyscanError;

use super::alphabet::{require_sym, SIGMA};
use super::machine::Automaton;

/// A state identifier - an index into the state arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct StateId(u32);

impl StateId {
    /// Sentinel for "no state" / undefined transition.
    pub(crate) const NONE: StateId = StateId(u32::MAX);
    /// The initial state of every automaton.
    pub(crate) const ROOT: StateId = StateId(0);

    #[inline]
    pub(crate) fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Keyword ids recognized when the scan lands in a state.
///
/// Inline capacity of two covers nearly every state: a state accumulates
/// more outputs only when several keywords end along one failure chain.
pub(crate) type OutputSet = SmallVec<[u32; 2]>;

/// One state of the goto trie under construction.
struct BuildState {
    /// Real trie edges (plus root self-loops once `build` adds them);
    /// `StateId::NONE` where no edge exists.
    goto: [StateId; SIGMA],
    /// Longest proper suffix of this state's prefix that is itself a
    /// prefix in the trie. `NONE` until the breadth-first pass assigns it;
    /// stays `NONE` for the root, whose failure link is never followed.
    fail: StateId,
    outputs: OutputSet,
}

impl BuildState {
    fn new() -> Self {
        Self {
            goto: [StateId::NONE; SIGMA],
            fail: StateId::NONE,
            outputs: OutputSet::new(),
        }
    }
}

/// Builds an [`Automaton`] from a dictionary of keywords.
///
/// Keywords may be added in any order; duplicates are allowed and every
/// insertion is retained in the terminal state's output set, so a keyword
/// added twice is reported twice per occurrence.
pub struct AutomatonBuilder {
    states: Vec<BuildState>,
    keywords: Vec<Box<str>>,
    /// Interning map so duplicate keyword text shares one id.
    ids_by_keyword: FxHashMap<Box<str>, u32>,
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        Self {
            states: vec![BuildState::new()],
            keywords: Vec::new(),
            ids_by_keyword: FxHashMap::default(),
        }
    }

    /// Add one keyword to the dictionary.
    ///
    /// Walks existing goto edges as far as they match, then allocates one
    /// new state per remaining byte and marks the terminal state with the
    /// keyword's id.
    pub fn add_keyword(&mut self, keyword: &str) -> Result<(), KeyscanError> {
        if keyword.is_empty() {
            return Err(KeyscanError::EmptyPattern);
        }

        // Validate every byte up front so a rejected keyword leaves the
        // trie untouched.
        let mut syms: SmallVec<[usize; 8]> = SmallVec::new();
        for &byte in keyword.as_bytes() {
            syms.push(require_sym(byte)?);
        }

        let id = self.intern(keyword);

        let mut state = StateId::ROOT;
        for &sym in &syms {
            let existing = self.states[state.index()].goto[sym];
            state = if existing.is_none() {
                let fresh = self.alloc();
                self.states[state.index()].goto[sym] = fresh;
                fresh
            } else {
                existing
            };
        }

        // A keyword that is a prefix of a longer one keeps its own marking
        // here; the longer keyword just extends through this state.
        self.states[state.index()].outputs.push(id);
        Ok(())
    }

    /// Number of keywords added so far (duplicates counted once).
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }

    /// Run the failure-link and next-move phases and freeze the result.
    ///
    /// An empty dictionary is fine: the automaton is just the root spinning
    /// on itself and every scan reports nothing.
    pub fn build(mut self) -> Automaton {
        // Root self-loops for every symbol without a real edge. This makes
        // the root's transition function total, which is what terminates
        // every failure-chain walk below.
        for sym in 0..SIGMA {
            if self.states[0].goto[sym].is_none() {
                self.states[0].goto[sym] = StateId::ROOT;
            }
        }

        let bfs_order = self.assign_failure_links();
        let next = self.compute_next_moves(&bfs_order);

        let state_count = self.states.len();
        let mut gotos = Vec::with_capacity(state_count * SIGMA);
        let mut fail = Vec::with_capacity(state_count);
        let mut outputs = Vec::with_capacity(state_count);
        for state in self.states {
            gotos.extend_from_slice(&state.goto);
            fail.push(state.fail);
            outputs.push(state.outputs);
        }

        Automaton {
            keywords: self.keywords,
            gotos,
            fail,
            next,
            outputs,
        }
    }

    /// Breadth-first failure-link assignment.
    ///
    /// Each state's failure link depends only on its parent's, which a
    /// breadth-first order has already finalized; a depth-first order would
    /// read unassigned links. Returns the visit order so the next-move
    /// phase can reuse it.
    fn assign_failure_links(&mut self) -> Vec<StateId> {
        let mut order = Vec::with_capacity(self.states.len());
        let mut queue = VecDeque::new();

        // Depth 1: every real child of the root fails back to the root.
        for sym in 0..SIGMA {
            let s = self.states[0].goto[sym];
            if s != StateId::ROOT {
                self.states[s.index()].fail = StateId::ROOT;
                queue.push_back(s);
            }
        }

        while let Some(r) = queue.pop_front() {
            order.push(r);
            for sym in 0..SIGMA {
                let s = self.states[r.index()].goto[sym];
                if s.is_none() {
                    continue;
                }
                queue.push_back(s);

                // Walk r's failure chain to the deepest state that can
                // still consume this symbol; the root always can.
                let mut t = self.fail_of(r);
                while self.states[t.index()].goto[sym].is_none() {
                    t = self.fail_of(t);
                }
                let target = self.states[t.index()].goto[sym];
                self.states[s.index()].fail = target;

                // Merge the failure target's outputs into the state just
                // linked, keeping everything already attached. After this,
                // reporting at scan time needs no failure-chain walk.
                if !self.states[target.index()].outputs.is_empty() {
                    let inherited = self.states[target.index()].outputs.clone();
                    self.states[s.index()].outputs.extend(inherited);
                }
            }
        }
        order
    }

    /// Collapse goto + failure into the total next-move table.
    ///
    /// Processes states in the breadth-first order of the failure phase, so
    /// `next(fail(r), sym)` is always already resolved when `r` needs it
    /// (`fail(r)` sits at strictly smaller depth).
    fn compute_next_moves(&self, bfs_order: &[StateId]) -> Vec<StateId> {
        let state_count = self.states.len();
        let mut next = vec![StateId::NONE; state_count * SIGMA];

        // Root row: the root's goto function is already total.
        next[..SIGMA].copy_from_slice(&self.states[0].goto);

        for &r in bfs_order {
            let row = r.index() * SIGMA;
            for sym in 0..SIGMA {
                let s = self.states[r.index()].goto[sym];
                next[row + sym] = if s.is_none() {
                    let f = self.fail_of(r);
                    next[f.index() * SIGMA + sym]
                } else {
                    s
                };
            }
        }
        next
    }

    /// Read an assigned failure link.
    ///
    /// Reading an unassigned link means the phases ran out of order, which
    /// the builder's structure is supposed to make impossible; treat it as
    /// a fatal programming error rather than a recoverable condition.
    fn fail_of(&self, state: StateId) -> StateId {
        let fail = self.states[state.index()].fail;
        assert!(
            !fail.is_none(),
            "failure link of state {} read before breadth-first assignment",
            state.0
        );
        fail
    }

    fn alloc(&mut self) -> StateId {
        let id = StateId(self.states.len() as u32);
        self.states.push(BuildState::new());
        id
    }

    fn intern(&mut self, keyword: &str) -> u32 {
        if let Some(&id) = self.ids_by_keyword.get(keyword) {
            return id;
        }
        let id = self.keywords.len() as u32;
        self.keywords.push(keyword.into());
        self.ids_by_keyword.insert(keyword.into(), id);
        id
    }
}

impl Default for AutomatonBuilder {
    fn default() -> Self {
        Self::new()
    }
}
