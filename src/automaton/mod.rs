//! Generic finite-automaton base.
//!
//! Every automaton in this crate is a graph of states with labeled
//! transitions and an optional terminal payload per state. States live in a
//! single arena (`Vec`) owned by the automaton and reference each other by
//! [`StateId`] index; transition maps store indices, never pointers. This
//! keeps the graph free of aliasing and lifetime knots and makes it trivially
//! serializable.
//!
//! Transition insertion is idempotent with first-writer-wins semantics:
//! inserting a transition for a symbol that already has one keeps the
//! existing successor. Trie construction relies on this while walking shared
//! prefixes.

use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Index of a state within its owning [`Automaton`]'s arena.
///
/// Ids are only meaningful relative to the automaton that issued them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(u32);

impl StateId {
    /// Raw index value, for external encodings of the state graph.
    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// Rebuild an id from its raw index value.
    #[inline]
    pub fn from_u32(raw: u32) -> Self {
        StateId(raw)
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One automaton state: an optional terminal payload plus a symbol-keyed
/// map to successor states.
///
/// The `self_loop` tag makes unmatched symbols loop back to the state itself
/// instead of falling off the graph. Automata whose start state must absorb
/// arbitrary input (failure-link matchers and the like) set it on their root
/// rather than special-casing the root in every lookup.
#[derive(Clone, Debug)]
struct State<K, V> {
    element: Option<V>,
    edges: FxHashMap<K, StateId>,
    self_loop: bool,
}

impl<K, V> State<K, V> {
    fn new() -> Self {
        State {
            element: None,
            edges: FxHashMap::default(),
            self_loop: false,
        }
    }
}

/// Arena-backed automaton over symbols `K` with terminal payloads `V`.
///
/// A fresh automaton holds a single non-accepting root state. A state is
/// accepting exactly when its payload is present.
#[derive(Clone, Debug)]
pub struct Automaton<K, V> {
    states: Vec<State<K, V>>,
    root: StateId,
}

impl<K: Eq + Hash, V> Automaton<K, V> {
    /// Create an automaton containing only a root state.
    pub fn new() -> Self {
        Automaton {
            states: vec![State::new()],
            root: StateId(0),
        }
    }

    /// The root (start) state.
    #[inline]
    pub fn root(&self) -> StateId {
        self.root
    }

    /// Total number of states in the automaton, root included.
    #[inline]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Allocate a fresh, unconnected, non-accepting state.
    pub fn add_state(&mut self) -> StateId {
        let id = StateId(u32::try_from(self.states.len()).expect("state arena exceeds u32 index space"));
        self.states.push(State::new());
        id
    }

    /// Follow the transition for `symbol` out of `from`.
    ///
    /// Absence is not an error: `None` signals "no such continuation". When
    /// the state carries the self-loop tag, unmatched symbols return the
    /// state itself.
    #[inline]
    pub fn successor(&self, from: StateId, symbol: &K) -> Option<StateId> {
        let state = &self.states[from.index()];
        match state.edges.get(symbol) {
            Some(&next) => Some(next),
            None if state.self_loop => Some(from),
            None => None,
        }
    }

    /// Insert a transition from `from` to `to` under `symbol`.
    ///
    /// If a transition for `symbol` already exists, the existing successor is
    /// kept unchanged and returned (first-writer-wins).
    pub fn link(&mut self, from: StateId, symbol: K, to: StateId) -> StateId {
        debug_assert!(to.index() < self.states.len());
        *self.states[from.index()].edges.entry(symbol).or_insert(to)
    }

    /// Get or create the successor of `from` under `symbol`.
    pub fn add_successor(&mut self, from: StateId, symbol: K) -> StateId {
        if let Some(&next) = self.states[from.index()].edges.get(&symbol) {
            return next;
        }
        let next = self.add_state();
        self.states[from.index()].edges.insert(symbol, next);
        next
    }

    /// Whether `id` is an accepting state (terminal payload present).
    #[inline]
    pub fn is_accept(&self, id: StateId) -> bool {
        self.states[id.index()].element.is_some()
    }

    /// The terminal payload of `id`, if any.
    #[inline]
    pub fn element(&self, id: StateId) -> Option<&V> {
        self.states[id.index()].element.as_ref()
    }

    /// Set (or replace) the terminal payload of `id`.
    pub fn set_element(&mut self, id: StateId, element: V) -> Option<V> {
        self.states[id.index()].element.replace(element)
    }

    /// Tag `id` so that unmatched symbols loop back to it.
    pub fn set_self_loop(&mut self, id: StateId, looped: bool) {
        self.states[id.index()].self_loop = looped;
    }

    /// Number of outgoing transitions from `id` (self-loop tag excluded).
    #[inline]
    pub fn out_degree(&self, id: StateId) -> usize {
        self.states[id.index()].edges.len()
    }

    /// Iterate over all state ids in arena order.
    pub fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        (0..self.states.len()).map(|i| StateId(i as u32))
    }

    /// Iterate over the outgoing transitions of `id`.
    pub fn edges(&self, id: StateId) -> impl Iterator<Item = (&K, StateId)> + '_ {
        self.states[id.index()].edges.iter().map(|(k, &to)| (k, to))
    }

    /// Insert one symbol path, setting `payload` at its terminal state.
    ///
    /// Shared prefixes reuse existing states; only the missing tail is
    /// created. An existing payload at the terminal state is replaced and
    /// returned.
    pub fn insert_path<P>(&mut self, path: P, payload: V) -> Option<V>
    where
        P: IntoIterator<Item = K>,
    {
        let mut node = self.root;
        for symbol in path {
            node = self.add_successor(node, symbol);
        }
        self.set_element(node, payload)
    }

    /// Bulk-load a collection of (symbol-sequence, payload) pairs as trie
    /// paths.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = (P, V)>,
        P: IntoIterator<Item = K>,
    {
        let mut automaton = Self::new();
        for (path, payload) in paths {
            automaton.insert_path(path, payload);
        }
        automaton
    }
}

impl<K: Eq + Hash, V> Default for Automaton<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_automaton_has_only_a_root() {
        let automaton: Automaton<char, ()> = Automaton::new();
        assert_eq!(automaton.state_count(), 1);
        assert!(!automaton.is_accept(automaton.root()));
        assert_eq!(automaton.out_degree(automaton.root()), 0);
    }

    #[test]
    fn link_is_first_writer_wins() {
        let mut automaton: Automaton<char, ()> = Automaton::new();
        let root = automaton.root();
        let first = automaton.add_state();
        let second = automaton.add_state();

        assert_eq!(automaton.link(root, 'a', first), first);
        // A later insert under the same symbol keeps the original successor.
        assert_eq!(automaton.link(root, 'a', second), first);
        assert_eq!(automaton.successor(root, &'a'), Some(first));
    }

    #[test]
    fn add_successor_reuses_existing_states() {
        let mut automaton: Automaton<char, ()> = Automaton::new();
        let root = automaton.root();
        let a = automaton.add_successor(root, 'a');
        assert_eq!(automaton.add_successor(root, 'a'), a);
        assert_eq!(automaton.state_count(), 2);
    }

    #[test]
    fn missing_successor_is_none_not_error() {
        let automaton: Automaton<char, ()> = Automaton::new();
        assert_eq!(automaton.successor(automaton.root(), &'z'), None);
    }

    #[test]
    fn self_loop_tag_absorbs_unmatched_symbols() {
        let mut automaton: Automaton<char, ()> = Automaton::new();
        let root = automaton.root();
        let next = automaton.add_successor(root, 'a');
        automaton.set_self_loop(root, true);

        // Matched symbols still follow their edge.
        assert_eq!(automaton.successor(root, &'a'), Some(next));
        // Unmatched symbols loop back instead of falling off the graph.
        assert_eq!(automaton.successor(root, &'z'), Some(root));
        // The tag is per-state, not inherited.
        assert_eq!(automaton.successor(next, &'z'), None);
    }

    #[test]
    fn bulk_load_builds_a_trie_with_shared_prefixes() {
        let automaton: Automaton<char, &str> = Automaton::from_paths(vec![
            ("cat".chars(), "cat"),
            ("cats".chars(), "cats"),
            ("car".chars(), "car"),
        ]);

        // root + c,a,t,s,r
        assert_eq!(automaton.state_count(), 6);

        let mut node = automaton.root();
        for c in "cat".chars() {
            node = automaton.successor(node, &c).unwrap();
        }
        assert!(automaton.is_accept(node));
        assert_eq!(automaton.element(node), Some(&"cat"));

        let s = automaton.successor(node, &'s').unwrap();
        assert!(automaton.is_accept(s));
    }

    #[test]
    fn payload_marks_acceptance() {
        let mut automaton: Automaton<char, String> = Automaton::new();
        let root = automaton.root();
        let node = automaton.add_successor(root, 'x');
        assert!(!automaton.is_accept(node));
        automaton.set_element(node, "x".to_string());
        assert!(automaton.is_accept(node));
    }
}
