//! Universal Levenshtein automaton construction.
//!
//! The automaton is parametrized by the edit-distance bound `n` alone. Its
//! inputs are characteristic bit vectors, never characters, which is what
//! makes one build universal: the same automaton serves any alphabet, any
//! dictionary and any query length. Construction cost grows steeply with
//! `n`, but an automaton is built once and reused for every query (and can
//! be persisted, see the `persist` module).
//!
//! Construction is a breadth-first closure over the position-set algebra:
//! starting from `{I+0#0}`, apply [`delta`] for every bit vector whose
//! length [`covers_all_positions`], deduplicate discovered states by
//! structural value, and record bit-vector-labeled edges. A state is marked
//! accepting when its position set is final for the bound (it equals or
//! subsumes `M+0#n`); exactly one reachable state ends up with no outgoing
//! edges, and that sink is always among the accepting states.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::automaton::{Automaton, StateId};
use crate::universal::bit_vector::{BitVector, MAX_BITS};
use crate::universal::state::PositionState;
use crate::universal::transition::{covers_all_positions, delta, ChiMode};

/// Largest supported edit-distance bound (window lengths must fit a
/// [`BitVector`]).
pub const MAX_DISTANCE: u8 = ((MAX_BITS - 2) / 2) as u8;

/// A universal Levenshtein automaton for one fixed edit-distance bound.
///
/// Immutable once built; any number of traversals may run against it
/// concurrently.
#[derive(Clone, Debug)]
pub struct UniversalAutomaton {
    graph: Automaton<BitVector, ()>,
    sink: StateId,
    distance: u8,
    chi: ChiMode,
}

impl UniversalAutomaton {
    /// Build the automaton for edit-distance bound `distance` with the
    /// plain Levenshtein advancement rules.
    pub fn new(distance: u8) -> Self {
        Self::with_mode(distance, ChiMode::Epsilon)
    }

    /// Build the automaton for `distance` under the given χ variant.
    ///
    /// # Panics
    ///
    /// Panics if `distance` exceeds [`MAX_DISTANCE`], or if the construction
    /// ends with anything but exactly one sink state (which would mean the
    /// algebra violated its own invariants).
    pub fn with_mode(distance: u8, chi: ChiMode) -> Self {
        assert!(
            distance <= MAX_DISTANCE,
            "edit-distance bound {distance} exceeds the supported maximum {MAX_DISTANCE}"
        );

        let vocabulary = BitVector::all_vectors(2 * distance as usize + 2);

        let mut graph: Automaton<BitVector, ()> = Automaton::new();
        let mut ids: FxHashMap<PositionState, StateId> = FxHashMap::default();
        let mut queue: VecDeque<PositionState> = VecDeque::new();

        let start = PositionState::start();
        ids.insert(start.clone(), graph.root());
        queue.push_back(start);

        while let Some(state) = queue.pop_front() {
            let from = ids[&state];

            for &b in &vocabulary {
                if !covers_all_positions(distance, b.len(), &state) {
                    continue;
                }

                let next = delta(chi, distance, &state, b);
                if next.is_empty() {
                    continue;
                }

                let to = match ids.get(&next) {
                    Some(&id) => id,
                    None => {
                        let id = graph.add_state();
                        ids.insert(next.clone(), id);
                        queue.push_back(next);
                        id
                    }
                };
                graph.link(from, b, to);
            }
        }

        for (state, &id) in &ids {
            if state.is_final(distance) {
                graph.set_element(id, ());
            }
        }

        let sinks: Vec<StateId> = graph.ids().filter(|&id| graph.out_degree(id) == 0).collect();
        assert_eq!(
            sinks.len(),
            1,
            "universal automaton for distance {distance} must have exactly one sink, found {}",
            sinks.len()
        );
        let sink = sinks[0];
        assert!(
            graph.is_accept(sink),
            "the sink of the universal automaton must be a final state"
        );

        UniversalAutomaton {
            graph,
            sink,
            distance,
            chi,
        }
    }

    /// The edit-distance bound this automaton was built for.
    #[inline]
    pub fn distance(&self) -> u8 {
        self.distance
    }

    /// The χ variant this automaton was built with.
    #[inline]
    pub fn chi(&self) -> ChiMode {
        self.chi
    }

    /// Number of states.
    #[inline]
    pub fn state_count(&self) -> usize {
        self.graph.state_count()
    }

    /// Whether the automaton accepts a full sequence of characteristic
    /// vectors, i.e. ends in an accepting state after consuming all of them.
    pub fn accepts<I>(&self, vectors: I) -> bool
    where
        I: IntoIterator<Item = BitVector>,
    {
        let mut state = self.graph.root();
        for b in vectors {
            match self.graph.successor(state, &b) {
                Some(next) => state = next,
                None => return false,
            }
        }
        self.graph.is_accept(state)
    }

    #[inline]
    pub(crate) fn root(&self) -> StateId {
        self.graph.root()
    }

    #[inline]
    pub(crate) fn successor(&self, from: StateId, b: BitVector) -> Option<StateId> {
        self.graph.successor(from, &b)
    }

    #[inline]
    pub(crate) fn is_accept(&self, id: StateId) -> bool {
        self.graph.is_accept(id)
    }

    /// Iterate over every transition as (from, label, to).
    pub(crate) fn transitions(&self) -> impl Iterator<Item = (StateId, BitVector, StateId)> + '_ {
        self.graph
            .ids()
            .flat_map(move |from| self.graph.edges(from).map(move |(&b, to)| (from, b, to)))
    }

    #[inline]
    pub(crate) fn sink_id(&self) -> StateId {
        self.sink
    }

    /// Iterate over the ids of all accepting states.
    pub(crate) fn accepting_ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.graph.ids().filter(|&id| self.graph.is_accept(id))
    }

    /// Reassemble an automaton from its serialized parts (accept flags
    /// already set on the graph). The caller is responsible for having
    /// validated the graph shape.
    pub(crate) fn from_parts(
        distance: u8,
        chi: ChiMode,
        graph: Automaton<BitVector, ()>,
        sink: StateId,
    ) -> Self {
        UniversalAutomaton {
            graph,
            sink,
            distance,
            chi,
        }
    }
}
