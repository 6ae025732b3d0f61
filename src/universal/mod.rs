//! Universal Levenshtein automata.
//!
//! A universal Levenshtein automaton is a deterministic finite automaton,
//! parametrized only by an edit-distance bound `n`, that accepts exactly the
//! characteristic-vector sequences of strings within `n` edits of a
//! reference string. Because its input alphabet is bit vectors rather than
//! characters, one automaton serves every dictionary, alphabet and query —
//! build (or load) it once, reuse it forever.
//!
//! The approach follows Schulz and Mihov, "Fast string correction with
//! Levenshtein automata" (IJDAR 2002), and Mitankin's universal-automaton
//! construction: automaton states are sets of alignment hypotheses
//! ([`Position`]s) minimized under subsumption, and the state graph is the
//! breadth-first closure of the transition algebra over all bit vectors up
//! to length `2n + 2`.

pub mod automaton;
pub mod bit_vector;
pub mod position;
pub mod recognize;
pub mod state;
pub mod subsumption;
pub mod transition;

pub use automaton::{UniversalAutomaton, MAX_DISTANCE};
pub use bit_vector::{characteristic_vector, BitVector};
pub use position::{Kind, Param, Position};
pub use recognize::TraversalError;
pub use state::PositionState;
pub use subsumption::subsumes;
pub use transition::{advance_one, boundary_window, covers_all_positions, delta, ChiMode};
