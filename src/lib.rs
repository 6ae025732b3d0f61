//! # levdict
//!
//! Fuzzy dictionary search with a universal Levenshtein automaton.
//!
//! Given a fixed dictionary and a query string, find every dictionary word
//! within a bounded edit distance of the query — without scanning the whole
//! dictionary. The dictionary is a character trie built once from the word
//! list; the edit-distance bound is compiled once into a universal
//! Levenshtein automaton (Schulz & Mihov, "Fast string correction with
//! Levenshtein automata", IJDAR 2002) that is independent of alphabet,
//! dictionary and query; recognition walks both automata in lock-step,
//! pruning every branch the bound rules out.
//!
//! ## Example
//!
//! ```rust
//! use levdict::prelude::*;
//!
//! let dictionary = DictionaryAutomaton::from_words(["apple", "orange", "apply"]);
//! let automaton = UniversalAutomaton::new(1);
//!
//! let matches = automaton.recognize("aplle", &dictionary);
//! assert!(matches.contains("apple"));
//! assert!(!matches.contains("apply")); // two edits away
//! ```
//!
//! Because the automaton depends only on the distance bound, it is worth
//! persisting: see the [`persist`] module (feature `serialization`, on by
//! default) for the versioned on-disk format and the `dist<NNN>.lev`
//! loading convention.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod automaton;
pub mod dictionary;
pub mod distance;
pub mod universal;

#[cfg(feature = "serialization")]
pub mod persist;

/// CLI interface and utilities
#[cfg(feature = "cli")]
pub mod cli;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::automaton::{Automaton, StateId};
    pub use crate::dictionary::DictionaryAutomaton;
    pub use crate::distance::levenshtein;
    pub use crate::universal::{
        BitVector, ChiMode, TraversalError, UniversalAutomaton, MAX_DISTANCE,
    };

    #[cfg(feature = "serialization")]
    pub use crate::persist::{load_automaton, save_automaton, PersistError};
}
