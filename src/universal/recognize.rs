//! Synchronized dictionary/automaton traversal.
//!
//! Recognition walks the dictionary trie and the universal automaton in
//! lock-step. Each frame pairs a dictionary state with an automaton state;
//! for every alphabet symbol the dictionary can continue with, the
//! automaton is driven by the characteristic vector of that symbol against
//! the current query suffix. A branch survives only while both automata
//! have a successor, and a word is reported when both land on accepting
//! states at once.
//!
//! The query is padded in front with sentinel characters chosen to be
//! absent from the dictionary alphabet, giving positions near the start a
//! full-width window symmetric to the shrinking windows near the end.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::automaton::StateId;
use crate::dictionary::DictionaryAutomaton;
use crate::universal::automaton::UniversalAutomaton;
use crate::universal::bit_vector::characteristic_vector;

/// Traversal failure modes.
#[derive(Debug, Error)]
pub enum TraversalError {
    /// The step budget handed to [`UniversalAutomaton::recognize_within`]
    /// ran out before the search space was exhausted.
    #[error("traversal step budget of {budget} exhausted")]
    BudgetExhausted {
        /// The budget that was exceeded.
        budget: usize,
    },
}

struct Frame {
    prefix: String,
    dict: StateId,
    lev: StateId,
    offset: usize,
}

impl UniversalAutomaton {
    /// All dictionary words within this automaton's edit-distance bound of
    /// `query`.
    ///
    /// The result is a deduplicated, order-independent set; distances are
    /// not reported (recompute them separately if needed).
    pub fn recognize(&self, query: &str, dictionary: &DictionaryAutomaton) -> BTreeSet<String> {
        match self.recognize_within(query, dictionary, None) {
            Ok(matches) => matches,
            Err(TraversalError::BudgetExhausted { .. }) => {
                unreachable!("unbounded traversal cannot exhaust a budget")
            }
        }
    }

    /// Like [`recognize`](Self::recognize), but giving up once the traversal
    /// has probed more than `budget` symbol transitions.
    ///
    /// Worst-case branching is the alphabet size per frame, so pathological
    /// dictionaries can make an unbounded traversal slow; callers with
    /// latency obligations should bound it.
    pub fn recognize_within(
        &self,
        query: &str,
        dictionary: &DictionaryAutomaton,
        budget: Option<usize>,
    ) -> Result<BTreeSet<String>, TraversalError> {
        let distance = self.distance();
        let sentinel = sentinel_for(dictionary);

        let mut padded: Vec<char> = Vec::with_capacity(distance as usize + query.chars().count());
        padded.extend(std::iter::repeat(sentinel).take(distance as usize));
        padded.extend(query.chars());

        let query_len = padded.len() - distance as usize;

        let mut matches = BTreeSet::new();

        // The traversal only reports words as it consumes their characters,
        // so the empty word needs no walk at all: it matches exactly when
        // deleting the whole query fits the budget.
        if dictionary.contains("") && query_len <= distance as usize {
            matches.insert(String::new());
        }

        let mut stack = vec![Frame {
            prefix: String::new(),
            dict: dictionary.root(),
            lev: self.root(),
            offset: 0,
        }];
        let mut steps = 0usize;

        while let Some(frame) = stack.pop() {
            for c in dictionary.alphabet() {
                if let Some(limit) = budget {
                    if steps >= limit {
                        return Err(TraversalError::BudgetExhausted { budget: limit });
                    }
                }
                steps += 1;

                let Some(dict_next) = dictionary.successor(frame.dict, c) else {
                    continue;
                };

                let suffix = &padded[frame.offset..];
                let vector = characteristic_vector(c, suffix, distance);
                let Some(lev_next) = self.successor(frame.lev, vector) else {
                    continue;
                };

                if dictionary.is_accept(dict_next) && self.is_accept(lev_next) {
                    let mut word = frame.prefix.clone();
                    word.push(c);
                    matches.insert(word);
                }

                let mut prefix = frame.prefix.clone();
                prefix.push(c);
                stack.push(Frame {
                    prefix,
                    dict: dict_next,
                    lev: lev_next,
                    offset: frame.offset + 1,
                });
            }
        }

        Ok(matches)
    }
}

/// Pick a padding character guaranteed absent from the dictionary alphabet.
fn sentinel_for(dictionary: &DictionaryAutomaton) -> char {
    (0u32..=char::MAX as u32)
        .filter_map(char::from_u32)
        .find(|&c| !dictionary.alphabet_contains(c))
        .expect("a finite alphabet cannot cover all of Unicode")
}
