//! Trie-shaped dictionary automaton.
//!
//! A [`DictionaryAutomaton`] holds a fixed word list as a character trie:
//! one path per word, the word itself as the terminal payload. Alongside the
//! trie it tracks the dictionary's alphabet (the distinct characters across
//! all words) in sorted order, so that traversals enumerating the alphabet
//! are deterministic and reproducible.
//!
//! The automaton is immutable after construction: build it once from the
//! word list, query it forever.

use std::collections::BTreeSet;

use crate::automaton::{Automaton, StateId};

/// Immutable trie over a fixed dictionary of words.
#[derive(Clone, Debug)]
pub struct DictionaryAutomaton {
    trie: Automaton<char, String>,
    alphabet: BTreeSet<char>,
    word_count: usize,
}

impl DictionaryAutomaton {
    /// Build a dictionary automaton from a finite word list.
    ///
    /// Each word becomes one trie path with the word as its terminal
    /// payload; duplicate words collapse to a single entry. The alphabet is
    /// collected as the sorted union of characters over all words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut trie = Automaton::new();
        let mut alphabet = BTreeSet::new();
        let mut word_count = 0;

        for word in words {
            let word = word.into();
            alphabet.extend(word.chars());

            let path: Vec<char> = word.chars().collect();
            if trie.insert_path(path, word).is_none() {
                word_count += 1;
            }
        }

        DictionaryAutomaton {
            trie,
            alphabet,
            word_count,
        }
    }

    /// Whether `word` is in the dictionary.
    ///
    /// Walks the trie one character at a time; a missing successor or a
    /// non-accepting final state means the word is absent.
    pub fn contains(&self, word: &str) -> bool {
        let mut node = self.trie.root();
        for c in word.chars() {
            match self.trie.successor(node, &c) {
                Some(next) => node = next,
                None => return false,
            }
        }
        self.trie.is_accept(node)
    }

    /// The dictionary's alphabet, in sorted order.
    pub fn alphabet(&self) -> impl Iterator<Item = char> + '_ {
        self.alphabet.iter().copied()
    }

    /// Whether `c` occurs in any dictionary word.
    #[inline]
    pub fn alphabet_contains(&self, c: char) -> bool {
        self.alphabet.contains(&c)
    }

    /// Number of distinct words.
    #[inline]
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Whether the dictionary holds no words.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Number of trie states, root included.
    #[inline]
    pub fn state_count(&self) -> usize {
        self.trie.state_count()
    }

    /// Collect every word in the dictionary, in sorted order.
    pub fn words(&self) -> Vec<String> {
        let mut words = Vec::with_capacity(self.word_count);
        let mut stack = vec![self.trie.root()];
        while let Some(node) = stack.pop() {
            if let Some(word) = self.trie.element(node) {
                words.push(word.clone());
            }
            stack.extend(self.trie.edges(node).map(|(_, to)| to));
        }
        words.sort_unstable();
        words
    }

    #[inline]
    pub(crate) fn root(&self) -> StateId {
        self.trie.root()
    }

    #[inline]
    pub(crate) fn successor(&self, from: StateId, c: char) -> Option<StateId> {
        self.trie.successor(from, &c)
    }

    #[inline]
    pub(crate) fn is_accept(&self, id: StateId) -> bool {
        self.trie.is_accept(id)
    }
}
