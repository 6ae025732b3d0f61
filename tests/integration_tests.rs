//! End-to-end recognition scenarios.

use std::collections::BTreeSet;

use levdict::prelude::*;

fn set(words: &[&str]) -> BTreeSet<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[test]
fn one_edit_finds_apple_but_not_apply() {
    let dict = DictionaryAutomaton::from_words(["apple", "orange", "apply"]);
    let automaton = UniversalAutomaton::new(1);

    // "aplle" is one substitution from "apple", two edits from "apply".
    assert_eq!(automaton.recognize("aplle", &dict), set(&["apple"]));
}

#[test]
fn one_edit_finds_cat_and_cats() {
    let dict = DictionaryAutomaton::from_words(["cat", "cats", "bat"]);
    let automaton = UniversalAutomaton::new(1);

    // "bat" is three edits from "cats" and stays out.
    assert_eq!(automaton.recognize("cats", &dict), set(&["cat", "cats"]));
}

#[test]
fn every_dictionary_word_recognizes_itself() {
    let words = ["apple", "orange", "apply", "cat", "cats", "a", "practical"];
    let dict = DictionaryAutomaton::from_words(words);

    for distance in 0..=2 {
        let automaton = UniversalAutomaton::new(distance);
        for word in words {
            assert!(
                automaton.recognize(word, &dict).contains(word),
                "distance {distance}, word {word}"
            );
        }
    }
}

#[test]
fn distance_zero_is_exact_membership() {
    let dict = DictionaryAutomaton::from_words(["cat", "cats", "bat"]);
    let automaton = UniversalAutomaton::new(0);

    assert_eq!(automaton.recognize("cat", &dict), set(&["cat"]));
    assert_eq!(automaton.recognize("cats", &dict), set(&["cats"]));
    assert_eq!(automaton.recognize("dog", &dict), set(&[]));
    assert_eq!(automaton.recognize("ca", &dict), set(&[]));
}

#[test]
fn empty_dictionary_always_yields_the_empty_set() {
    let dict = DictionaryAutomaton::from_words(Vec::<String>::new());
    for distance in 0..=2 {
        let automaton = UniversalAutomaton::new(distance);
        assert!(automaton.recognize("query", &dict).is_empty());
        assert!(automaton.recognize("", &dict).is_empty());
    }
}

#[test]
fn single_edits_of_each_kind_are_found() {
    let dict = DictionaryAutomaton::from_words(["hello"]);
    let automaton = UniversalAutomaton::new(1);

    // Substitution, deletion from the query, insertion into the query.
    assert_eq!(automaton.recognize("hallo", &dict), set(&["hello"]));
    assert_eq!(automaton.recognize("helloo", &dict), set(&["hello"]));
    assert_eq!(automaton.recognize("hell", &dict), set(&["hello"]));

    // Two edits stay out at bound 1.
    assert_eq!(automaton.recognize("hallp", &dict), set(&[]));
    assert_eq!(automaton.recognize("hel", &dict), set(&[]));
}

#[test]
fn wider_bounds_are_supersets_of_narrower_ones() {
    let dict = DictionaryAutomaton::from_words([
        "cat", "cats", "bat", "rat", "catalog", "dog", "cart",
    ]);
    let narrow = UniversalAutomaton::new(1);
    let wide = UniversalAutomaton::new(2);

    for query in ["cat", "cab", "car", "bats"] {
        let narrow_matches = narrow.recognize(query, &dict);
        let wide_matches = wide.recognize(query, &dict);
        assert!(
            narrow_matches.is_subset(&wide_matches),
            "query {query}: {narrow_matches:?} not within {wide_matches:?}"
        );
    }
}

#[test]
fn matches_agree_with_the_reference_distance() {
    let words = [
        "cat", "cats", "bat", "rat", "catalog", "dog", "cart", "apple", "apply",
        "ample", "maple", "orange", "",
    ];
    let dict = DictionaryAutomaton::from_words(words);

    for distance in 0..=2u8 {
        let automaton = UniversalAutomaton::new(distance);
        for query in ["cat", "aplle", "", "oranje", "maple", "xyz", "catz"] {
            let expected: BTreeSet<String> = words
                .iter()
                .filter(|w| levenshtein(query, w) <= distance as usize)
                .map(|w| w.to_string())
                .collect();
            assert_eq!(
                automaton.recognize(query, &dict),
                expected,
                "distance {distance}, query {query}"
            );
        }
    }
}

#[test]
fn multibyte_queries_and_words() {
    let dict = DictionaryAutomaton::from_words(["naïve", "nave", "navel"]);
    let automaton = UniversalAutomaton::new(1);

    // 'ï' versus 'i' is a single substitution.
    assert_eq!(
        automaton.recognize("naive", &dict),
        set(&["naïve", "nave"])
    );
}

#[test]
fn empty_word_in_the_dictionary() {
    let dict = DictionaryAutomaton::from_words(["", "a", "ab"]);
    let automaton = UniversalAutomaton::new(1);

    // The empty query is within one edit of "" and "a".
    assert_eq!(automaton.recognize("", &dict), set(&["", "a"]));
    // "b" is one substitution from "a", one insertion from "".
    assert_eq!(automaton.recognize("b", &dict), set(&["", "a", "ab"]));
}

#[test]
fn recognize_does_not_mutate_its_inputs() {
    let dict = DictionaryAutomaton::from_words(["stable", "stale"]);
    let automaton = UniversalAutomaton::new(1);

    let first = automaton.recognize("stale", &dict);
    let second = automaton.recognize("stale", &dict);
    assert_eq!(first, second);
    assert_eq!(dict.len(), 2);
}
