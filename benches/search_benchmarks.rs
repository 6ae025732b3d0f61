//! Construction and recognition benchmarks.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use levdict::prelude::*;

const WORDS: &[&str] = &[
    "apple", "apply", "ample", "maple", "orange", "grape", "grapes", "pear",
    "peach", "plum", "cat", "cats", "cart", "card", "care", "bat", "bath",
    "rat", "rate", "ratio", "dog", "dodge", "catalog", "catalyst", "banana",
    "bandana", "practical", "practice", "practise", "pragmatic", "stable",
    "stale", "table", "tables", "label", "labels", "level", "lever", "never",
    "sever",
];

fn construction(c: &mut Criterion) {
    c.bench_function("build_automaton_n1", |b| {
        b.iter(|| UniversalAutomaton::new(black_box(1)))
    });
    c.bench_function("build_automaton_n2", |b| {
        b.iter(|| UniversalAutomaton::new(black_box(2)))
    });
}

fn recognition(c: &mut Criterion) {
    let dict = DictionaryAutomaton::from_words(WORDS.iter().copied());
    let n1 = UniversalAutomaton::new(1);
    let n2 = UniversalAutomaton::new(2);

    c.bench_function("recognize_n1", |b| {
        b.iter(|| n1.recognize(black_box("aple"), &dict))
    });
    c.bench_function("recognize_n2", |b| {
        b.iter(|| n2.recognize(black_box("aple"), &dict))
    });
    c.bench_function("recognize_n1_miss", |b| {
        b.iter(|| n1.recognize(black_box("zzzzzz"), &dict))
    });
}

fn dictionary_build(c: &mut Criterion) {
    c.bench_function("build_dictionary", |b| {
        b.iter(|| DictionaryAutomaton::from_words(black_box(WORDS).iter().copied()))
    });
}

criterion_group!(benches, construction, recognition, dictionary_build);
criterion_main!(benches);
