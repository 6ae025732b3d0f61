//! Reference edit-distance computation.
//!
//! The automaton answers "within `n` edits" as a set membership question and
//! never reports individual distances. Callers that need the actual number,
//! and the cross-validation tests that check the automaton against an
//! independent implementation, use this plain dynamic-programming version.

/// Levenshtein distance between `a` and `b`: the minimum number of
/// single-character insertions, deletions and substitutions turning one
/// string into the other.
///
/// Iterative two-row dynamic programming over characters, O(|a|·|b|) time
/// and O(min(|a|, |b|)) space.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // Keep the row the length of the shorter string.
    let (long, short) = if a.len() >= b.len() { (&a, &b) } else { (&b, &a) };

    let mut row: Vec<usize> = (0..=short.len()).collect();
    for (i, &lc) in long.iter().enumerate() {
        let mut previous_diagonal = row[0];
        row[0] = i + 1;
        for (j, &sc) in short.iter().enumerate() {
            let substitution = previous_diagonal + usize::from(lc != sc);
            let insertion = row[j] + 1;
            let deletion = row[j + 1] + 1;
            previous_diagonal = row[j + 1];
            row[j + 1] = substitution.min(insertion).min(deletion);
        }
    }

    row[short.len()]
}
