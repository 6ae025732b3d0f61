//! The position-set algebra driving automaton construction.
//!
//! Everything here is pure value manipulation: given an edit-distance bound
//! `n`, a set of alignment positions and a characteristic bit vector, compute
//! the successor set. The construction in [`super::automaton`] is nothing but
//! a breadth-first closure over [`delta`].
//!
//! The moving parts:
//!
//! - [`boundary_window`] extracts the sub-window of a bit vector one position
//!   is allowed to look at, bounded by its remaining error budget and by its
//!   distance from either string boundary.
//! - [`advance`] maps one windowed position to its successor candidates:
//!   plain advancement for χ = ε, plus the transposition (χ = t) and
//!   merge/split (χ = ms) variants.
//! - [`delta`] unions the per-position successors under mutual subsumption
//!   filtering, then re-expresses the whole set between the mid-string (`I`)
//!   and near-end (`M`) forms when the rightmost usual position signals the
//!   string boundary is within reach.
//! - [`covers_all_positions`] decides which vector lengths carry enough
//!   information to resolve a state's transitions unambiguously.

use smallvec::{smallvec, SmallVec};

use crate::universal::bit_vector::BitVector;
use crate::universal::position::{Kind, Param, Position};
use crate::universal::state::PositionState;
use crate::universal::subsumption::subsumes;

/// Distance variant selector for the advancement rules.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum ChiMode {
    /// Plain Levenshtein: insertion, deletion, substitution.
    #[default]
    Epsilon,
    /// Additionally treats adjacent transposition as one edit.
    T,
    /// Additionally treats merge (2→1) and split (1→2) as one edit.
    Ms,
}

/// A position stripped of its boundary parameter: (kind, index, error).
///
/// [`advance`] works in this parameter-free form; [`advance_one`] reattaches
/// the parameter and reindexes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Point {
    pub kind: Kind,
    pub index: i32,
    pub error: u8,
}

type Points = SmallVec<[Point; 4]>;

#[inline]
fn usual(index: i32, error: u8) -> Point {
    Point {
        kind: Kind::Usual,
        index,
        error,
    }
}

/// Extract the sub-window of `b` relevant to `pos`.
///
/// The window length is bounded by the remaining error budget
/// (`n - error + 1`) and by how far the position sits from the string
/// boundary its parameter is measured against. Out-of-range windows mean the
/// caller skipped the coverage check; that is an algorithmic bug, so this
/// fails loudly rather than clamping.
pub fn boundary_window(n: u8, pos: &Position, b: BitVector) -> BitVector {
    let n = i32::from(n);
    let budget = n - i32::from(pos.error) + 1;
    let (start, span) = match pos.param {
        Param::I => (n + pos.index, budget.min(b.len() as i32 - n - pos.index)),
        Param::M => (b.len() as i32 + pos.index, budget.min(-pos.index)),
    };

    assert!(
        span >= 0 && start >= 0 && start + span <= b.len() as i32,
        "boundary window [{start}, {start}+{span}) out of range for {pos} over {b}"
    );

    let start = start as usize;
    BitVector::from_fn(span as usize, |i| b.get(start + i))
}

/// Successor candidates of one windowed point.
///
/// χ = ε case analysis: an empty window only allows spending an edit in
/// place; a leading match bit advances for free; otherwise one edit buys
/// staying put (insertion) or stepping past (substitution), and a match
/// further into the window at offset `j` buys the run-of-deletions candidate
/// `(index + j + 1, error + j)`.
pub(crate) fn advance(chi: ChiMode, n: u8, point: Point, window: BitVector) -> Points {
    let Point { kind, index: i, error: e } = point;

    match chi {
        ChiMode::Epsilon => {
            if window.is_empty() {
                return if e < n { smallvec![usual(i, e + 1)] } else { Points::new() };
            }
            if window.get(0) {
                return smallvec![usual(i + 1, e)];
            }
            if window.len() == 1 {
                return if e < n {
                    smallvec![usual(i, e + 1), usual(i + 1, e + 1)]
                } else {
                    Points::new()
                };
            }
            match window.first_set_from(1) {
                None => smallvec![usual(i, e + 1), usual(i + 1, e + 1)],
                Some(j) => smallvec![
                    usual(i, e + 1),
                    usual(i + 1, e + 1),
                    usual(i + j as i32 + 1, e + j as u8),
                ],
            }
        }

        ChiMode::T => {
            // A pending transposition either completes on a match of the
            // swapped-in character or dies.
            if kind == Kind::T {
                return if window.get(0) {
                    smallvec![usual(i + 2, e)]
                } else {
                    Points::new()
                };
            }
            if window.is_empty() {
                return if e < n { smallvec![usual(i, e + 1)] } else { Points::new() };
            }
            if window.get(0) {
                return smallvec![usual(i + 1, e)];
            }
            if window.len() == 1 {
                return if e < n {
                    smallvec![usual(i, e + 1), usual(i + 1, e + 1)]
                } else {
                    Points::new()
                };
            }
            if window.get(1) {
                // The next character matches here: open a transposition
                // alongside the plain one-edit candidates.
                return smallvec![
                    usual(i, e + 1),
                    usual(i + 1, e + 1),
                    usual(i + 2, e + 1),
                    Point { kind: Kind::T, index: i, error: e + 1 },
                ];
            }
            match window.first_set_from(1) {
                None => smallvec![usual(i, e + 1), usual(i + 1, e + 1)],
                Some(j) => smallvec![
                    usual(i, e + 1),
                    usual(i + 1, e + 1),
                    usual(i + j as i32 + 1, e + j as u8),
                ],
            }
        }

        ChiMode::Ms => {
            // A pending split emits its second half unconditionally.
            if kind == Kind::Ms {
                return smallvec![usual(i + 1, e)];
            }
            if window.is_empty() {
                return if e < n { smallvec![usual(i, e + 1)] } else { Points::new() };
            }
            if window.get(0) {
                return smallvec![usual(i + 1, e)];
            }
            if window.len() == 1 {
                return if e < n {
                    smallvec![
                        usual(i, e + 1),
                        usual(i + 1, e + 1),
                        Point { kind: Kind::Ms, index: i, error: e + 1 },
                    ]
                } else {
                    Points::new()
                };
            }
            smallvec![
                usual(i, e + 1),
                usual(i + 1, e + 1),
                usual(i + 2, e + 1),
                Point { kind: Kind::Ms, index: i, error: e + 1 },
            ]
        }
    }
}

/// Advance one absolute position over `b`: window it, run the kernel, and
/// reattach the boundary parameter. Mid-string (`I`) results shift their
/// index down by one because the kernel counts the consumed character.
pub fn advance_one(chi: ChiMode, n: u8, pos: &Position, b: BitVector) -> SmallVec<[Position; 4]> {
    let window = boundary_window(n, pos, b);
    let points = advance(
        chi,
        n,
        Point {
            kind: pos.kind,
            index: pos.index,
            error: pos.error,
        },
        window,
    );

    points
        .into_iter()
        .map(|pt| match pos.param {
            Param::I => Position::new(Param::I, pt.kind, pt.index - 1, pt.error),
            Param::M => Position::new(Param::M, pt.kind, pt.index, pt.error),
        })
        .collect()
}

/// The state transition function: union of [`advance_one`] over all members,
/// filtered by mutual subsumption, then boundary-normalized.
///
/// A candidate subsumed by a kept position is dropped; a candidate that
/// subsumes kept positions evicts them. An empty result means the transition
/// is undefined (the search branch dies).
pub fn delta(chi: ChiMode, n: u8, state: &PositionState, b: BitVector) -> PositionState {
    let mut next = PositionState::new();

    for q in state.iter() {
        for pi in advance_one(chi, n, q, b) {
            let mut add = true;
            let mut i = 0;
            while i < next.len() {
                let kept = next.get(i);
                if subsumes(&pi, &kept) {
                    next.remove_at(i);
                    continue;
                }
                if kept == pi || subsumes(&kept, &pi) {
                    add = false;
                    break;
                }
                i += 1;
            }
            if add {
                next.insert(pi);
            }
        }
    }

    if crosses_boundary(n, rightmost_usual(&next).as_ref(), b.len()) {
        next = to_boundary_form(n, &next, b.len());
    }

    next
}

/// The rightmost usual-kind position by `index - error`, the set's furthest
/// advanced hypothesis.
pub(crate) fn rightmost_usual(state: &PositionState) -> Option<Position> {
    let mut rm = None;
    for p in state.iter() {
        if p.kind == Kind::Usual {
            rm = Some(*p);
        }
    }
    if let Some(mut best) = rm {
        for p in state.iter() {
            if p.kind == Kind::Usual
                && (p.index - i32::from(p.error)) > (best.index - i32::from(best.error))
            {
                best = *p;
            }
        }
        rm = Some(best);
    }
    rm
}

/// Whether the rightmost position signals that the automaton is now within
/// reach of the string's end (for `I`) or has overshot it (for `M`), so the
/// whole set must switch representation.
pub(crate) fn crosses_boundary(n: u8, rm: Option<&Position>, len: usize) -> bool {
    let Some(p) = rm else { return false };
    let n = i32::from(n);
    let len = len as i32;
    match p.param {
        Param::I => len <= 2 * n + 1 && i32::from(p.error) <= p.index + 2 * n + 1 - len,
        Param::M => i32::from(p.error) > p.index + n,
    }
}

/// Re-express every position, flipping between the mid-string and near-end
/// parametrizations relative to a vector of length `len`.
pub(crate) fn to_boundary_form(n: u8, state: &PositionState, len: usize) -> PositionState {
    let n = i32::from(n);
    let len = len as i32;
    state
        .iter()
        .map(|p| match p.param {
            Param::I => Position::new(Param::M, p.kind, p.index + n + 1 - len, p.error),
            Param::M => Position::new(Param::I, p.kind, p.index - n - 1 + len, p.error),
        })
        .collect()
}

/// Whether a vector of length `len` carries enough context to resolve all of
/// `state`'s transitions unambiguously.
///
/// Mid-string states need the full lookahead their positions can consume;
/// near-end states accept shorter vectors once every member is dominated by
/// the canonical end-of-string position for that length.
pub fn covers_all_positions(n: u8, len: usize, state: &PositionState) -> bool {
    let first = state
        .first()
        .expect("coverage check requires a non-empty position state");
    let n = i32::from(n);
    let len = len as i32;

    match first.param {
        Param::I => {
            if *state == PositionState::start() {
                len >= first.index + n
            } else {
                state
                    .iter()
                    .all(|p| len >= 2 * n + p.index - i32::from(p.error) + 1)
            }
        }
        Param::M => {
            let q = if len < n {
                Position::new(Param::M, Kind::Usual, 0, (n - len) as u8)
            } else {
                Position::new(Param::M, Kind::Usual, n - len, 0)
            };
            state.iter().all(|p| *p == q || subsumes(&q, p))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(param: Param, kind: Kind, index: i32, error: u8) -> Position {
        Position::new(param, kind, index, error)
    }

    fn bits(s: &str) -> BitVector {
        BitVector::from_fn(s.len(), |i| s.as_bytes()[i] == b'1')
    }

    // ------------------------------------------------------------------
    // boundary_window
    // ------------------------------------------------------------------

    #[test]
    fn window_for_the_origin_position() {
        // n = 1, I+0#0 over a full-length vector: two bits starting at n.
        let w = boundary_window(1, &pos(Param::I, Kind::Usual, 0, 0), bits("0100"));
        assert_eq!(w.to_string(), "10");
    }

    #[test]
    fn window_shrinks_with_spent_error() {
        // n = 2, I+0#2: budget n - e + 1 = 1 bit.
        let w = boundary_window(2, &pos(Param::I, Kind::Usual, 0, 2), bits("001000"));
        assert_eq!(w.to_string(), "1");
    }

    #[test]
    fn window_for_near_end_positions_reads_the_tail() {
        // n = 1, M+-2#0 over a length-3 vector: starts at len + index = 1.
        let w = boundary_window(1, &pos(Param::M, Kind::Usual, -2, 0), bits("011"));
        assert_eq!(w.to_string(), "11");
    }

    #[test]
    fn window_at_the_exact_end_is_empty() {
        let w = boundary_window(1, &pos(Param::M, Kind::Usual, 0, 0), bits("1"));
        assert!(w.is_empty());
    }

    // ------------------------------------------------------------------
    // advance (χ = ε kernel)
    // ------------------------------------------------------------------

    #[test]
    fn empty_window_spends_an_edit_or_dies() {
        let alive = advance(ChiMode::Epsilon, 2, usual(0, 1), bits(""));
        assert_eq!(alive.as_slice(), &[usual(0, 2)]);

        let dead = advance(ChiMode::Epsilon, 2, usual(0, 2), bits(""));
        assert!(dead.is_empty());
    }

    #[test]
    fn leading_match_advances_for_free() {
        let next = advance(ChiMode::Epsilon, 2, usual(0, 1), bits("10"));
        assert_eq!(next.as_slice(), &[usual(1, 1)]);
    }

    #[test]
    fn no_match_buys_insertion_or_substitution() {
        let next = advance(ChiMode::Epsilon, 2, usual(0, 0), bits("000"));
        assert_eq!(next.as_slice(), &[usual(0, 1), usual(1, 1)]);
    }

    #[test]
    fn later_match_adds_the_deletion_run_candidate() {
        // First set bit at offset 2: candidate (index + 3, error + 2).
        let next = advance(ChiMode::Epsilon, 2, usual(0, 0), bits("001"));
        assert_eq!(
            next.as_slice(),
            &[usual(0, 1), usual(1, 1), usual(3, 2)]
        );
    }

    #[test]
    fn transposition_kind_completes_only_on_match() {
        let t_point = Point { kind: Kind::T, index: 0, error: 1 };
        let done = advance(ChiMode::T, 2, t_point, bits("10"));
        assert_eq!(done.as_slice(), &[usual(2, 1)]);

        let dead = advance(ChiMode::T, 2, t_point, bits("01"));
        assert!(dead.is_empty());
    }

    #[test]
    fn transposition_opens_on_a_next_character_match() {
        let next = advance(ChiMode::T, 2, usual(0, 0), bits("010"));
        assert_eq!(
            next.as_slice(),
            &[
                usual(0, 1),
                usual(1, 1),
                usual(2, 1),
                Point { kind: Kind::T, index: 0, error: 1 },
            ]
        );
    }

    #[test]
    fn split_kind_emits_its_second_half() {
        let ms_point = Point { kind: Kind::Ms, index: 3, error: 1 };
        let next = advance(ChiMode::Ms, 2, ms_point, bits("00"));
        assert_eq!(next.as_slice(), &[usual(4, 1)]);
    }

    // ------------------------------------------------------------------
    // delta and boundary normalization, hand-traced for n = 1
    // ------------------------------------------------------------------

    #[test]
    fn mid_string_match_loops_on_the_start_state() {
        let start = PositionState::start();
        let next = delta(ChiMode::Epsilon, 1, &start, bits("0100"));
        assert_eq!(next, start);
    }

    #[test]
    fn mid_string_mismatch_forks_the_hypotheses() {
        let start = PositionState::start();
        let next = delta(ChiMode::Epsilon, 1, &start, bits("0000"));

        let expected: PositionState = [
            pos(Param::I, Kind::Usual, -1, 1),
            pos(Param::I, Kind::Usual, 0, 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(next, expected);
    }

    #[test]
    fn short_vector_flips_into_the_near_end_form() {
        // A length-1 vector near the end of the string: the surviving
        // hypothesis is re-expressed relative to the end.
        let start = PositionState::start();
        let next = delta(ChiMode::Epsilon, 1, &start, bits("0"));

        let expected: PositionState =
            [pos(Param::M, Kind::Usual, 0, 1)].into_iter().collect();
        assert_eq!(next, expected);
    }

    #[test]
    fn exhausted_budget_kills_a_branch() {
        // I+-1#1 at n = 1 sees a one-bit mismatch window and has no error
        // budget left; only I+0#1's free match survives.
        let state: PositionState = [
            pos(Param::I, Kind::Usual, -1, 1),
            pos(Param::I, Kind::Usual, 0, 1),
        ]
        .into_iter()
        .collect();

        let next = delta(ChiMode::Epsilon, 1, &state, bits("0100"));
        assert_eq!(
            next,
            [pos(Param::I, Kind::Usual, 0, 1)].into_iter().collect()
        );
    }

    #[test]
    fn dominating_candidate_evicts_kept_ones() {
        // n = 2 over "001000": I+-1#1 contributes {I+-2#2, I+-1#2, I+0#2},
        // then I+0#1's free match I+0#1 subsumes the latter two.
        let state: PositionState = [
            pos(Param::I, Kind::Usual, -1, 1),
            pos(Param::I, Kind::Usual, 0, 1),
        ]
        .into_iter()
        .collect();

        let next = delta(ChiMode::Epsilon, 2, &state, bits("001000"));

        let expected: PositionState = [
            pos(Param::I, Kind::Usual, -2, 2),
            pos(Param::I, Kind::Usual, 0, 1),
        ]
        .into_iter()
        .collect();
        assert_eq!(next, expected);
    }

    // ------------------------------------------------------------------
    // rightmost_usual / crosses_boundary
    // ------------------------------------------------------------------

    #[test]
    fn rightmost_is_by_index_minus_error() {
        let state: PositionState = [
            pos(Param::I, Kind::Usual, -1, 0),
            pos(Param::I, Kind::Usual, 1, 1),
        ]
        .into_iter()
        .collect();
        // -1 - 0 = -1 versus 1 - 1 = 0.
        assert_eq!(
            rightmost_usual(&state),
            Some(pos(Param::I, Kind::Usual, 1, 1))
        );

        assert_eq!(rightmost_usual(&PositionState::new()), None);
    }

    #[test]
    fn no_rightmost_means_no_crossing() {
        assert!(!crosses_boundary(1, None, 3));
    }

    // ------------------------------------------------------------------
    // covers_all_positions
    // ------------------------------------------------------------------

    #[test]
    fn start_state_covers_lengths_down_to_n() {
        let start = PositionState::start();
        for len in 0..=4 {
            assert_eq!(covers_all_positions(1, len, &start), len >= 1, "len {len}");
        }
    }

    #[test]
    fn mid_string_states_need_full_lookahead() {
        let state: PositionState = [
            pos(Param::I, Kind::Usual, -1, 1),
            pos(Param::I, Kind::Usual, 0, 1),
        ]
        .into_iter()
        .collect();
        // Worst member: 2n + index - error + 1 = 2 + 0 - 1 + 1 = 2.
        assert!(!covers_all_positions(1, 1, &state));
        assert!(covers_all_positions(1, 2, &state));
        assert!(covers_all_positions(1, 4, &state));
    }

    #[test]
    fn near_end_states_accept_dominated_lengths_only() {
        let sink: PositionState =
            [pos(Param::M, Kind::Usual, 0, 1)].into_iter().collect();
        // q for len 0 is M+0#1 itself; for len 1, M+0#0 dominates it.
        assert!(covers_all_positions(1, 0, &sink));
        assert!(covers_all_positions(1, 1, &sink));

        let exact: PositionState =
            [pos(Param::M, Kind::Usual, 0, 0)].into_iter().collect();
        // len 0 would need M+0#1, which neither equals nor subsumes M+0#0.
        assert!(!covers_all_positions(1, 0, &exact));
        assert!(covers_all_positions(1, 1, &exact));
    }
}
