//! Position states: the construction-time automaton states.
//!
//! A [`PositionState`] is a set of alignment [`Position`]s. Identity is
//! purely structural — two states holding the same positions are the same
//! state, no matter how they were produced — because the construction
//! deduplicates discovered states by value to keep the automaton finite.
//! Members are kept sorted and duplicate-free, so the derived `Eq` and
//! `Hash` over the ordered sequence are exactly set equality and a
//! collision-safe set hash (hashing the sorted sequence cannot cancel the
//! way XOR-folding per-member hashes can).

use smallvec::SmallVec;
use std::fmt;

use crate::universal::position::{Kind, Param, Position};

/// A set of alignment positions, compared and hashed by value.
///
/// Backed by a `SmallVec` kept in sorted order: states rarely exceed a
/// handful of positions, so the typical state lives entirely on the stack.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct PositionState {
    positions: SmallVec<[Position; 8]>,
}

impl PositionState {
    /// The empty state.
    pub fn new() -> Self {
        PositionState {
            positions: SmallVec::new(),
        }
    }

    /// The canonical start state `{I+0#0}`.
    pub fn start() -> Self {
        let mut state = Self::new();
        state.insert(Position::new(Param::I, Kind::Usual, 0, 0));
        state
    }

    /// Insert a position, keeping the set sorted and duplicate-free.
    pub fn insert(&mut self, position: Position) {
        if let Err(at) = self.positions.binary_search(&position) {
            self.positions.insert(at, position);
        }
    }

    /// Whether the set holds `position`.
    pub fn contains(&self, position: &Position) -> bool {
        self.positions.binary_search(position).is_ok()
    }

    /// Number of positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over the positions in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.positions.iter()
    }

    /// The smallest position under the total order, if any.
    pub fn first(&self) -> Option<&Position> {
        self.positions.first()
    }

    /// Whether this state is final for edit-distance bound `n`.
    ///
    /// A state is final when it contains a usual-kind near-end position
    /// whose spent errors plus the query characters still outstanding fit
    /// the budget: `error - index <= n` (indices of `M` positions are
    /// non-positive, so `-index` counts the trailing deletions needed to
    /// finish). Equivalently, some member equals or subsumes `M+0#n`.
    pub fn is_final(&self, n: u8) -> bool {
        self.positions.iter().any(|p| {
            p.param == Param::M
                && p.kind == Kind::Usual
                && i32::from(p.error) - p.index <= i32::from(n)
        })
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Position {
        self.positions[index]
    }

    pub(crate) fn remove_at(&mut self, index: usize) {
        self.positions.remove(index);
    }
}

impl FromIterator<Position> for PositionState {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut state = Self::new();
        for position in iter {
            state.insert(position);
        }
        state
    }
}

impl fmt::Display for PositionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, position) in self.positions.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{position}")?;
        }
        write!(f, "}}")
    }
}
