//! Alignment positions for the universal Levenshtein automaton.
//!
//! A [`Position`] is one hypothesis about how an input string aligns against
//! a reference string: how far the alignment has progressed and how many
//! edits it has spent, expressed relative to an as-yet-unknown concrete
//! offset. Positions near the start of the string are parametrized by `I`,
//! positions within reach of the end by `M`; the construction re-expresses
//! sets of positions between the two forms as the automaton approaches the
//! string boundary.
//!
//! Besides the usual kind, two degenerate kinds exist for the extended
//! distance variants: `T` marks a half-completed transposition and `Ms` a
//! half-completed merge/split.

use std::fmt;

/// Which string boundary a position's index is measured from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Param {
    /// Mid-string form: index measured from the start.
    I,
    /// Near-end form: index measured from the end.
    M,
}

/// Position kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// Ordinary alignment position.
    Usual,
    /// Transposition in progress (χ = t variant only).
    T,
    /// Merge/split in progress (χ = ms variant only).
    Ms,
}

/// One alignment hypothesis: (parameter, kind, index, spent errors).
///
/// The derived order is the total order used throughout construction:
/// by parameter (`I` before `M`), then kind (`Usual` first), then index,
/// then error. Equality is exact tuple equality.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Boundary parameter.
    pub param: Param,
    /// Position kind.
    pub kind: Kind,
    /// Signed offset relative to the parameter.
    pub index: i32,
    /// Edits spent so far.
    pub error: u8,
}

impl Position {
    /// Construct a position.
    #[inline]
    pub fn new(param: Param, kind: Kind, index: i32, error: u8) -> Self {
        Position {
            param,
            kind,
            index,
            error,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let param = match self.param {
            Param::I => 'I',
            Param::M => 'M',
        };
        let kind = match self.kind {
            Kind::Usual => "",
            Kind::T => "t",
            Kind::Ms => "s",
        };
        write!(f, "{}+{}#{}{}", param, self.index, self.error, kind)
    }
}
