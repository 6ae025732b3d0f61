//! Subsumption relation on alignment positions.
//!
//! Position `p` subsumes position `q` when every string accepted through `q`
//! is also accepted through `p`: `p` has spent strictly fewer edits and sits
//! close enough that the spare error budget covers the index gap. Subsumed
//! positions carry no information and are discarded during construction,
//! which is what keeps position states — and therefore the automaton —
//! minimal.

use crate::universal::position::{Kind, Position};

/// Whether `p` subsumes `q`.
///
/// Requires `p` to be of the usual kind with strictly lower error than `q`,
/// and the index gap to fit within the error difference. A `q` of kind `T`
/// sits one character behind where its index says, hence the +1 correction.
pub fn subsumes(p: &Position, q: &Position) -> bool {
    if p.kind != Kind::Usual || q.error <= p.error {
        return false;
    }

    let gap = if q.kind == Kind::T {
        q.index + 1 - p.index
    } else {
        q.index - p.index
    };

    gap.unsigned_abs() <= u32::from(q.error - p.error)
}
