//! Span helpers for shuffles and manual edits.

use tracing::Span;

use crate::model::Group;

/// Start a span for one shuffle of a group's order.
///
/// `order.reference` is declared empty and filled in by the board once it
/// knows whether the previous order or the candidate list is the reference.
pub fn start_shuffle_span(group: Group, len: usize, locked: usize) -> Span {
    tracing::info_span!(
        "order.shuffle",
        "order.group" = %group,
        "order.len" = len,
        "order.locked" = locked,
        "order.reference" = tracing::field::Empty,
    )
}

/// Record an accepted or rejected manual move.
pub fn record_move(group: Group, from: usize, to: usize, accepted: bool) {
    tracing::debug!(%group, from, to, accepted, "order.move");
}
