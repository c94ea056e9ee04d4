//! Shuffle engine. Randomizes a break order around locked entries.
//!
//! The engine is a pure function of its inputs and one random source. It
//! never logs, never fails, and never looks at the roster: the caller hands
//! it the previous order (empty if none) and the group's active workers.

use rand::Rng;

use crate::model::Worker;
use crate::order::BreakOrder;

/// Unbiased in-place Fisher-Yates shuffle.
///
/// Walks from the last index down to 1, swapping each element with one drawn
/// uniformly from `[0, i]`.
pub fn fisher_yates<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffle using the thread-local RNG. See [`shuffle_with`].
pub fn shuffle(previous: &BreakOrder, candidates: &[Worker]) -> BreakOrder {
    shuffle_with(previous, candidates, &mut rand::thread_rng())
}

/// Produce a new order for one group.
///
/// The positional reference is `previous` when it is non-empty, otherwise
/// `candidates` in the order given. Every locked entry of the reference stays
/// at its index; the unlocked entries are permuted uniformly among the
/// remaining slots, filled in ascending index order. With nothing locked this
/// is a plain uniform permutation; with everything locked the reference comes
/// back unchanged.
///
/// Precondition: a non-empty `previous` holds exactly the workers in
/// `candidates`. Stale orders must be cleared by the caller first.
pub fn shuffle_with<R: Rng + ?Sized>(
    previous: &BreakOrder,
    candidates: &[Worker],
    rng: &mut R,
) -> BreakOrder {
    debug_assert!(
        !previous.is_stale(candidates),
        "previous order does not match the candidate set"
    );

    let reference = if previous.is_empty() {
        candidates
    } else {
        previous.entries()
    };

    BreakOrder::from(shuffle_around_locks(reference, rng))
}

fn shuffle_around_locks<R: Rng + ?Sized>(reference: &[Worker], rng: &mut R) -> Vec<Worker> {
    let mut pool: Vec<Worker> = reference.iter().filter(|w| !w.locked).cloned().collect();
    if pool.is_empty() {
        return reference.to_vec();
    }
    fisher_yates(&mut pool, rng);

    let mut result = reference.to_vec();
    let open_slots = result.iter_mut().filter(|slot| !slot.locked);
    for (slot, worker) in open_slots.zip(pool) {
        *slot = worker;
    }
    result
}
