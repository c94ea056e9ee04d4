//! Break order for one group.
//!
//! An empty order means "not shuffled yet"; callers fall back to the roster's
//! insertion order for display. Entries are worker snapshots, so the `locked`
//! flag read by the engine is the one on the entry, kept in sync by the board.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Worker, WorkerId};

/// The displayed break sequence of one group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakOrder {
    entries: Vec<Worker>,
}

/// Direction of a single-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl BreakOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[Worker] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Worker> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<WorkerId> {
        self.entries.iter().map(|w| w.id).collect()
    }

    pub fn get(&self, index: usize) -> Option<&Worker> {
        self.entries.get(index)
    }

    pub fn position(&self, id: WorkerId) -> Option<usize> {
        self.entries.iter().position(|w| w.id == id)
    }

    pub fn contains(&self, id: WorkerId) -> bool {
        self.position(id).is_some()
    }

    pub fn locked_count(&self) -> usize {
        self.entries.iter().filter(|w| w.locked).count()
    }

    /// Swap the entries at `from` and `to`.
    ///
    /// Rejected, leaving the order untouched, when either index is out of
    /// range or either entry is locked. Serves both drag-and-drop and the
    /// step buttons.
    pub fn move_adjacent(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.entries.len();
        for index in [from, to] {
            if index >= len {
                return Err(Error::IndexOutOfRange { index, len });
            }
        }
        for index in [from, to] {
            if self.entries[index].locked {
                return Err(Error::Locked { index });
            }
        }
        self.entries.swap(from, to);
        Ok(())
    }

    /// Move the entry at `index` one place up or down. Returns its new index.
    pub fn step(&mut self, index: usize, direction: Direction) -> Result<usize> {
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => index.checked_add(1).filter(|&t| t < self.entries.len()),
        }
        .ok_or(Error::IndexOutOfRange {
            index,
            len: self.entries.len(),
        })?;
        self.move_adjacent(index, target)?;
        Ok(target)
    }

    /// Set the lock flag on the entry for `id`. Returns false if absent.
    /// The entry does not move.
    pub fn set_locked(&mut self, id: WorkerId, locked: bool) -> bool {
        match self.entries.iter_mut().find(|w| w.id == id) {
            Some(entry) => {
                entry.locked = locked;
                true
            }
            None => false,
        }
    }

    /// Append a worker at the end of the order.
    pub fn push(&mut self, worker: Worker) {
        self.entries.push(worker);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// True if this order no longer covers exactly `candidates`.
    ///
    /// An empty order is never stale. A stale order must be cleared before it
    /// is handed to the engine.
    pub fn is_stale(&self, candidates: &[Worker]) -> bool {
        if self.entries.is_empty() {
            return false;
        }
        if self.entries.len() != candidates.len() {
            return true;
        }
        let eligible: HashSet<WorkerId> = candidates.iter().map(|w| w.id).collect();
        let mut seen = HashSet::with_capacity(self.entries.len());
        !self
            .entries
            .iter()
            .all(|w| eligible.contains(&w.id) && seen.insert(w.id))
    }
}

impl From<Vec<Worker>> for BreakOrder {
    fn from(entries: Vec<Worker>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a BreakOrder {
    type Item = &'a Worker;
    type IntoIter = std::slice::Iter<'a, Worker>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Group;

    fn worker(id: u32, locked: bool) -> Worker {
        Worker {
            id: WorkerId(id),
            name: format!("w{id}"),
            group: Group::Technical,
            active_today: true,
            locked,
        }
    }

    fn order(entries: &[(u32, bool)]) -> BreakOrder {
        entries.iter().map(|&(id, l)| worker(id, l)).collect::<Vec<_>>().into()
    }

    #[test]
    fn move_swaps_unlocked_entries() {
        let mut o = order(&[(1, false), (2, false), (3, false)]);
        o.move_adjacent(0, 2).unwrap();
        assert_eq!(o.ids(), vec![WorkerId(3), WorkerId(2), WorkerId(1)]);
    }

    #[test]
    fn move_touching_locked_entry_is_rejected() {
        let mut o = order(&[(1, true), (2, false), (3, false)]);
        let before = o.clone();

        assert!(matches!(o.move_adjacent(0, 1), Err(Error::Locked { index: 0 })));
        assert!(matches!(o.move_adjacent(1, 0), Err(Error::Locked { index: 0 })));
        assert_eq!(o, before);
    }

    #[test]
    fn move_out_of_range_is_rejected() {
        let mut o = order(&[(1, false), (2, false)]);
        assert!(matches!(
            o.move_adjacent(1, 5),
            Err(Error::IndexOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn step_moves_one_place() {
        let mut o = order(&[(1, false), (2, false), (3, false)]);
        assert_eq!(o.step(1, Direction::Up).unwrap(), 0);
        assert_eq!(o.ids(), vec![WorkerId(2), WorkerId(1), WorkerId(3)]);
        assert_eq!(o.step(1, Direction::Down).unwrap(), 2);
        assert_eq!(o.ids(), vec![WorkerId(2), WorkerId(3), WorkerId(1)]);
    }

    #[test]
    fn step_past_either_end_is_rejected() {
        let mut o = order(&[(1, false), (2, false)]);
        assert!(o.step(0, Direction::Up).is_err());
        assert!(o.step(1, Direction::Down).is_err());
        assert_eq!(o.ids(), vec![WorkerId(1), WorkerId(2)]);
    }

    #[test]
    fn set_locked_does_not_move_entry() {
        let mut o = order(&[(1, false), (2, false)]);
        assert!(o.set_locked(WorkerId(2), true));
        assert_eq!(o.position(WorkerId(2)), Some(1));
        assert!(o.get(1).unwrap().locked);
        assert!(!o.set_locked(WorkerId(9), true));
    }

    #[test]
    fn staleness_tracks_candidate_set() {
        let o = order(&[(1, false), (2, false)]);
        assert!(!o.is_stale(&[worker(2, false), worker(1, false)]));
        assert!(o.is_stale(&[worker(1, false)]));
        assert!(o.is_stale(&[worker(1, false), worker(3, false)]));
        assert!(!BreakOrder::new().is_stale(&[worker(1, false)]));
    }
}
