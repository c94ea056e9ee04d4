//! Roster store: every known worker and their per-worker flags.
//!
//! Pure data. Insertion order is preserved and doubles as the natural display
//! order of a group before its first shuffle.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Group, NewWorker, Worker, WorkerId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Worker>", into = "Vec<Worker>")]
pub struct Roster {
    workers: Vec<Worker>,
    /// `None` once the id space is used up.
    next_id: Option<WorkerId>,
}

impl Roster {
    pub fn new(workers: Vec<Worker>) -> Self {
        let next_id = match workers.iter().map(|w| w.id.0).max() {
            Some(max) => max.checked_add(1).map(WorkerId),
            None => Some(WorkerId(1)),
        };
        Self { workers, next_id }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// The id the next added worker will receive, if any is left.
    pub fn next_id(&self) -> Option<WorkerId> {
        self.next_id
    }

    pub fn get(&self, id: WorkerId) -> Result<&Worker> {
        self.workers
            .iter()
            .find(|w| w.id == id)
            .ok_or(Error::NotFound(id))
    }

    fn get_mut(&mut self, id: WorkerId) -> Result<&mut Worker> {
        self.workers
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(Error::NotFound(id))
    }

    /// All workers of a group, active or not, in insertion order.
    pub fn in_group(&self, group: Group) -> Vec<Worker> {
        self.workers
            .iter()
            .filter(|w| w.group == group)
            .cloned()
            .collect()
    }

    /// The group's workers taking breaks today, in insertion order.
    pub fn active_in(&self, group: Group) -> Vec<Worker> {
        self.workers
            .iter()
            .filter(|w| w.is_candidate_for(group))
            .cloned()
            .collect()
    }

    /// True if either group has someone to shuffle.
    pub fn has_active(&self) -> bool {
        self.workers.iter().any(|w| w.active_today)
    }

    /// Add a worker under the next free id.
    pub fn add(&mut self, new: NewWorker) -> Result<&Worker> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }

        let id = self.next_id.ok_or(Error::IdsExhausted)?;
        let worker = Worker {
            id,
            name: name.to_string(),
            group: new.group,
            active_today: new.active_today,
            locked: new.locked,
        };
        self.next_id = id.0.checked_add(1).map(WorkerId);
        self.workers.push(worker);
        Ok(&self.workers[self.workers.len() - 1])
    }

    /// Remove a worker. Their id is not handed out again.
    pub fn remove(&mut self, id: WorkerId) -> Result<Worker> {
        let index = self
            .workers
            .iter()
            .position(|w| w.id == id)
            .ok_or(Error::NotFound(id))?;
        Ok(self.workers.remove(index))
    }

    /// Flip the active-today flag. Returns the new value.
    pub fn toggle_active(&mut self, id: WorkerId) -> Result<bool> {
        let worker = self.get_mut(id)?;
        worker.active_today = !worker.active_today;
        Ok(worker.active_today)
    }

    /// Flip the lock flag. Returns the new value.
    pub fn toggle_lock(&mut self, id: WorkerId) -> Result<bool> {
        let worker = self.get_mut(id)?;
        worker.locked = !worker.locked;
        Ok(worker.locked)
    }

    /// Ids appear at most once. Loaded records failing this are discarded.
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.workers.len());
        self.workers.iter().all(|w| seen.insert(w.id))
    }

    /// False if the highest id leaves nothing to assign. Loaded records
    /// failing this are discarded.
    pub fn has_free_id(&self) -> bool {
        self.next_id.is_some()
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<Worker>> for Roster {
    fn from(workers: Vec<Worker>) -> Self {
        Self::new(workers)
    }
}

impl From<Roster> for Vec<Worker> {
    fn from(roster: Roster) -> Self {
        roster.workers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        let mut r = Roster::empty();
        r.add(NewWorker::new("Avi", Group::Technical)).unwrap();
        r.add(NewWorker::new("Miri", Group::Service)).unwrap();
        r.add(NewWorker::new("Chen", Group::Technical).active_today(false))
            .unwrap();
        r
    }

    #[test]
    fn ids_are_assigned_in_sequence() {
        let r = roster();
        let ids: Vec<u32> = r.workers().iter().map(|w| w.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(r.next_id(), Some(WorkerId(4)));
    }

    #[test]
    fn removed_top_id_is_not_reused() {
        let mut r = roster();
        r.remove(WorkerId(3)).unwrap();
        let added = r.add(NewWorker::new("Tamar", Group::Service)).unwrap();
        assert_eq!(added.id, WorkerId(4));
    }

    #[test]
    fn loaded_roster_continues_after_highest_id() {
        let mut r = Roster::new(vec![Worker {
            id: WorkerId(10),
            name: "Eretz".into(),
            group: Group::Service,
            active_today: true,
            locked: false,
        }]);
        assert_eq!(r.add(NewWorker::new("Merav", Group::Service)).unwrap().id, WorkerId(11));
    }

    fn worker(id: u32) -> Worker {
        Worker {
            id: WorkerId(id),
            name: format!("w{id}"),
            group: Group::Technical,
            active_today: true,
            locked: false,
        }
    }

    #[test]
    fn highest_possible_id_leaves_nothing_to_assign() {
        let mut r = Roster::new(vec![worker(1), worker(u32::MAX)]);
        assert!(!r.has_free_id());
        assert!(matches!(
            r.add(NewWorker::new("Tamar", Group::Service)),
            Err(Error::IdsExhausted)
        ));
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn last_id_is_assigned_once() {
        let mut r = Roster::new(vec![worker(u32::MAX - 1)]);
        let added = r.add(NewWorker::new("Tamar", Group::Service)).unwrap();
        assert_eq!(added.id, WorkerId(u32::MAX));
        assert!(r.add(NewWorker::new("Merav", Group::Service)).is_err());
        assert!(r.has_unique_ids());
    }

    #[test]
    fn blank_names_are_rejected() {
        let mut r = roster();
        assert!(matches!(
            r.add(NewWorker::new("   ", Group::Service)),
            Err(Error::EmptyName)
        ));
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn names_are_trimmed() {
        let mut r = Roster::empty();
        let w = r.add(NewWorker::new("  Daniel ", Group::Technical)).unwrap();
        assert_eq!(w.name, "Daniel");
    }

    #[test]
    fn active_in_filters_by_group_and_flag() {
        let r = roster();
        let tech = r.active_in(Group::Technical);
        assert_eq!(tech.len(), 1);
        assert_eq!(tech[0].name, "Avi");
        assert_eq!(r.in_group(Group::Technical).len(), 2);
    }

    #[test]
    fn toggles_flip_flags() {
        let mut r = roster();
        assert!(!r.toggle_active(WorkerId(1)).unwrap());
        assert!(r.toggle_lock(WorkerId(2)).unwrap());
        assert!(r.get(WorkerId(2)).unwrap().locked);
        assert!(matches!(r.toggle_lock(WorkerId(99)), Err(Error::NotFound(_))));
    }

    #[test]
    fn serializes_as_plain_worker_array() {
        let r = roster();
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 3);

        let back: Roster = serde_json::from_value(json).unwrap();
        assert_eq!(back.next_id(), Some(WorkerId(4)));
    }
}
