//! The board: roster, one break order per group, and the edit affordance.
//!
//! The board owns the storage and is the only writer of roster and order
//! state. It keeps every order consistent with the roster, so the engine's
//! precondition (previous order covers exactly the active workers) holds on
//! every shuffle.

use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::{Config, RosterPolicy};
use crate::defaults::{builtin_roster, load_roster_file};
use crate::engine;
use crate::error::{Error, Result};
use crate::export::{BreakPeriod, format_for_whatsapp};
use crate::model::{Group, NewWorker, Worker, WorkerId};
use crate::order::{BreakOrder, Direction};
use crate::roster::Roster;
use crate::storage::Storage;
use crate::telemetry::shuffle::{record_move, start_shuffle_span};

/// Whether a group's order is read-only or open for manual edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Viewing,
    Editing,
}

#[derive(Debug, Clone, Default)]
struct GroupState {
    order: BreakOrder,
    mode: EditMode,
}

/// Session state for the two groups. Roster changes are saved as they happen;
/// orders and edit modes live only as long as the board.
pub struct Board {
    storage: Storage,
    storage_key: String,
    policy: RosterPolicy,
    roster: Roster,
    technical: GroupState,
    service: GroupState,
}

impl Board {
    /// Build a board over `storage`, loading the roster stored under `key`.
    /// Missing or unreadable data falls back to `default`.
    pub fn open(
        storage: Storage,
        key: impl Into<String>,
        default: Roster,
        policy: RosterPolicy,
    ) -> Self {
        let storage_key = key.into();
        let roster = storage.load_roster_or(&storage_key, default);
        info!(workers = roster.len(), key = %storage_key, "roster loaded");
        Self {
            storage,
            storage_key,
            policy,
            roster,
            technical: GroupState::default(),
            service: GroupState::default(),
        }
    }

    /// Open the configured database, with the configured default roster.
    pub fn from_config(config: &Config) -> Result<Self> {
        let default = match &config.roster_file {
            Some(path) => load_roster_file(path)?,
            None => builtin_roster(),
        };
        let storage = Storage::open(&config.db_path)?;
        Ok(Self::open(
            storage,
            config.storage_key.clone(),
            default,
            config.roster_policy,
        ))
    }

    /// Create a board with in-memory storage (for testing).
    pub fn in_memory(default: Roster, policy: RosterPolicy) -> Result<Self> {
        Ok(Self::open(Storage::in_memory()?, "workers", default, policy))
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    fn state(&self, group: Group) -> &GroupState {
        match group {
            Group::Technical => &self.technical,
            Group::Service => &self.service,
        }
    }

    fn state_mut(&mut self, group: Group) -> &mut GroupState {
        match group {
            Group::Technical => &mut self.technical,
            Group::Service => &mut self.service,
        }
    }

    /// Save `roster` and make it current. On a failed save nothing changes.
    fn commit(&mut self, roster: Roster) -> Result<()> {
        self.storage.save_roster(&self.storage_key, &roster)?;
        self.roster = roster;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Orders
    // -----------------------------------------------------------------------

    /// The group's current order. Empty until the first shuffle or edit.
    pub fn order(&self, group: Group) -> &BreakOrder {
        &self.state(group).order
    }

    /// What the group's table shows: the current order, or the active
    /// workers in roster order if nothing has been shuffled yet.
    pub fn display_order(&self, group: Group) -> BreakOrder {
        let order = &self.state(group).order;
        if order.is_empty() {
            self.roster.active_in(group).into()
        } else {
            order.clone()
        }
    }

    /// Shuffle one group with the thread-local RNG.
    pub fn shuffle(&mut self, group: Group) -> &BreakOrder {
        self.shuffle_with(group, &mut rand::thread_rng())
    }

    /// Shuffle one group. The result becomes the group's current order.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, group: Group, rng: &mut R) -> &BreakOrder {
        let candidates = self.roster.active_in(group);
        let state = match group {
            Group::Technical => &mut self.technical,
            Group::Service => &mut self.service,
        };

        if state.order.is_stale(&candidates) {
            warn!(%group, "current order is stale, shuffling from roster order");
            state.order.clear();
        }

        let (reference, locked) = if state.order.is_empty() {
            ("candidates", candidates.iter().filter(|w| w.locked).count())
        } else {
            ("previous", state.order.locked_count())
        };
        let span = start_shuffle_span(group, candidates.len(), locked);
        span.record("order.reference", reference);
        let _enter = span.enter();

        state.order = engine::shuffle_with(&state.order, &candidates, rng);
        info!(%group, len = state.order.len(), locked, "order shuffled");
        &state.order
    }

    /// Shuffle both groups.
    pub fn shuffle_all(&mut self) {
        let mut rng = rand::thread_rng();
        for group in Group::ALL {
            self.shuffle_with(group, &mut rng);
        }
    }

    // -----------------------------------------------------------------------
    // Edit mode
    // -----------------------------------------------------------------------

    pub fn mode(&self, group: Group) -> EditMode {
        self.state(group).mode
    }

    pub fn begin_editing(&mut self, group: Group) {
        self.state_mut(group).mode = EditMode::Editing;
    }

    pub fn finish_editing(&mut self, group: Group) {
        self.state_mut(group).mode = EditMode::Viewing;
    }

    /// Flip between viewing and editing. Returns the new mode.
    pub fn toggle_editing(&mut self, group: Group) -> EditMode {
        let state = self.state_mut(group);
        state.mode = match state.mode {
            EditMode::Viewing => EditMode::Editing,
            EditMode::Editing => EditMode::Viewing,
        };
        state.mode
    }

    fn require_editing(&self, group: Group) -> Result<()> {
        match self.mode(group) {
            EditMode::Editing => Ok(()),
            EditMode::Viewing => Err(Error::NotEditing(group)),
        }
    }

    /// Swap two entries of the displayed order (drag and drop).
    ///
    /// Works on the roster-order fallback if the group was never shuffled.
    /// A rejected move leaves the order as it was.
    pub fn move_entry(&mut self, group: Group, from: usize, to: usize) -> Result<()> {
        self.require_editing(group)?;
        let mut order = self.display_order(group);
        match order.move_adjacent(from, to) {
            Ok(()) => {
                record_move(group, from, to, true);
                self.state_mut(group).order = order;
                Ok(())
            }
            Err(e) => {
                record_move(group, from, to, false);
                Err(e)
            }
        }
    }

    /// Move one entry up or down a place. Returns its new index.
    pub fn step(&mut self, group: Group, index: usize, direction: Direction) -> Result<usize> {
        self.require_editing(group)?;
        let mut order = self.display_order(group);
        let target = order.step(index, direction)?;
        self.state_mut(group).order = order;
        debug!(%group, from = index, to = target, "order stepped");
        Ok(target)
    }

    // -----------------------------------------------------------------------
    // Roster
    // -----------------------------------------------------------------------

    /// Add a worker and fold them into their group's order per the policy.
    pub fn add_worker(&mut self, new: NewWorker) -> Result<Worker> {
        let mut roster = self.roster.clone();
        let worker = roster.add(new)?.clone();
        self.commit(roster)?;
        info!(worker_id = %worker.id, group = %worker.group, "worker added");
        if worker.active_today {
            self.admit(&worker);
        }
        Ok(worker)
    }

    /// Remove a worker. An order that listed them is reset.
    pub fn remove_worker(&mut self, id: WorkerId) -> Result<Worker> {
        let mut roster = self.roster.clone();
        let worker = roster.remove(id)?;
        self.commit(roster)?;
        info!(worker_id = %id, group = %worker.group, "worker removed");
        self.evict(&worker);
        Ok(worker)
    }

    /// Flip a worker's active-today flag. Returns the new value.
    pub fn toggle_active(&mut self, id: WorkerId) -> Result<bool> {
        let mut roster = self.roster.clone();
        let active = roster.toggle_active(id)?;
        let worker = roster.get(id)?.clone();
        self.commit(roster)?;
        info!(worker_id = %id, active, "worker active flag toggled");
        if active {
            self.admit(&worker);
        } else {
            self.evict(&worker);
        }
        Ok(active)
    }

    /// Flip a worker's lock in the roster and in any order showing them.
    /// Nothing moves; the lock applies from the next shuffle on.
    pub fn toggle_lock(&mut self, id: WorkerId) -> Result<bool> {
        let group = self.roster.get(id)?.group;
        self.require_editing(group)?;

        let mut roster = self.roster.clone();
        let locked = roster.toggle_lock(id)?;
        self.commit(roster)?;
        for state in [&mut self.technical, &mut self.service] {
            state.order.set_locked(id, locked);
        }
        info!(worker_id = %id, locked, "worker lock toggled");
        Ok(locked)
    }

    /// Clear the stored roster and start over from `default`.
    pub fn reset_roster(&mut self, default: Roster) -> Result<()> {
        self.storage.clear(&self.storage_key)?;
        self.roster = default;
        self.technical.order.clear();
        self.service.order.clear();
        info!(workers = self.roster.len(), "roster reset to defaults");
        Ok(())
    }

    /// A worker joined the group's active set.
    fn admit(&mut self, worker: &Worker) {
        let policy = self.policy;
        let state = self.state_mut(worker.group);
        if state.order.is_empty() {
            return;
        }
        match policy {
            RosterPolicy::Splice => {
                state.order.push(worker.clone());
                debug!(worker_id = %worker.id, "appended to current order");
            }
            RosterPolicy::Reset => {
                state.order.clear();
                debug!(group = %worker.group, "current order reset");
            }
        }
    }

    /// A worker left the group's active set.
    fn evict(&mut self, worker: &Worker) {
        let state = self.state_mut(worker.group);
        if state.order.contains(worker.id) {
            state.order.clear();
            debug!(group = %worker.group, worker_id = %worker.id, "current order reset");
        }
    }

    // -----------------------------------------------------------------------
    // Export
    // -----------------------------------------------------------------------

    /// The message for the current orders.
    pub fn export(&self, period: BreakPeriod) -> Result<String> {
        if self.technical.order.is_empty() && self.service.order.is_empty() {
            return Err(Error::NothingToExport);
        }
        Ok(format_for_whatsapp(
            &self.technical.order,
            &self.service.order,
            period,
        ))
    }
}
