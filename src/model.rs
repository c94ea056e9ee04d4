//! Core data model.
//!
//! A worker belongs to exactly one of two fixed groups. Whether they take part
//! in today's breaks and whether their place in the order is locked are plain
//! fields on the record, so every invariant is checkable from the data alone.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

/// A worker known to the roster.
///
/// Field names on the wire match the browser blob the roster was originally
/// stored in, so an exported `workers` record can be loaded as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    /// Unique identifier. Assigned monotonically, never reused in a session.
    pub id: WorkerId,

    /// Display name.
    pub name: String,

    pub group: Group,

    /// Takes part in today's break scheduling.
    #[serde(rename = "isWorkingToday")]
    pub active_today: bool,

    /// Keeps its current position across the next shuffle.
    /// Older records predate locking and omit the field.
    #[serde(rename = "isHeld", default)]
    pub locked: bool,
}

impl Worker {
    /// True if this worker is eligible for `group`'s order today.
    pub fn is_candidate_for(&self, group: Group) -> bool {
        self.group == group && self.active_today
    }
}

/// Newtype for worker IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(pub u32);

impl std::fmt::Display for WorkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for WorkerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(WorkerId)
    }
}

// ---------------------------------------------------------------------------
// Group
// ---------------------------------------------------------------------------

/// The two fixed worker groups. Each has its own break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    #[serde(rename = "טכני", alias = "technical")]
    Technical,
    #[serde(rename = "שרות", alias = "service")]
    Service,
}

impl Group {
    pub const ALL: [Group; 2] = [Group::Technical, Group::Service];

    pub fn as_str(self) -> &'static str {
        match self {
            Group::Technical => "technical",
            Group::Service => "service",
        }
    }
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Group {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "technical" | "tech" | "טכני" => Ok(Group::Technical),
            "service" | "שרות" | "שירות" => Ok(Group::Service),
            other => Err(format!("unknown group: {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for adding a worker. The roster assigns the id.
#[derive(Debug, Clone)]
pub struct NewWorker {
    pub(crate) name: String,
    pub(crate) group: Group,
    pub(crate) active_today: bool,
    pub(crate) locked: bool,
}

impl NewWorker {
    pub fn new(name: impl Into<String>, group: Group) -> Self {
        Self {
            name: name.into(),
            group,
            active_today: true,
            locked: false,
        }
    }

    pub fn active_today(mut self, active: bool) -> Self {
        self.active_today = active;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }
}
