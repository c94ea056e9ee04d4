//! Default roster: built in, or loaded from a TOML file.
//!
//! The default is what a fresh install starts with and what a corrupt or
//! cleared store falls back to.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{Group, NewWorker, Worker, WorkerId};
use crate::roster::Roster;

/// Top-level TOML wrapper.
#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default, rename = "worker")]
    workers: Vec<WorkerEntry>,
}

#[derive(Debug, Deserialize)]
struct WorkerEntry {
    name: String,
    group: Group,
    #[serde(default = "default_active")]
    active_today: bool,
}

fn default_active() -> bool {
    true
}

/// Six technical and four service workers, all active.
pub fn builtin_roster() -> Roster {
    const TECHNICAL: [&str; 6] = ["אבי", "ולד", "דימטרי", "אריאל", "דניאל", "חן"];
    const SERVICE: [&str; 4] = ["מירי", "ארץ", "מירב", "תמר"];

    let workers = TECHNICAL
        .iter()
        .map(|name| (*name, Group::Technical))
        .chain(SERVICE.iter().map(|name| (*name, Group::Service)))
        .zip(1..)
        .map(|((name, group), id)| Worker {
            id: WorkerId(id),
            name: name.to_string(),
            group,
            active_today: true,
            locked: false,
        })
        .collect();
    Roster::new(workers)
}

/// Load a default roster from a TOML file of `[[worker]]` tables.
/// Ids are assigned in file order starting at 1.
pub fn load_roster_file(path: &Path) -> Result<Roster> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("cannot read roster file {}: {e}", path.display()))
    })?;
    parse_roster_toml(&content)
        .map_err(|e| Error::Config(format!("bad roster file {}: {e}", path.display())))
}

/// Parse the body of a roster file.
pub fn parse_roster_toml(content: &str) -> Result<Roster> {
    let file: RosterFile =
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;

    let mut roster = Roster::empty();
    for entry in file.workers {
        roster.add(NewWorker::new(entry.name, entry.group).active_today(entry.active_today))?;
    }
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_roster_has_both_groups() {
        let roster = builtin_roster();
        assert_eq!(roster.active_in(Group::Technical).len(), 6);
        assert_eq!(roster.active_in(Group::Service).len(), 4);
        assert_eq!(roster.workers()[9].id.0, 10);
        assert_eq!(roster.workers()[0].name, "אבי");
        assert_eq!(roster.next_id(), Some(WorkerId(11)));
        assert!(roster.has_unique_ids());
    }

    #[test]
    fn parses_worker_tables() {
        let roster = parse_roster_toml(
            r#"
            [[worker]]
            name = "Avi"
            group = "technical"

            [[worker]]
            name = "Miri"
            group = "service"
            active_today = false
            "#,
        )
        .unwrap();

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.workers()[0].group, Group::Technical);
        assert!(!roster.workers()[1].active_today);
    }

    #[test]
    fn unknown_group_is_a_config_error() {
        let err = parse_roster_toml("[[worker]]\nname = \"X\"\ngroup = \"kitchen\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = parse_roster_toml("[[worker]]\nname = \" \"\ngroup = \"service\"\n").unwrap_err();
        assert!(matches!(err, Error::EmptyName));
    }
}
