//! Typed configuration from environment variables.
//!
//! Loads once at startup. Everything has a default; only malformed values
//! fail.

use std::path::PathBuf;

use crate::error::{Error, Result};

/// What adding or re-activating a worker does to a group's existing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RosterPolicy {
    /// Append the newcomer at the end, keeping everyone else in place.
    #[default]
    Splice,
    /// Drop the order; the group goes back to roster order until reshuffled.
    Reset,
}

impl std::str::FromStr for RosterPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "splice" => Ok(RosterPolicy::Splice),
            "reset" => Ok(RosterPolicy::Reset),
            other => Err(Error::Config(format!(
                "unknown roster policy {other:?}, expected \"splice\" or \"reset\""
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub storage_key: String,
    pub roster_file: Option<PathBuf>,
    pub roster_policy: RosterPolicy,
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// In local dev, call `dotenvy::dotenv().ok()` before this.
    pub fn from_env() -> Result<Self> {
        let storage_key = std::env::var("BREAKS_STORAGE_KEY").unwrap_or_else(|_| "workers".into());
        if storage_key.trim().is_empty() {
            return Err(Error::Config("BREAKS_STORAGE_KEY must not be empty".into()));
        }

        let roster_policy = match std::env::var("BREAKS_ROSTER_POLICY") {
            Ok(value) => value.parse()?,
            Err(_) => RosterPolicy::default(),
        };

        Ok(Self {
            db_path: std::env::var("BREAKS_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("breaks.db")),
            storage_key,
            roster_file: std::env::var("BREAKS_ROSTER_FILE").ok().map(PathBuf::from),
            roster_policy,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("breaks.db"),
            storage_key: "workers".to_string(),
            roster_file: None,
            roster_policy: RosterPolicy::default(),
            log_level: "info".to_string(),
        }
    }
}
