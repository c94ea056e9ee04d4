//! Error types for break-shuffle.

use thiserror::Error;

use crate::model::{Group, WorkerId};

#[derive(Debug, Error)]
pub enum Error {
    #[error("worker not found: {0}")]
    NotFound(WorkerId),

    #[error("entry at position {index} is locked")]
    Locked { index: usize },

    #[error("position {index} is out of range for an order of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("{0} order is not in editing mode")]
    NotEditing(Group),

    #[error("worker name must not be empty")]
    EmptyName,

    #[error("no worker ids left to assign")]
    IdsExhausted,

    #[error("nothing to export: no group has been shuffled")]
    NothingToExport,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
