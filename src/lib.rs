//! # break-shuffle
//!
//! Break-order randomizer for two fixed worker groups.
//!
//! Keeps a roster in a single SQLite key/value slot, shuffles each group's
//! active workers while locked workers keep their positions, supports manual
//! reordering, and formats the day's orders as a WhatsApp message.

pub mod board;
pub mod config;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod export;
pub mod model;
pub mod order;
pub mod roster;
pub mod storage;
pub mod telemetry;
