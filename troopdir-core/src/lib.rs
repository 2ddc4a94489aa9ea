//! Core types and logic for the troopdir ecosystem.
//!
//! This crate provides everything the troopdir CLI builds on:
//! - `event` and `recurrence` for the calendar (including recurring
//!   series expansion)
//! - `store` for path-addressed record storage with pluggable backends
//! - `roster`, `attendance`, `rsvp`, `announcement`, `subscriber`,
//!   `curriculum`, and `gallery` record types
//! - `export` for CSV reports and `persist` for series writes

pub mod announcement;
pub mod attendance;
pub mod config;
pub mod curriculum;
pub mod error;
pub mod event;
pub mod export;
pub mod gallery;
pub mod id;
pub mod persist;
pub mod recurrence;
pub mod roster;
pub mod rsvp;
pub mod store;
pub mod subscriber;

pub use error::{TroopDirError, TroopDirResult};
