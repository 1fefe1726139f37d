// crates/engine/src/lib.rs
//! Copy scripts from a working directory into an application's scripts
//! folder, once or continuously.
//!
//! [`sync_once`] performs a single timestamp-aware pass;
//! [`watch::watch_loop`] runs that pass and then follows change
//! notifications, debouncing duplicates through a [`ledger::CopyLedger`].

pub mod config;
pub mod error;
pub mod event;
pub mod filesystem;
pub mod ledger;
pub mod platform;
pub mod sync;
pub mod watch;

pub use crate::sync::{SyncReport, sync_once};
