//! pim-storage - Storage library for pim-export
//!
//! This crate writes export logs to timestamped files.

mod log_store;

pub use log_store::{LogStore, PendingLog};
