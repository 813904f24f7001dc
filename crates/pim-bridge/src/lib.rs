//! pim-bridge - osascript bridge for pim-export
//!
//! This crate exposes the live Notes, Calendar and Reminders stores of
//! macOS through the `pim-core` source traits by running an embedded JXA
//! script with `osascript`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pim_bridge::{Osascript, ScriptedStore};
//!
//! let store = ScriptedStore::new(Osascript::new("osascript"));
//! let accounts = pim_core::source::NotesSource::accounts(&store)?;
//! ```

pub mod runner;
pub mod store;

pub use runner::{Osascript, ScriptRunner, BRIDGE_SCRIPT};
pub use store::ScriptedStore;
