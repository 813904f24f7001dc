//! pim-core - Core library for pim-export
//!
//! This crate provides the data model, filtered traversal and record
//! emission for exporting Apple Notes, Calendar events and Reminders as
//! line-oriented text logs.

pub mod config;
pub mod emit;
pub mod error;
pub mod export;
pub mod field;
pub mod model;
pub mod source;
pub mod traverse;
pub mod window;

pub use error::{PimError, Result};
pub use field::Field;
pub use model::*;
pub use window::{TimeWindow, Timestamp};
