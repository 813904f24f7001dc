//! Export drivers
//!
//! An exporter binds a data source to its filters, walks it, and streams
//! every surviving item through an [`Emitter`](crate::emit::Emitter)
//! into any writer.
//!
//! # Example
//!
//! ```ignore
//! use pim_core::export::{Exporter, NotesExporter};
//!
//! let exporter = NotesExporter::new(&store, filter);
//! let summary = exporter.export(&mut std::io::stdout().lock())?;
//! ```

mod exporter;

pub use exporter::{CalendarExporter, Exporter, NotesExporter, RemindersExporter};
