//! Line-oriented record emission
//!
//! Every export is a sequence of `-----`-framed records followed by a
//! footer:
//!
//! ```text
//! -----
//! ID: x-coredata://1
//! TITLE: Groceries
//! ...
//! BODY:
//! eggs, milk
//!
//! EXPORTED_AT: 2024-05-10T12:00:00.000Z
//! NOTE_COUNT: 1
//! ```

mod emitter;
mod record;

pub use emitter::{footer_lines, Emitter, ExportSummary};
pub use record::{Record, RecordKind, SEPARATOR};
