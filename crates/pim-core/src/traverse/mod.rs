//! Filtered traversal of PIM stores
//!
//! Each walk is a lazy iterator over `Result<Entry>`. Containers are
//! requested from the source only when the walk reaches them, source
//! order is preserved at every level, and the first error ends the walk.

mod calendar;
mod notes;
mod reminders;

pub use calendar::{walk_events, EventWalk};
pub use notes::{walk_notes, NoteFilter, NoteWalk};
pub use reminders::{walk_reminders, ReminderWalk};
