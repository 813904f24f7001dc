//! Read-only data sources
//!
//! A source enumerates containers and their items in the order the
//! underlying store provides them. An error from any of these calls means
//! the container could not be enumerated and ends the traversal.

mod snapshot;

pub use snapshot::{
    Snapshot, SnapshotAccount, SnapshotCalendar, SnapshotFolder, SnapshotList, SnapshotStore,
};

use crate::error::Result;
use crate::model::{Account, Calendar, Event, Folder, Note, Reminder, ReminderList};
use crate::window::TimeWindow;

/// Notes store: accounts, their folders, and the folders' notes
pub trait NotesSource {
    fn accounts(&self) -> Result<Vec<Account>>;

    fn folders(&self, account: &Account) -> Result<Vec<Folder>>;

    fn notes(&self, folder: &Folder) -> Result<Vec<Note>>;
}

/// Calendar store
pub trait CalendarSource {
    fn calendars(&self) -> Result<Vec<Calendar>>;

    /// Events of `calendar` whose start lies in `window`.
    ///
    /// The window is applied by the store itself; events whose start
    /// cannot be evaluated may be passed through.
    fn events_between(&self, calendar: &Calendar, window: &TimeWindow) -> Result<Vec<Event>>;
}

/// Reminders store
pub trait RemindersSource {
    fn lists(&self) -> Result<Vec<ReminderList>>;

    fn reminders(&self, list: &ReminderList) -> Result<Vec<Reminder>>;
}
