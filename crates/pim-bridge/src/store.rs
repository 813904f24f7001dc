//! Live PIM stores backed by a [`ScriptRunner`]

use crate::runner::ScriptRunner;
use pim_core::error::{PimError, Result};
use pim_core::model::{Account, Calendar, Event, Folder, Note, Reminder, ReminderList};
use pim_core::source::{CalendarSource, NotesSource, RemindersSource};
use pim_core::window::TimeWindow;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Notes, Calendar and Reminders read through bridge operations.
///
/// Every source call is one script invocation, so containers skipped by a
/// traversal are never read from the store.
pub struct ScriptedStore<R: ScriptRunner> {
    runner: R,
}

impl<R: ScriptRunner> ScriptedStore<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn call<T: DeserializeOwned>(&self, operation: &str, args: &[String]) -> Result<Vec<T>> {
        let stdout = self.runner.run(operation, args)?;
        let rows: Vec<T> = serde_json::from_str(&stdout).map_err(|e| PimError::Bridge {
            operation: operation.to_string(),
            message: format!("unexpected script output: {}", e),
        })?;
        debug!("{}: {} rows", operation, rows.len());
        Ok(rows)
    }

    /// Enumerate the children of a container, reporting failures against it
    fn children<T: DeserializeOwned>(
        &self,
        kind: &'static str,
        name: &str,
        operation: &str,
        args: &[String],
    ) -> Result<Vec<T>> {
        self.call(operation, args)
            .map_err(|e| PimError::container(kind, name, e.to_string()))
    }
}

impl<R: ScriptRunner> NotesSource for ScriptedStore<R> {
    fn accounts(&self) -> Result<Vec<Account>> {
        self.call("accounts", &[])
    }

    fn folders(&self, account: &Account) -> Result<Vec<Folder>> {
        self.children("account", &account.name, "folders", &[account.id.clone()])
    }

    fn notes(&self, folder: &Folder) -> Result<Vec<Note>> {
        self.children("folder", &folder.name, "notes", &[folder.id.clone()])
    }
}

impl<R: ScriptRunner> CalendarSource for ScriptedStore<R> {
    fn calendars(&self) -> Result<Vec<Calendar>> {
        self.call("calendars", &[])
    }

    fn events_between(&self, calendar: &Calendar, window: &TimeWindow) -> Result<Vec<Event>> {
        let args = [
            calendar.id.clone(),
            window.start.timestamp_millis().to_string(),
            window.end.timestamp_millis().to_string(),
        ];
        self.children("calendar", &calendar.name, "events", &args)
    }
}

impl<R: ScriptRunner> RemindersSource for ScriptedStore<R> {
    fn lists(&self) -> Result<Vec<ReminderList>> {
        self.call("lists", &[])
    }

    fn reminders(&self, list: &ReminderList) -> Result<Vec<Reminder>> {
        self.children("list", &list.name, "reminders", &[list.id.clone()])
    }
}
