//! In-memory store loaded from a JSON snapshot
//!
//! ```json
//! {
//!   "accounts": [{ "name": "iCloud", "folders": [{ "name": "Notes", "notes": [] }] }],
//!   "calendars": [{ "name": "Home", "events": [] }],
//!   "lists": [{ "name": "Inbox", "reminders": [] }]
//! }
//! ```
//!
//! Container ids are index paths (`"0"`, `"0/1"`), matching the ids the
//! scripting bridge hands out.

use super::{CalendarSource, NotesSource, RemindersSource};
use crate::error::{PimError, Result};
use crate::model::{Account, Calendar, Event, Folder, Note, Reminder, ReminderList};
use crate::window::TimeWindow;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Serialized form of a whole PIM store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub accounts: Vec<SnapshotAccount>,
    pub calendars: Vec<SnapshotCalendar>,
    pub lists: Vec<SnapshotList>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotAccount {
    pub name: String,
    #[serde(default)]
    pub folders: Vec<SnapshotFolder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFolder {
    pub name: String,
    #[serde(default)]
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotCalendar {
    pub name: String,
    #[serde(default)]
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotList {
    pub name: String,
    #[serde(default)]
    pub reminders: Vec<Reminder>,
}

/// A [`Snapshot`] served through the source traits
#[derive(Debug, Clone, Default)]
pub struct SnapshotStore {
    snapshot: Snapshot,
}

impl SnapshotStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PimError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let store = Self::from_json(&content)
            .map_err(|e| e.with_context(format!("Invalid snapshot {}", path.display())))?;
        debug!("Loaded snapshot from {:?}", path);
        Ok(store)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

fn parse_index(kind: &'static str, id: &str) -> Result<usize> {
    id.parse()
        .map_err(|_| PimError::container(kind, id, "malformed container id"))
}

fn parse_path(kind: &'static str, id: &str) -> Result<(usize, usize)> {
    let (outer, inner) = id
        .split_once('/')
        .ok_or_else(|| PimError::container(kind, id, "malformed container id"))?;
    Ok((parse_index(kind, outer)?, parse_index(kind, inner)?))
}

impl NotesSource for SnapshotStore {
    fn accounts(&self) -> Result<Vec<Account>> {
        Ok(self
            .snapshot
            .accounts
            .iter()
            .enumerate()
            .map(|(i, account)| Account {
                id: i.to_string(),
                name: account.name.clone(),
            })
            .collect())
    }

    fn folders(&self, account: &Account) -> Result<Vec<Folder>> {
        let index = parse_index("account", &account.id)?;
        let source = self
            .snapshot
            .accounts
            .get(index)
            .ok_or_else(|| PimError::container("account", &account.name, "no such account"))?;

        Ok(source
            .folders
            .iter()
            .enumerate()
            .map(|(j, folder)| Folder {
                id: format!("{}/{}", index, j),
                name: folder.name.clone(),
            })
            .collect())
    }

    fn notes(&self, folder: &Folder) -> Result<Vec<Note>> {
        let (i, j) = parse_path("folder", &folder.id)?;
        self.snapshot
            .accounts
            .get(i)
            .and_then(|account| account.folders.get(j))
            .map(|f| f.notes.clone())
            .ok_or_else(|| PimError::container("folder", &folder.name, "no such folder"))
    }
}

impl CalendarSource for SnapshotStore {
    fn calendars(&self) -> Result<Vec<Calendar>> {
        Ok(self
            .snapshot
            .calendars
            .iter()
            .enumerate()
            .map(|(i, calendar)| Calendar {
                id: i.to_string(),
                name: calendar.name.clone(),
            })
            .collect())
    }

    fn events_between(&self, calendar: &Calendar, window: &TimeWindow) -> Result<Vec<Event>> {
        let index = parse_index("calendar", &calendar.id)?;
        let source = self
            .snapshot
            .calendars
            .get(index)
            .ok_or_else(|| PimError::container("calendar", &calendar.name, "no such calendar"))?;

        // Events with an unreadable start cannot be range-checked; they pass
        // through and are dropped by the traversal.
        Ok(source
            .events
            .iter()
            .filter(|event| event.start.read().map_or(true, |start| window.contains(start)))
            .cloned()
            .collect())
    }
}

impl RemindersSource for SnapshotStore {
    fn lists(&self) -> Result<Vec<ReminderList>> {
        Ok(self
            .snapshot
            .lists
            .iter()
            .enumerate()
            .map(|(i, list)| ReminderList {
                id: i.to_string(),
                name: list.name.clone(),
            })
            .collect())
    }

    fn reminders(&self, list: &ReminderList) -> Result<Vec<Reminder>> {
        let index = parse_index("list", &list.id)?;
        self.snapshot
            .lists
            .get(index)
            .map(|l| l.reminders.clone())
            .ok_or_else(|| PimError::container("list", &list.name, "no such list"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use chrono::{Duration, TimeZone, Utc};

    const SAMPLE: &str = r#"{
        "accounts": [
            {"name": "iCloud", "folders": [
                {"name": "Notes", "notes": [{"id": "n1", "title": "First"}]},
                {"name": "Journal"}
            ]},
            {"name": "On My Mac"}
        ],
        "calendars": [{"name": "Home", "events": [
            {"uid": "e1", "start": "2024-05-09T10:00:00.000Z"},
            {"uid": "e2", "start": "2024-04-01T10:00:00.000Z"},
            {"uid": "e3"}
        ]}],
        "lists": [{"name": "Inbox", "reminders": [{"id": "r1", "completed": true}]}]
    }"#;

    #[test]
    fn test_accounts_and_folders_keep_order() {
        let store = SnapshotStore::from_json(SAMPLE).unwrap();
        let accounts = store.accounts().unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].name, "iCloud");
        assert_eq!(accounts[1].id, "1");

        let folders = store.folders(&accounts[0]).unwrap();
        let names: Vec<_> = folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Notes", "Journal"]);
        assert_eq!(folders[1].id, "0/1");

        let notes = store.notes(&folders[0]).unwrap();
        assert_eq!(notes[0].title, Field::Value("First".to_string()));
        assert!(store.notes(&folders[1]).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_container_is_an_error() {
        let store = SnapshotStore::from_json(SAMPLE).unwrap();
        let bogus = Folder {
            id: "7/0".to_string(),
            name: "Gone".to_string(),
        };
        let err = store.notes(&bogus).unwrap_err();
        assert!(matches!(err, PimError::Container { kind: "folder", .. }));

        let malformed = Account {
            id: "x".to_string(),
            name: "Broken".to_string(),
        };
        assert!(store.folders(&malformed).is_err());
    }

    #[test]
    fn test_events_between_prefilters_by_start() {
        let store = SnapshotStore::from_json(SAMPLE).unwrap();
        let calendar = store.calendars().unwrap().remove(0);
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap();
        let window = TimeWindow::new(now - Duration::days(3), now);

        let events = store.events_between(&calendar, &window).unwrap();
        let uids: Vec<_> = events.iter().map(|e| e.uid.read_or_default()).collect();
        assert_eq!(uids, vec!["e1", "e3"]);
    }

    #[test]
    fn test_malformed_date_does_not_fail_the_load() {
        let store = SnapshotStore::from_json(
            r#"{"accounts": [{"name": "iCloud", "folders": [{"name": "Notes", "notes": [
                {"id": "n1", "title": "Draft", "created": "yesterday"}
            ]}]}]}"#,
        )
        .unwrap();
        let account = store.accounts().unwrap().remove(0);
        let folder = store.folders(&account).unwrap().remove(0);
        let notes = store.notes(&folder).unwrap();
        assert_eq!(notes[0].title, Field::Value("Draft".to_string()));
        assert!(matches!(notes[0].created, Field::Failed { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = SnapshotStore::load(Path::new("/nonexistent/snapshot.json")).unwrap_err();
        assert!(matches!(err, PimError::FileNotFound(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, SAMPLE).unwrap();
        let store = SnapshotStore::load(&path).unwrap();
        assert_eq!(store.snapshot().lists[0].reminders.len(), 1);
    }
}
