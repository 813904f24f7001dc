//! Per-kind record framing

use crate::model::{EventEntry, NoteEntry, ReminderEntry};
use crate::window::{iso8601, iso8601_or_empty};
use std::fmt;

/// Line opening every record
pub const SEPARATOR: &str = "-----";

/// The kind of item an export contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Note,
    Event,
    Reminder,
}

impl RecordKind {
    /// Footer key carrying the record total
    pub fn count_key(&self) -> &'static str {
        match self {
            RecordKind::Note => "NOTE_COUNT",
            RecordKind::Event => "EVENT_COUNT",
            RecordKind::Reminder => "REMINDER_COUNT",
        }
    }

    /// File name prefix for export logs
    pub fn log_prefix(&self) -> &'static str {
        match self {
            RecordKind::Note => "notes",
            RecordKind::Event => "calendar",
            RecordKind::Reminder => "reminders",
        }
    }

    /// Name of the application the records come from
    pub fn app_name(&self) -> &'static str {
        match self {
            RecordKind::Note => "Notes",
            RecordKind::Event => "Calendar",
            RecordKind::Reminder => "Reminders",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Note => "note",
            RecordKind::Event => "event",
            RecordKind::Reminder => "reminder",
        };
        write!(f, "{}", name)
    }
}

/// An item that can be rendered as one framed record
pub trait Record {
    fn kind(&self) -> RecordKind;

    /// The record's lines, starting with [`SEPARATOR`]
    fn lines(&self) -> Vec<String>;
}

fn kv(key: &str, value: impl AsRef<str>) -> String {
    format!("{}: {}", key, value.as_ref())
}

/// Push a marker line and, when non-empty, the raw text after it
fn push_text(lines: &mut Vec<String>, marker: &str, text: String) {
    lines.push(format!("{}:", marker));
    if !text.is_empty() {
        lines.push(text);
    }
}

impl Record for NoteEntry {
    fn kind(&self) -> RecordKind {
        RecordKind::Note
    }

    fn lines(&self) -> Vec<String> {
        let note = &self.note;
        let mut lines = vec![
            SEPARATOR.to_string(),
            kv("ID", note.id.read_or_default()),
            kv("TITLE", note.title.read_or_default()),
            kv("ACCOUNT", &self.account),
            kv("FOLDER", &self.folder),
            kv("CREATED", iso8601_or_empty(note.created.read())),
            kv("MODIFIED", iso8601_or_empty(note.modified.read())),
            kv("SMART", "false"),
        ];
        push_text(&mut lines, "BODY", note.body.read_or_default());
        lines
    }
}

impl Record for EventEntry {
    fn kind(&self) -> RecordKind {
        RecordKind::Event
    }

    fn lines(&self) -> Vec<String> {
        let event = &self.event;
        let mut lines = vec![
            SEPARATOR.to_string(),
            kv("TYPE", "CALENDAR_EVENT"),
            kv("ID", event.uid.read_or_default()),
            kv("TITLE", event.title.read_or_default()),
            kv("CALENDAR", &self.calendar),
            kv("START", iso8601(&self.start)),
            kv("END", iso8601_or_empty(event.end.read())),
            kv("LOCATION", event.location.read_or_default()),
        ];
        push_text(&mut lines, "NOTES", event.notes.read_or_default());
        lines
    }
}

impl Record for ReminderEntry {
    fn kind(&self) -> RecordKind {
        RecordKind::Reminder
    }

    fn lines(&self) -> Vec<String> {
        let reminder = &self.reminder;
        let completed = if reminder.completed.read_or_default() {
            "true"
        } else {
            "false"
        };
        let mut lines = vec![
            SEPARATOR.to_string(),
            kv("TYPE", "REMINDER"),
            kv("ID", reminder.id.read_or_default()),
            kv("TITLE", reminder.title.read_or_default()),
            kv("LIST", &self.list),
            kv("DUE", iso8601(&self.due)),
            kv("COMPLETED", completed),
            kv("COMPLETED_AT", iso8601_or_empty(reminder.completed_at.read())),
        ];
        push_text(&mut lines, "NOTES", reminder.body.read_or_default());
        lines
    }
}
