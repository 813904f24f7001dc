//! PIM record types
//!
//! Containers carry an opaque `id` that only the source that produced them
//! understands. Item properties are [`Field`]s so that a single unreadable
//! property degrades to its default instead of failing the item.

use crate::field::Field;
use crate::window::Timestamp;
use serde::{Deserialize, Serialize};

/// A Notes account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
}

/// A folder inside a Notes account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
}

/// A single note
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    pub id: Field<String>,
    pub title: Field<String>,
    /// Plain-text body
    pub body: Field<String>,
    pub created: Field<Timestamp>,
    pub modified: Field<Timestamp>,
}

/// A calendar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: String,
    pub name: String,
}

/// A calendar event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    pub uid: Field<String>,
    pub title: Field<String>,
    pub start: Field<Timestamp>,
    pub end: Field<Timestamp>,
    pub location: Field<String>,
    /// Description text
    pub notes: Field<String>,
}

/// A Reminders list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderList {
    pub id: String,
    pub name: String,
}

/// A reminder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reminder {
    pub id: Field<String>,
    pub title: Field<String>,
    pub due: Field<Timestamp>,
    pub completed: Field<bool>,
    pub completed_at: Field<Timestamp>,
    pub body: Field<String>,
}

/// A note with the account and folder it was found in
#[derive(Debug, Clone, PartialEq)]
pub struct NoteEntry {
    pub account: String,
    pub folder: String,
    pub note: Note,
}

/// An event with its calendar name and resolved start time
#[derive(Debug, Clone, PartialEq)]
pub struct EventEntry {
    pub calendar: String,
    pub start: Timestamp,
    pub event: Event,
}

/// A reminder with its list name and resolved due time
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderEntry {
    pub list: String,
    pub due: Timestamp,
    pub reminder: Reminder,
}
