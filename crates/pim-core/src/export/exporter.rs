//! Exporter trait and the three PIM exporters

use crate::emit::{Emitter, ExportSummary, Record, RecordKind};
use crate::error::Result;
use crate::source::{CalendarSource, NotesSource, RemindersSource};
use crate::traverse::{walk_events, walk_notes, walk_reminders, NoteFilter};
use crate::window::{TimeWindow, Timestamp};
use chrono::Utc;
use std::io::Write;
use tracing::info;

/// Trait for PIM exporters
pub trait Exporter {
    /// The kind of record produced
    fn kind(&self) -> RecordKind;

    /// Stream the export into `out`, footer included
    fn export(&self, out: &mut dyn Write) -> Result<ExportSummary>;

    /// Export into a string
    fn export_to_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.export(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

/// Source of the completion timestamp written to the footer
pub type Clock = fn() -> Timestamp;

fn system_clock() -> Timestamp {
    Utc::now()
}

/// Drain a walk into an emitter; the first traversal error aborts
fn drive<R, I>(out: &mut dyn Write, kind: RecordKind, walk: I, clock: Clock) -> Result<ExportSummary>
where
    R: Record,
    I: Iterator<Item = Result<R>>,
{
    let mut emitter = Emitter::new(out, kind);
    for entry in walk {
        emitter.emit(&entry?)?;
    }
    let summary = emitter.finish(clock())?;
    info!("Export complete: {} {}s", summary.count, kind);
    Ok(summary)
}

/// Exports notes that pass a [`NoteFilter`]
pub struct NotesExporter<'a, S: NotesSource + ?Sized> {
    source: &'a S,
    filter: NoteFilter,
    clock: Clock,
}

impl<'a, S: NotesSource + ?Sized> NotesExporter<'a, S> {
    pub fn new(source: &'a S, filter: NoteFilter) -> Self {
        Self {
            source,
            filter,
            clock: system_clock,
        }
    }

    /// Replace the clock used for `EXPORTED_AT`
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

impl<'a, S: NotesSource + ?Sized> Exporter for NotesExporter<'a, S> {
    fn kind(&self) -> RecordKind {
        RecordKind::Note
    }

    fn export(&self, out: &mut dyn Write) -> Result<ExportSummary> {
        info!("Exporting Apple Notes");
        drive(out, RecordKind::Note, walk_notes(self.source, &self.filter), self.clock)
    }
}

/// Exports calendar events starting inside a window
pub struct CalendarExporter<'a, S: CalendarSource + ?Sized> {
    source: &'a S,
    window: TimeWindow,
    clock: Clock,
}

impl<'a, S: CalendarSource + ?Sized> CalendarExporter<'a, S> {
    pub fn new(source: &'a S, window: TimeWindow) -> Self {
        Self {
            source,
            window,
            clock: system_clock,
        }
    }

    /// Replace the clock used for `EXPORTED_AT`
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

impl<'a, S: CalendarSource + ?Sized> Exporter for CalendarExporter<'a, S> {
    fn kind(&self) -> RecordKind {
        RecordKind::Event
    }

    fn export(&self, out: &mut dyn Write) -> Result<ExportSummary> {
        info!(
            "Exporting calendar events from {} to {}",
            self.window.start, self.window.end
        );
        drive(out, RecordKind::Event, walk_events(self.source, &self.window), self.clock)
    }
}

/// Exports reminders due inside a window
pub struct RemindersExporter<'a, S: RemindersSource + ?Sized> {
    source: &'a S,
    window: TimeWindow,
    clock: Clock,
}

impl<'a, S: RemindersSource + ?Sized> RemindersExporter<'a, S> {
    pub fn new(source: &'a S, window: TimeWindow) -> Self {
        Self {
            source,
            window,
            clock: system_clock,
        }
    }

    /// Replace the clock used for `EXPORTED_AT`
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

impl<'a, S: RemindersSource + ?Sized> Exporter for RemindersExporter<'a, S> {
    fn kind(&self) -> RecordKind {
        RecordKind::Reminder
    }

    fn export(&self, out: &mut dyn Write) -> Result<ExportSummary> {
        info!(
            "Exporting reminders due from {} to {}",
            self.window.start, self.window.end
        );
        drive(
            out,
            RecordKind::Reminder,
            walk_reminders(self.source, &self.window),
            self.clock,
        )
    }
}
