//! Calendars → events within a time window

use crate::error::{PimError, Result};
use crate::model::{Calendar, Event, EventEntry};
use crate::source::CalendarSource;
use crate::window::TimeWindow;
use std::vec;
use tracing::debug;

/// Lazy walk over the events of every calendar that start inside a window
pub struct EventWalk<'a, S: CalendarSource + ?Sized> {
    source: &'a S,
    window: TimeWindow,
    calendars: Option<vec::IntoIter<Calendar>>,
    calendar: Option<Calendar>,
    events: vec::IntoIter<Event>,
    done: bool,
}

/// Walk the events of `source` starting inside `window`.
///
/// The window is handed to the source; events without a readable start
/// are skipped.
pub fn walk_events<'a, S: CalendarSource + ?Sized>(
    source: &'a S,
    window: &TimeWindow,
) -> EventWalk<'a, S> {
    EventWalk {
        source,
        window: *window,
        calendars: None,
        calendar: None,
        events: Vec::new().into_iter(),
        done: false,
    }
}

impl<'a, S: CalendarSource + ?Sized> EventWalk<'a, S> {
    fn fail(&mut self, err: PimError) -> Option<Result<EventEntry>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<'a, S: CalendarSource + ?Sized> Iterator for EventWalk<'a, S> {
    type Item = Result<EventEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if let Some(event) = self.events.next() {
                let Some(start) = event.start.read().copied() else {
                    debug!("Skipping event without start: {}", event.title.read_or_default());
                    continue;
                };
                let calendar = self
                    .calendar
                    .as_ref()
                    .map(|c| c.name.clone())
                    .unwrap_or_default();
                return Some(Ok(EventEntry {
                    calendar,
                    start,
                    event,
                }));
            }

            if self.calendars.is_none() {
                match self.source.calendars() {
                    Ok(calendars) => {
                        debug!("Found {} calendars", calendars.len());
                        self.calendars = Some(calendars.into_iter());
                    }
                    Err(e) => return self.fail(e),
                }
            }

            let Some(calendar) = self.calendars.as_mut().and_then(Iterator::next) else {
                self.done = true;
                return None;
            };

            match self.source.events_between(&calendar, &self.window) {
                Ok(events) => {
                    debug!("Calendar {}: {} events in range", calendar.name, events.len());
                    self.events = events.into_iter();
                    self.calendar = Some(calendar);
                }
                Err(e) => return self.fail(e),
            }
        }
    }
}
