//! Lists → reminders due within a time window

use crate::error::{PimError, Result};
use crate::model::{Reminder, ReminderEntry, ReminderList};
use crate::source::RemindersSource;
use crate::window::TimeWindow;
use std::vec;
use tracing::{debug, trace};

/// Lazy walk over reminders whose due time lies inside a window
pub struct ReminderWalk<'a, S: RemindersSource + ?Sized> {
    source: &'a S,
    window: TimeWindow,
    lists: Option<vec::IntoIter<ReminderList>>,
    list: Option<ReminderList>,
    reminders: vec::IntoIter<Reminder>,
    done: bool,
}

/// Walk the reminders of `source` due inside `window`.
///
/// Every reminder is fetched; the window is applied here. Reminders
/// without a readable due time are skipped.
pub fn walk_reminders<'a, S: RemindersSource + ?Sized>(
    source: &'a S,
    window: &TimeWindow,
) -> ReminderWalk<'a, S> {
    ReminderWalk {
        source,
        window: *window,
        lists: None,
        list: None,
        reminders: Vec::new().into_iter(),
        done: false,
    }
}

impl<'a, S: RemindersSource + ?Sized> ReminderWalk<'a, S> {
    fn fail(&mut self, err: PimError) -> Option<Result<ReminderEntry>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<'a, S: RemindersSource + ?Sized> Iterator for ReminderWalk<'a, S> {
    type Item = Result<ReminderEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            if let Some(reminder) = self.reminders.next() {
                let Some(due) = reminder.due.read().copied() else {
                    continue;
                };
                if !self.window.contains(&due) {
                    trace!("Reminder due {} outside window", due);
                    continue;
                }
                let list = self.list.as_ref().map(|l| l.name.clone()).unwrap_or_default();
                return Some(Ok(ReminderEntry {
                    list,
                    due,
                    reminder,
                }));
            }

            if self.lists.is_none() {
                match self.source.lists() {
                    Ok(lists) => self.lists = Some(lists.into_iter()),
                    Err(e) => return self.fail(e),
                }
            }

            let Some(list) = self.lists.as_mut().and_then(Iterator::next) else {
                self.done = true;
                return None;
            };

            match self.source.reminders(&list) {
                Ok(reminders) => {
                    debug!("List {}: {} reminders", list.name, reminders.len());
                    self.reminders = reminders.into_iter();
                    self.list = Some(list);
                }
                Err(e) => return self.fail(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::window::{iso8601, Timestamp};
    use chrono::{Duration, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    struct Lists(Vec<(String, Vec<Reminder>)>);

    impl RemindersSource for Lists {
        fn lists(&self) -> Result<Vec<ReminderList>> {
            Ok(self
                .0
                .iter()
                .enumerate()
                .map(|(i, (name, _))| ReminderList {
                    id: i.to_string(),
                    name: name.clone(),
                })
                .collect())
        }

        fn reminders(&self, list: &ReminderList) -> Result<Vec<Reminder>> {
            let index: usize = list.id.parse().unwrap();
            Ok(self.0[index].1.clone())
        }
    }

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
    }

    fn due(id: &str, at: Timestamp) -> Reminder {
        Reminder {
            id: Field::Value(id.to_string()),
            due: Field::Value(at),
            ..Reminder::default()
        }
    }

    fn ids(source: &Lists) -> Vec<String> {
        walk_reminders(source, &TimeWindow::trailing_days(now(), 3).unwrap())
            .map(|entry| entry.unwrap().reminder.id.read_or_default())
            .collect()
    }

    #[test]
    fn test_inclusive_boundaries() {
        let ms = Duration::milliseconds(1);
        let start = now() - Duration::days(3);
        let source = Lists(vec![(
            "Inbox".to_string(),
            vec![
                due("at-now", now()),
                due("at-start", start),
                due("after-now", now() + ms),
                due("before-start", start - ms),
                due("inside", now() - Duration::hours(5)),
            ],
        )]);

        assert_eq!(ids(&source), vec!["at-now", "at-start", "inside"]);
    }

    #[test]
    fn test_reminders_without_due_are_skipped() {
        let source = Lists(vec![(
            "Inbox".to_string(),
            vec![
                Reminder {
                    id: Field::Value("no-due".to_string()),
                    ..Reminder::default()
                },
                Reminder {
                    id: Field::Value("bad-due".to_string()),
                    due: Field::failed("Can't get dueDate"),
                    ..Reminder::default()
                },
                due("ok", now()),
            ],
        )]);

        assert_eq!(ids(&source), vec!["ok"]);
    }

    #[test]
    fn test_list_context_and_order() {
        let source = Lists(vec![
            ("Groceries".to_string(), vec![due("g1", now()), due("g2", now())]),
            ("Empty".to_string(), Vec::new()),
            ("Work".to_string(), vec![due("w1", now() - Duration::days(1))]),
        ]);

        let entries: Vec<_> = walk_reminders(&source, &TimeWindow::trailing_days(now(), 3).unwrap())
            .collect::<Result<_>>()
            .unwrap();
        let seen: Vec<_> = entries
            .iter()
            .map(|e| format!("{}:{}", e.list, e.reminder.id.read_or_default()))
            .collect();
        assert_eq!(seen, vec!["Groceries:g1", "Groceries:g2", "Work:w1"]);
        assert_eq!(iso8601(&entries[2].due), "2024-05-09T12:00:00.000Z");
    }
}
