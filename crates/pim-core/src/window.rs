//! Timestamps and lookback windows

use crate::error::{PimError, Result};
use chrono::{DateTime, Duration, SecondsFormat, Utc};

/// Timestamps are normalized to UTC at the source boundary
pub type Timestamp = DateTime<Utc>;

/// Default lookback for calendar and reminder exports
pub const DEFAULT_LOOKBACK_DAYS: u32 = 3;

/// Longest accepted lookback, about a century
pub const MAX_LOOKBACK_DAYS: u32 = 36_500;

/// Render a timestamp as ISO-8601 with millisecond precision
/// (`2024-05-01T08:30:00.000Z`)
pub fn iso8601(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render an optional timestamp, absent values as an empty string
pub fn iso8601_or_empty(ts: Option<&Timestamp>) -> String {
    ts.map(iso8601).unwrap_or_default()
}

/// A closed time interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl TimeWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// The window `[now - days, now]`. Fails when the start would fall
    /// outside the representable date range.
    pub fn trailing_days(now: Timestamp, days: u32) -> Result<Self> {
        let start = now
            .checked_sub_signed(Duration::days(i64::from(days)))
            .ok_or_else(|| {
                PimError::Validation(format!("a lookback of {} days is out of range", days))
            })?;
        Ok(Self::new(start, now))
    }

    /// Inclusive at both ends
    pub fn contains(&self, ts: &Timestamp) -> bool {
        self.start <= *ts && *ts <= self.end
    }
}
