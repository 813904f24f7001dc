//! Streaming emitter with running count and footer

use super::record::{Record, RecordKind};
use crate::error::Result;
use crate::window::{iso8601, Timestamp};
use std::io::Write;
use tracing::info;

/// Progress is logged every this many records
const PROGRESS_EVERY: usize = 10;

/// Outcome of a finished export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub kind: RecordKind,
    pub count: usize,
    pub exported_at: Timestamp,
}

/// Footer lines: a blank line, the completion time, and the record total
pub fn footer_lines(kind: RecordKind, count: usize, exported_at: &Timestamp) -> Vec<String> {
    vec![
        String::new(),
        format!("EXPORTED_AT: {}", iso8601(exported_at)),
        format!("{}: {}", kind.count_key(), count),
    ]
}

/// Writes records of one kind to `W`, one line per `\n`
pub struct Emitter<W: Write> {
    out: W,
    kind: RecordKind,
    count: usize,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W, kind: RecordKind) -> Self {
        Self {
            out,
            kind,
            count: 0,
        }
    }

    /// Records emitted so far
    pub fn count(&self) -> usize {
        self.count
    }

    /// Write one record
    pub fn emit<R: Record>(&mut self, record: &R) -> Result<()> {
        debug_assert_eq!(record.kind(), self.kind);
        self.write_lines(&record.lines())?;
        self.count += 1;
        if self.count % PROGRESS_EVERY == 0 {
            info!("Exported {} {}s", self.count, self.kind);
        }
        Ok(())
    }

    /// Write the footer and flush
    pub fn finish(mut self, exported_at: Timestamp) -> Result<ExportSummary> {
        let footer = footer_lines(self.kind, self.count, &exported_at);
        self.write_lines(&footer)?;
        self.out.flush()?;
        Ok(ExportSummary {
            kind: self.kind,
            count: self.count,
            exported_at,
        })
    }

    fn write_lines(&mut self, lines: &[String]) -> Result<()> {
        for line in lines {
            self.out.write_all(line.as_bytes())?;
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }
}
