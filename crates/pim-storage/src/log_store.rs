//! Timestamped export log files
//!
//! Logs are named `<prefix>-YYYYMMDDhhmmss.log` in local time, e.g.
//! `notes-20240510120000.log`. A log is written to a hidden temp file and
//! only renamed into place once the export has finished.

use chrono::{DateTime, Local};
use pim_core::emit::RecordKind;
use pim_core::error::{PimError, Result};
use std::cmp::Reverse;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const LOG_EXTENSION: &str = "log";

/// Directory of export logs
pub struct LogStore {
    dir: PathBuf,
}

impl LogStore {
    /// Open a log directory, creating it if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self { dir: dir.into() };
        store.ensure_dir()?;
        Ok(store)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| {
                PimError::Io(io::Error::new(
                    e.kind(),
                    format!("Failed to create output directory {}: {}", self.dir.display(), e),
                ))
            })?;
            debug!("Created output directory: {:?}", self.dir);
        }
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File name for an export of `kind` started at `at`
    pub fn file_name(kind: RecordKind, at: &DateTime<Local>) -> String {
        format!(
            "{}-{}.{}",
            kind.log_prefix(),
            at.format("%Y%m%d%H%M%S"),
            LOG_EXTENSION
        )
    }

    /// Final path for a new log, avoiding existing files from the same second
    fn log_path(&self, kind: RecordKind, at: &DateTime<Local>) -> PathBuf {
        let name = Self::file_name(kind, at);
        let path = self.dir.join(&name);
        if !path.exists() {
            return path;
        }

        let stem = name.trim_end_matches(&format!(".{}", LOG_EXTENSION)).to_string();
        (2..)
            .map(|n| self.dir.join(format!("{}-{}.{}", stem, n, LOG_EXTENSION)))
            .find(|p| !p.exists())
            .unwrap_or(path)
    }

    /// Start a new log; nothing appears under the final name until commit
    pub fn begin(&self, kind: RecordKind, at: &DateTime<Local>) -> Result<PendingLog> {
        let final_path = self.log_path(kind, at);
        let file_name = final_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("export.log");
        let temp_path = self.dir.join(format!(".{}.tmp", file_name));

        let file = File::create(&temp_path).map_err(|e| {
            PimError::Io(io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;

        debug!("Writing {} export to {:?}", kind, temp_path);
        Ok(PendingLog {
            writer: Some(BufWriter::new(file)),
            temp_path,
            final_path,
        })
    }

    /// Existing logs of `kind`, newest first
    pub fn list(&self, kind: RecordKind) -> Result<Vec<PathBuf>> {
        let prefix = format!("{}-", kind.log_prefix());
        let mut logs = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            let is_log = path.extension().map(|e| e == LOG_EXTENSION).unwrap_or(false);
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with(&prefix))
                .unwrap_or(false);
            if is_log && matches {
                logs.push(path);
            }
        }

        logs.sort_by_cached_key(|path| Reverse(log_order(path, &prefix)));
        Ok(logs)
    }

    /// Most recent log of `kind`
    pub fn latest(&self, kind: RecordKind) -> Result<Option<PathBuf>> {
        Ok(self.list(kind)?.into_iter().next())
    }
}

/// Ordering key of a log: its timestamp, then its same-second suffix
/// (an unsuffixed log comes before `-2`)
fn log_order(path: &Path, prefix: &str) -> (String, u32) {
    let rest = path
        .file_stem()
        .and_then(|s| s.to_str())
        .and_then(|s| s.strip_prefix(prefix))
        .unwrap_or_default();
    match rest.split_once('-') {
        Some((stamp, n)) => (stamp.to_string(), n.parse().unwrap_or(1)),
        None => (rest.to_string(), 1),
    }
}

/// A log being written. Dropping it without [`PendingLog::commit`]
/// removes the partial file.
pub struct PendingLog {
    writer: Option<BufWriter<File>>,
    temp_path: PathBuf,
    final_path: PathBuf,
}

impl PendingLog {
    /// Where the log will land on commit
    pub fn final_path(&self) -> &Path {
        &self.final_path
    }

    /// Flush and move the log into place
    pub fn commit(mut self) -> Result<PathBuf> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }

        fs::rename(&self.temp_path, &self.final_path).map_err(|e| {
            let _ = fs::remove_file(&self.temp_path);
            PimError::Io(io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!("Committed export log {:?}", self.final_path);
        Ok(self.final_path.clone())
    }

    fn writer(&mut self) -> io::Result<&mut BufWriter<File>> {
        self.writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "log already committed"))
    }
}

impl Write for PendingLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer()?.flush()
    }
}

impl Drop for PendingLog {
    fn drop(&mut self) {
        if self.writer.take().is_some() && self.temp_path.exists() {
            if let Err(e) = fs::remove_file(&self.temp_path) {
                warn!("Failed to remove partial log {:?}: {}", self.temp_path, e);
            }
        }
    }
}
